//! Filtered resource listing from a local state file.

use crate::config::Config;
use crate::datasource::{check, require};
use crate::error::Result;
use crate::state::{project_resources, read_state, ResourceFilter, ResourceRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateResourcesQuery {
    /// Path to the state file
    pub state_path: String,

    /// Retain only resources with this mode ("managed" or "data")
    #[serde(default)]
    pub filter_mode: Option<String>,

    /// Retain only resources of this type
    #[serde(default)]
    pub filter_type: Option<String>,

    /// Retain only resources in this module path
    #[serde(default)]
    pub filter_module: Option<String>,
}

/// Resource listing after filtering, in state file order.
#[derive(Debug, Clone, Serialize)]
pub struct StateResources {
    /// State file path (echoes the query)
    pub state_path: String,

    /// Mode filter that was applied, if any
    pub filter_mode: Option<String>,

    /// Type filter that was applied, if any
    pub filter_type: Option<String>,

    /// Module filter that was applied, if any
    pub filter_module: Option<String>,

    /// Number of resources after filtering
    pub resource_count: usize,

    /// Projected resource records
    pub resources: Vec<ResourceRecord>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &StateResourcesQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "state_path", &query.state_path);
    if let Some(mode) = query.filter_mode.as_deref() {
        if !mode.is_empty() && mode != "managed" && mode != "data" {
            errors.push("'filter_mode' must be either 'managed' or 'data'.".to_string());
        }
    }
    errors
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(String::from)
}

/// List the resources of a state file, applying the filter conjunction.
///
/// # Errors
///
/// `Validation` when the query is malformed; otherwise the reader's
/// classified failures.
pub async fn read(_settings: &Config, query: &StateResourcesQuery) -> Result<StateResources> {
    check(validate(query))?;

    info!(
        state_path = %query.state_path,
        filter_mode = ?query.filter_mode,
        filter_type = ?query.filter_type,
        filter_module = ?query.filter_module,
        "reading state resources"
    );

    let state = read_state(&query.state_path)?;
    let filter = ResourceFilter {
        mode: non_empty(&query.filter_mode),
        resource_type: non_empty(&query.filter_type),
        module: non_empty(&query.filter_module),
    };
    let resources = project_resources(&state, &filter);

    info!(state_path = %query.state_path, count = resources.len(), "retrieved state resources");

    Ok(StateResources {
        state_path: query.state_path.clone(),
        filter_mode: query.filter_mode.clone(),
        filter_type: query.filter_type.clone(),
        filter_module: query.filter_module.clone(),
        resource_count: resources.len(),
        resources,
    })
}
