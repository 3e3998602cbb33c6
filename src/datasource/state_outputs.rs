//! Output listing from a local state file.

use crate::config::Config;
use crate::datasource::{check, require};
use crate::error::Result;
use crate::state::{project_outputs, read_state, OutputRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateOutputsQuery {
    /// Path to the state file
    pub state_path: String,

    /// Retain only the output with this name
    #[serde(default)]
    pub filter_name: Option<String>,
}

/// Output listing after filtering, in the state file's own order.
/// Sensitive values are carried through verbatim; safeguarding them is the
/// caller's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct StateOutputs {
    /// State file path (echoes the query)
    pub state_path: String,

    /// Name filter that was applied, if any
    pub filter_name: Option<String>,

    /// Number of outputs after filtering
    pub output_count: usize,

    /// Projected output records
    pub outputs: Vec<OutputRecord>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &StateOutputsQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "state_path", &query.state_path);
    errors
}

/// List the outputs of a state file.
///
/// # Errors
///
/// `Validation` when the query is malformed; otherwise the reader's
/// classified failures.
pub async fn read(_settings: &Config, query: &StateOutputsQuery) -> Result<StateOutputs> {
    check(validate(query))?;

    info!(
        state_path = %query.state_path,
        filter_name = ?query.filter_name,
        "reading state outputs"
    );

    let state = read_state(&query.state_path)?;
    let filter_name = query.filter_name.as_deref().filter(|name| !name.is_empty());
    let outputs = project_outputs(&state, filter_name);

    info!(state_path = %query.state_path, count = outputs.len(), "retrieved state outputs");

    Ok(StateOutputs {
        state_path: query.state_path.clone(),
        filter_name: query.filter_name.clone(),
        output_count: outputs.len(),
        outputs,
    })
}
