//! Summary metadata for a local state file.

use crate::config::Config;
use crate::datasource::{check, require};
use crate::error::Result;
use crate::state::{count_by_mode, count_unique_modules, read_state_file};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateInfoQuery {
    /// Path to the state file; absolute, relative and `~` paths work
    pub state_path: String,
}

/// Summary of a state file: format metadata, aggregate counts and
/// filesystem facts. All counts are zero for an empty state.
///
/// `resources_count` may exceed `managed_resources_count +
/// data_resources_count` when resources carry an unrecognized mode.
#[derive(Debug, Clone, Serialize)]
pub struct StateInfo {
    /// State file path (echoes the query)
    pub state_path: String,

    /// State format version (typically 4)
    pub version: Option<i64>,

    /// Terraform/OpenTofu version that wrote the state
    pub terraform_version: Option<String>,

    /// State serial number
    pub serial: Option<i64>,

    /// Lineage UUID
    pub lineage: Option<String>,

    /// Total number of resources
    pub resources_count: usize,

    /// Number of outputs
    pub outputs_count: usize,

    /// Number of managed resources
    pub managed_resources_count: usize,

    /// Number of data resources
    pub data_resources_count: usize,

    /// Number of distinct module paths
    pub modules_count: usize,

    /// State file size in bytes
    pub state_file_size: u64,

    /// State file modification time, ISO 8601
    pub state_file_modified: Option<String>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &StateInfoQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "state_path", &query.state_path);
    errors
}

/// Read and summarize a state file.
///
/// # Errors
///
/// `Validation` when the query is malformed; otherwise the reader's
/// classified failures: `StateFileNotFound`, `NotAFile`,
/// `PermissionDenied` or `StateParse`.
pub async fn read(_settings: &Config, query: &StateInfoQuery) -> Result<StateInfo> {
    check(validate(query))?;

    info!(state_path = %query.state_path, "reading state info");

    let file = read_state_file(&query.state_path)?;
    let state = &file.document;
    let modes = count_by_mode(state);

    Ok(StateInfo {
        state_path: query.state_path.clone(),
        version: state.version,
        terraform_version: state.terraform_version.clone(),
        serial: state.serial,
        lineage: state.lineage.clone(),
        resources_count: state.resources.len(),
        outputs_count: state.outputs.len(),
        managed_resources_count: modes.managed,
        data_resources_count: modes.data,
        modules_count: count_unique_modules(state),
        state_file_size: file.size_bytes,
        state_file_modified: file.modified.map(|at| at.to_rfc3339()),
    })
}
