//! Query operations over registries and local state files.
//!
//! Each submodule exposes one operation as a plain async function plus a
//! query struct and a result struct. The shape is the same everywhere:
//! validate the query, call the registry client or state reader, project
//! the raw data into the result record. Validation collects every
//! violation before failing so a caller can fix all of them in one pass.
//!
//! Operations are stateless and idempotent. Nothing is cached between
//! calls; every invocation re-fetches or re-reads from source.

pub mod module_info;
pub mod module_search;
pub mod module_versions;
pub mod provider_info;
pub mod provider_versions;
pub mod registry_search;
pub mod state_info;
pub mod state_outputs;
pub mod state_resources;

use crate::error::Result;

pub use module_info::ModuleInfo;
pub use module_search::ModuleSearch;
pub use module_versions::ModuleVersions;
pub use provider_info::ProviderInfo;
pub use provider_versions::ProviderVersions;
pub use registry_search::RegistrySearch;
pub use state_info::StateInfo;
pub use state_outputs::StateOutputs;
pub use state_resources::StateResources;

/// Turn a batch of validation messages into a `Validation` error, or pass
/// when the batch is empty.
pub(crate) fn check(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::err!(Validation { errors: errors }))
    }
}

pub(crate) fn require(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(format!("'{field}' is required and cannot be empty."));
    }
}

pub(crate) fn check_registry(errors: &mut Vec<String>, registry: Option<&str>) {
    if let Some(registry) = registry {
        if !registry.is_empty() && registry != "terraform" && registry != "opentofu" {
            errors.push("'registry' must be either 'terraform' or 'opentofu'.".to_string());
        }
    }
}

pub(crate) fn check_limit(errors: &mut Vec<String>, limit: Option<i64>) {
    if let Some(limit) = limit {
        if limit <= 0 {
            errors.push("'limit' must be a positive integer.".to_string());
        }
        if limit > 100 {
            errors.push("'limit' must not exceed 100.".to_string());
        }
    }
}
