//! Full version history of a provider.

use crate::config::Config;
use crate::datasource::{check, check_registry, require};
use crate::error::Result;
use crate::registry::{client_for, ProviderVersion, RegistryKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderVersionsQuery {
    /// Provider namespace
    pub namespace: String,

    /// Provider name
    pub name: String,

    /// Registry to query; defaults to "terraform"
    #[serde(default)]
    pub registry: Option<String>,
}

/// All known versions of a provider, newest first. Each entry carries the
/// supported plugin protocol versions and the platforms it is built for.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderVersions {
    /// Provider namespace (echoes the query)
    pub namespace: String,

    /// Provider name (echoes the query)
    pub name: String,

    /// Registry that was queried, after defaulting
    pub registry: String,

    /// Number of versions available
    pub version_count: usize,

    /// Version entries, newest first
    pub versions: Vec<ProviderVersion>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &ProviderVersionsQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "namespace", &query.namespace);
    require(&mut errors, "name", &query.name);
    check_registry(&mut errors, query.registry.as_deref());
    errors
}

/// List all versions of a provider. An unknown provider yields an empty
/// listing with `version_count` zero rather than an error.
///
/// # Errors
///
/// `Validation` when the query is malformed, `RegistryApi` on upstream
/// failure.
pub async fn read(settings: &Config, query: &ProviderVersionsQuery) -> Result<ProviderVersions> {
    check(validate(query))?;

    let kind = RegistryKind::parse_lenient(query.registry.as_deref());
    let client = client_for(kind, settings)?;
    let provider_id = format!("{}/{}", query.namespace, query.name);

    info!(provider_id = %provider_id, registry = %kind, "querying provider versions");

    let versions = client.list_provider_versions(&provider_id).await?;

    info!(provider_id = %provider_id, count = versions.len(), "retrieved provider versions");

    Ok(ProviderVersions {
        namespace: query.namespace.clone(),
        name: query.name.clone(),
        registry: kind.as_str().to_string(),
        version_count: versions.len(),
        versions,
    })
}
