//! Details for a single provider.
//!
//! Namespace conventions differ between registries: the Terraform registry
//! hosts providers under their original namespaces (hashicorp/aws), while
//! the OpenTofu registry hosts forks under the "opentofu" namespace
//! (opentofu/aws). The same namespace string means different things in the
//! two registries; callers pick the right one.

use crate::config::Config;
use crate::datasource::{check, check_registry, require};
use crate::error::Result;
use crate::registry::{client_for, RegistryKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderInfoQuery {
    /// Provider namespace (e.g., "hashicorp")
    pub namespace: String,

    /// Provider name (e.g., "aws")
    pub name: String,

    /// Registry to query; defaults to "terraform"
    #[serde(default)]
    pub registry: Option<String>,
}

/// Details of a provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    /// Provider namespace (echoes the query)
    pub namespace: String,

    /// Provider name (echoes the query)
    pub name: String,

    /// Registry that was queried, after defaulting
    pub registry: String,

    /// Latest version string
    pub latest_version: Option<String>,

    /// Provider description
    pub description: Option<String>,

    /// Source repository URL
    pub source_url: Option<String>,

    /// Total download count
    pub downloads: Option<u64>,

    /// Publication date of the latest version, ISO 8601
    pub published_at: Option<String>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &ProviderInfoQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "namespace", &query.namespace);
    require(&mut errors, "name", &query.name);
    check_registry(&mut errors, query.registry.as_deref());
    errors
}

/// Fetch details for a provider.
///
/// # Errors
///
/// `Validation` when the query is malformed, `ProviderNotFound` when the
/// registry does not know the provider, `RegistryApi` on upstream failure.
pub async fn read(settings: &Config, query: &ProviderInfoQuery) -> Result<ProviderInfo> {
    check(validate(query))?;

    let kind = RegistryKind::parse_lenient(query.registry.as_deref());
    let client = client_for(kind, settings)?;

    info!(
        namespace = %query.namespace,
        name = %query.name,
        registry = %kind,
        "querying provider info"
    );

    let details = client
        .get_provider_details(&query.namespace, &query.name)
        .await?;

    Ok(ProviderInfo {
        namespace: query.namespace.clone(),
        name: query.name.clone(),
        registry: kind.as_str().to_string(),
        latest_version: details.version,
        description: details.description,
        source_url: details.source_url,
        downloads: details.downloads,
        published_at: details.published_at.map(|at| at.to_rfc3339()),
    })
}
