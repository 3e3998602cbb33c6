//! Latest-version details for a single module.

use crate::config::Config;
use crate::datasource::{check, check_registry, require};
use crate::error::Result;
use crate::registry::{client_for, RegistryKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleInfoQuery {
    /// Module namespace (e.g., "terraform-aws-modules")
    pub namespace: String,

    /// Module name (e.g., "vpc")
    pub name: String,

    /// Target provider (e.g., "aws")
    pub target_provider: String,

    /// Registry to query, "terraform" or "opentofu"; defaults to "terraform"
    #[serde(default)]
    pub registry: Option<String>,
}

/// Details of the latest version of a module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    /// Module namespace (echoes the query)
    pub namespace: String,

    /// Module name (echoes the query)
    pub name: String,

    /// Target provider (echoes the query)
    pub target_provider: String,

    /// Registry that was queried, after defaulting
    pub registry: String,

    /// Latest version string
    pub version: Option<String>,

    /// Module description
    pub description: Option<String>,

    /// Source repository URL
    pub source_url: Option<String>,

    /// Total download count
    pub downloads: Option<u64>,

    /// Whether the module is verified
    pub verified: Option<bool>,

    /// Publication date, ISO 8601
    pub published_at: Option<String>,

    /// Module owner/maintainer username
    pub owner: Option<String>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &ModuleInfoQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "namespace", &query.namespace);
    require(&mut errors, "name", &query.name);
    require(&mut errors, "target_provider", &query.target_provider);
    check_registry(&mut errors, query.registry.as_deref());
    errors
}

/// Fetch the latest-version details of a module.
///
/// The newest version is resolved first via the version listing, then the
/// detail endpoint is asked for that specific version. An empty version
/// listing means the module does not exist.
///
/// # Errors
///
/// `Validation` when the query is malformed, `ModuleNotFound` when the
/// registry has no versions for the module, `RegistryApi` on any upstream
/// failure.
pub async fn read(settings: &Config, query: &ModuleInfoQuery) -> Result<ModuleInfo> {
    check(validate(query))?;

    let kind = RegistryKind::parse_lenient(query.registry.as_deref());
    let client = client_for(kind, settings)?;
    let module_id = format!(
        "{}/{}/{}",
        query.namespace, query.name, query.target_provider
    );

    info!(module_id = %module_id, registry = %kind, "querying module info");

    let versions = client.list_module_versions(&module_id).await?;
    let latest = versions.first().ok_or_else(|| {
        crate::err!(ModuleNotFound {
            module_id: module_id.clone(),
            registry: kind.as_str().to_string(),
        })
    })?;

    let details = client
        .get_module_details(
            &query.namespace,
            &query.name,
            &query.target_provider,
            &latest.version,
        )
        .await?;

    info!(
        module_id = %module_id,
        version = %latest.version,
        "retrieved module info"
    );

    Ok(ModuleInfo {
        namespace: query.namespace.clone(),
        name: query.name.clone(),
        target_provider: query.target_provider.clone(),
        registry: kind.as_str().to_string(),
        version: details.version.or_else(|| Some(latest.version.clone())),
        description: details.description,
        source_url: details.source_url,
        downloads: details.downloads,
        verified: details.verified,
        published_at: details.published_at.map(|at| at.to_rfc3339()),
        owner: details.owner,
    })
}
