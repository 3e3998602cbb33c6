//! Full version history of a module.

use crate::config::Config;
use crate::datasource::{check, check_registry, require};
use crate::error::Result;
use crate::registry::{client_for, ModuleVersion, RegistryKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleVersionsQuery {
    /// Module namespace
    pub namespace: String,

    /// Module name
    pub name: String,

    /// Target provider
    pub target_provider: String,

    /// Registry to query; defaults to "terraform"
    #[serde(default)]
    pub registry: Option<String>,
}

/// One entry of the version listing. Versions carry rich metadata beyond
/// the version number: README content, input/output variable definitions
/// and resource usage, whenever the registry provides them.
#[derive(Debug, Clone, Serialize)]
pub struct VersionEntry {
    /// Version string (e.g., "6.5.0")
    pub version: String,

    /// Publication date, ISO 8601, when known
    pub published_at: Option<String>,

    /// Module README content, when known
    pub readme_content: Option<String>,

    /// Input variable definitions
    pub inputs: Vec<serde_json::Value>,

    /// Output variable definitions
    pub outputs: Vec<serde_json::Value>,

    /// Resource usage entries
    pub resources: Vec<serde_json::Value>,
}

impl From<ModuleVersion> for VersionEntry {
    fn from(version: ModuleVersion) -> Self {
        Self {
            version: version.version,
            published_at: version.published_at.map(|at| at.to_rfc3339()),
            readme_content: version.readme_content,
            inputs: version.root.inputs,
            outputs: version.root.outputs,
            resources: version.root.resources,
        }
    }
}

/// All known versions of a module, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleVersions {
    /// Module namespace (echoes the query)
    pub namespace: String,

    /// Module name (echoes the query)
    pub name: String,

    /// Target provider (echoes the query)
    pub target_provider: String,

    /// Registry that was queried, after defaulting
    pub registry: String,

    /// Number of versions available
    pub version_count: usize,

    /// Version entries, newest first
    pub versions: Vec<VersionEntry>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &ModuleVersionsQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "namespace", &query.namespace);
    require(&mut errors, "name", &query.name);
    require(&mut errors, "target_provider", &query.target_provider);
    check_registry(&mut errors, query.registry.as_deref());
    errors
}

/// List all versions of a module. An unknown module yields an empty
/// listing with `version_count` zero rather than an error.
///
/// # Errors
///
/// `Validation` when the query is malformed, `RegistryApi` on upstream
/// failure.
pub async fn read(settings: &Config, query: &ModuleVersionsQuery) -> Result<ModuleVersions> {
    check(validate(query))?;

    let kind = RegistryKind::parse_lenient(query.registry.as_deref());
    let client = client_for(kind, settings)?;
    let module_id = format!(
        "{}/{}/{}",
        query.namespace, query.name, query.target_provider
    );

    info!(module_id = %module_id, registry = %kind, "querying module versions");

    let versions: Vec<VersionEntry> = client
        .list_module_versions(&module_id)
        .await?
        .into_iter()
        .map(VersionEntry::from)
        .collect();

    info!(module_id = %module_id, count = versions.len(), "retrieved module versions");

    Ok(ModuleVersions {
        namespace: query.namespace.clone(),
        name: query.name.clone(),
        target_provider: query.target_provider.clone(),
        registry: kind.as_str().to_string(),
        version_count: versions.len(),
        versions,
    })
}
