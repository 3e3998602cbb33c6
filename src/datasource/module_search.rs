//! Module search against a registry.

use crate::config::Config;
use crate::datasource::{check, check_limit, check_registry, require};
use crate::error::Result;
use crate::registry::{client_for, Module, RegistryKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fallback result cap when the query does not set one.
pub const DEFAULT_LIMIT: usize = 20;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleSearchQuery {
    /// Search query string (e.g., "vpc", "database")
    pub query: String,

    /// Registry to search; defaults to "terraform"
    #[serde(default)]
    pub registry: Option<String>,

    /// Maximum number of results, default 20, max 100
    #[serde(default)]
    pub limit: Option<i64>,
}

/// One module hit.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRecord {
    /// Module ID ("namespace/name/provider")
    pub id: String,

    /// Module namespace
    pub namespace: String,

    /// Module name
    pub name: String,

    /// Target provider name
    pub provider_name: String,

    /// Module description, when known
    pub description: Option<String>,

    /// Source repository URL, when known
    pub source_url: Option<String>,

    /// Total download count
    pub downloads: u64,

    /// Whether the module is verified by the registry
    pub verified: bool,
}

impl From<Module> for ModuleRecord {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            namespace: module.namespace,
            name: module.name,
            provider_name: module.provider_name,
            description: module.description,
            source_url: module.source_url,
            downloads: module.downloads,
            verified: module.verified,
        }
    }
}

/// Module search results, in upstream relevance order.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSearch {
    /// Search query (echoes the query)
    pub query: String,

    /// Registry that was searched, after defaulting
    pub registry: String,

    /// Result cap that was applied
    pub limit: usize,

    /// Number of modules returned
    pub result_count: usize,

    /// Module hits, truncated to `limit`
    pub results: Vec<ModuleRecord>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &ModuleSearchQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "query", &query.query);
    check_registry(&mut errors, query.registry.as_deref());
    check_limit(&mut errors, query.limit);
    errors
}

/// Search for modules. Upstream relevance order is preserved; the listing
/// is truncated to the limit after the fact.
///
/// # Errors
///
/// `Validation` when the query is malformed, `RegistryApi` on upstream
/// failure.
pub async fn read(settings: &Config, query: &ModuleSearchQuery) -> Result<ModuleSearch> {
    check(validate(query))?;

    let kind = RegistryKind::parse_lenient(query.registry.as_deref());
    let client = client_for(kind, settings)?;
    let limit = query.limit.map_or(DEFAULT_LIMIT, |limit| limit as usize);

    info!(query = %query.query, registry = %kind, limit, "searching modules");

    let results: Vec<ModuleRecord> = client
        .list_modules(&query.query)
        .await?
        .into_iter()
        .take(limit)
        .map(ModuleRecord::from)
        .collect();

    info!(query = %query.query, count = results.len(), "retrieved module search results");

    Ok(ModuleSearch {
        query: query.query.clone(),
        registry: kind.as_str().to_string(),
        limit,
        result_count: results.len(),
        results,
    })
}
