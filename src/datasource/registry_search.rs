//! Combined provider and module search against a registry.

use crate::config::Config;
use crate::datasource::{check, check_limit, check_registry, require};
use crate::error::Result;
use crate::registry::{client_for, merge_with_limit, RegistryKind, SearchRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fallback result cap when the query does not set one.
pub const DEFAULT_LIMIT: usize = 50;

/// Query for [`read`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrySearchQuery {
    /// Search query string
    pub query: String,

    /// Registry to search; defaults to "terraform"
    #[serde(default)]
    pub registry: Option<String>,

    /// Which result kinds to fetch: "all", "providers" or "modules";
    /// defaults to "all"
    #[serde(default)]
    pub resource_type: Option<String>,

    /// Maximum number of results, default 50, max 100
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Combined search results: providers first, then modules, hard-truncated
/// to the limit. The per-kind counts are taken after truncation, so if
/// providers alone fill the limit no module appears even though modules
/// were requested.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySearch {
    /// Search query (echoes the query)
    pub query: String,

    /// Registry that was searched, after defaulting
    pub registry: String,

    /// Result kind filter that was applied, after defaulting
    pub resource_type: String,

    /// Result cap that was applied
    pub limit: usize,

    /// Total number of results returned
    pub result_count: usize,

    /// Number of provider results in the final listing
    pub provider_count: usize,

    /// Number of module results in the final listing
    pub module_count: usize,

    /// Merged provider and module records
    pub results: Vec<SearchRecord>,
}

/// Validate the query, collecting every violation.
#[must_use]
pub fn validate(query: &RegistrySearchQuery) -> Vec<String> {
    let mut errors = Vec::new();
    require(&mut errors, "query", &query.query);
    check_registry(&mut errors, query.registry.as_deref());
    if let Some(resource_type) = query.resource_type.as_deref() {
        if !resource_type.is_empty()
            && !matches!(resource_type, "all" | "providers" | "modules")
        {
            errors.push("'resource_type' must be 'all', 'providers', or 'modules'.".to_string());
        }
    }
    check_limit(&mut errors, query.limit);
    errors
}

/// Search providers and modules in one pass. When both kinds are wanted
/// the two upstream searches run concurrently.
///
/// # Errors
///
/// `Validation` when the query is malformed, `RegistryApi` on upstream
/// failure.
pub async fn read(settings: &Config, query: &RegistrySearchQuery) -> Result<RegistrySearch> {
    check(validate(query))?;

    let kind = RegistryKind::parse_lenient(query.registry.as_deref());
    let client = client_for(kind, settings)?;
    let resource_type = match query.resource_type.as_deref() {
        Some(value) if !value.is_empty() => value,
        _ => "all",
    };
    let limit = query.limit.map_or(DEFAULT_LIMIT, |limit| limit as usize);

    info!(
        query = %query.query,
        registry = %kind,
        resource_type,
        limit,
        "searching registry"
    );

    let (providers, modules) = match resource_type {
        "providers" => (client.list_providers(&query.query).await?, Vec::new()),
        "modules" => (Vec::new(), client.list_modules(&query.query).await?),
        _ => {
            futures::future::try_join(
                client.list_providers(&query.query),
                client.list_modules(&query.query),
            )
            .await?
        }
    };

    let results = merge_with_limit(&providers, &modules, limit);
    let provider_count = results.iter().filter(|r| r.record_type == "provider").count();
    let module_count = results.len() - provider_count;

    info!(
        query = %query.query,
        total_count = results.len(),
        provider_count,
        module_count,
        "retrieved registry search results"
    );

    Ok(RegistrySearch {
        query: query.query.clone(),
        registry: kind.as_str().to_string(),
        resource_type: resource_type.to_string(),
        limit,
        result_count: results.len(),
        provider_count,
        module_count,
        results,
    })
}
