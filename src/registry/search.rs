//! Registry result projection.
//!
//! Converts registry domain objects into flat, type-tagged records so
//! heterogeneous result sets (providers + modules) can be merged into one
//! ordered sequence and truncated to a result limit.

use crate::registry::models::{Module, Provider};
use serde::Serialize;

/// A flat search result record, tagged with its resource type.
///
/// Fields that don't apply to one variant are `None` (providers have no
/// `provider_name`/`verified`; modules have no `tier`). Provider download
/// counts are reported as 0 because the search endpoints don't carry them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRecord {
    /// "module" or "provider"
    #[serde(rename = "type")]
    pub record_type: String,

    /// Registry-assigned resource ID
    pub id: String,

    /// Resource namespace
    pub namespace: String,

    /// Resource name
    pub name: String,

    /// Target provider name (modules only)
    pub provider_name: Option<String>,

    /// Description (may be absent upstream)
    pub description: Option<String>,

    /// Source repository URL (may be absent upstream)
    pub source_url: Option<String>,

    /// Download count (modules only; 0 for providers)
    pub downloads: u64,

    /// Verification status (modules only)
    pub verified: Option<bool>,

    /// Provider tier (providers only)
    pub tier: Option<String>,
}

impl From<&Module> for SearchRecord {
    fn from(module: &Module) -> Self {
        Self {
            record_type: "module".to_string(),
            id: module.id.clone(),
            namespace: module.namespace.clone(),
            name: module.name.clone(),
            provider_name: Some(module.provider_name.clone()),
            description: module.description.clone(),
            source_url: module.source_url.clone(),
            downloads: module.downloads,
            verified: Some(module.verified),
            tier: None,
        }
    }
}

impl From<&Provider> for SearchRecord {
    fn from(provider: &Provider) -> Self {
        Self {
            record_type: "provider".to_string(),
            id: provider.id.clone(),
            namespace: provider.namespace.clone(),
            name: provider.name.clone(),
            provider_name: None,
            description: provider.description.clone(),
            source_url: provider.source_url.clone(),
            downloads: 0,
            verified: None,
            tier: provider.tier.clone(),
        }
    }
}

/// Merge provider and module results into one sequence, providers first
/// and modules after, and truncate the concatenation to at most `limit`
/// entries.
///
/// The limit is a hard truncation, not a pre-filter: when providers alone
/// reach the limit, no module records appear even though modules were
/// requested.
#[must_use]
pub fn merge_with_limit(
    providers: &[Provider],
    modules: &[Module],
    limit: usize,
) -> Vec<SearchRecord> {
    providers
        .iter()
        .map(SearchRecord::from)
        .chain(modules.iter().map(SearchRecord::from))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(namespace: &str, name: &str) -> Module {
        Module {
            id: format!("{namespace}/{name}/aws/1.0.0"),
            namespace: namespace.to_string(),
            name: name.to_string(),
            provider_name: "aws".to_string(),
            description: None,
            source_url: None,
            downloads: 42,
            verified: true,
            latest_version: Some("1.0.0".to_string()),
        }
    }

    fn provider(namespace: &str, name: &str) -> Provider {
        Provider {
            id: format!("{namespace}/{name}"),
            namespace: namespace.to_string(),
            name: name.to_string(),
            description: Some("a provider".to_string()),
            source_url: None,
            tier: Some("official".to_string()),
            latest_version: None,
        }
    }

    #[test]
    fn module_record_nulls_provider_only_fields() {
        let record = SearchRecord::from(&module("acme", "vpc"));
        assert_eq!(record.record_type, "module");
        assert_eq!(record.provider_name.as_deref(), Some("aws"));
        assert_eq!(record.verified, Some(true));
        assert_eq!(record.downloads, 42);
        assert!(record.tier.is_none());
    }

    #[test]
    fn provider_record_nulls_module_only_fields() {
        let record = SearchRecord::from(&provider("hashicorp", "aws"));
        assert_eq!(record.record_type, "provider");
        assert!(record.provider_name.is_none());
        assert!(record.verified.is_none());
        assert_eq!(record.downloads, 0);
        assert_eq!(record.tier.as_deref(), Some("official"));
    }

    #[test]
    fn merge_keeps_providers_before_modules() {
        let providers = vec![provider("hashicorp", "aws")];
        let modules = vec![module("acme", "vpc")];
        let merged = merge_with_limit(&providers, &modules, 10);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].record_type, "provider");
        assert_eq!(merged[1].record_type, "module");
    }

    #[test]
    fn limit_truncates_the_concatenation_exactly() {
        let providers = vec![provider("a", "p1"), provider("b", "p2")];
        let modules = vec![module("c", "m1"), module("d", "m2"), module("e", "m3")];

        let merged = merge_with_limit(&providers, &modules, 3);
        assert_eq!(merged.len(), 3);
        // Order-preserving: the first k of the concatenation, exactly
        assert_eq!(merged[0].name, "p1");
        assert_eq!(merged[1].name, "p2");
        assert_eq!(merged[2].name, "m1");
    }

    #[test]
    fn providers_can_crowd_out_modules_entirely() {
        let providers: Vec<Provider> = (0..5).map(|i| provider("ns", &format!("p{i}"))).collect();
        let modules = vec![module("acme", "vpc")];

        let merged = merge_with_limit(&providers, &modules, 4);
        assert_eq!(merged.len(), 4);
        assert!(merged.iter().all(|r| r.record_type == "provider"));
    }

    #[test]
    fn limit_larger_than_results_returns_everything() {
        let providers = vec![provider("hashicorp", "aws")];
        let merged = merge_with_limit(&providers, &[], 100);
        assert_eq!(merged.len(), 1);
    }
}
