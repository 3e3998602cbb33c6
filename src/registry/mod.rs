//! Registry clients for Terraform-compatible and OpenTofu-compatible
//! module/provider registries.
//!
//! Both concrete clients implement the same [`RegistryClient`] contract and
//! differ only in base URL and minor response-shape nuances. A client is
//! constructed per query and dropped when the query completes, so no
//! connection outlives the call that opened it.

pub mod http;
pub mod models;
pub mod opentofu;
pub mod search;
pub mod terraform;

use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use models::{
    Module, ModuleDetails, ModuleVersion, Provider, ProviderDetails, ProviderPlatform,
    ProviderVersion,
};
pub use opentofu::OpenTofuRegistry;
pub use search::{merge_with_limit, SearchRecord};
pub use terraform::TerraformRegistry;

/// Which registry flavor to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Terraform-compatible registry (registry.terraform.io)
    #[default]
    Terraform,
    /// OpenTofu-compatible registry (registry.opentofu.org)
    OpenTofu,
}

impl RegistryKind {
    /// The registry name as used in configuration and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terraform => "terraform",
            Self::OpenTofu => "opentofu",
        }
    }

    /// Resolve a raw configuration value, defaulting to Terraform when the
    /// field is absent. Callers validate the raw string first; anything
    /// unrecognized that slips through also falls back to the default.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("opentofu") => Self::OpenTofu,
            _ => Self::Terraform,
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "terraform" => Ok(Self::Terraform),
            "opentofu" => Ok(Self::OpenTofu),
            other => Err(format!("unknown registry '{other}'")),
        }
    }
}

/// Contract shared by both registry flavors.
///
/// Listing operations return an empty vec when the module/provider is
/// unknown upstream (HTTP 404); callers translate that into a not-found
/// error carrying the composite identifier. Detail fetches surface 404 as a
/// domain not-found error directly. Any other transport failure is wrapped
/// as a `RegistryApi` error with the identifying context.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Which registry flavor this client talks to.
    fn kind(&self) -> RegistryKind;

    /// List all versions of a module, newest first.
    ///
    /// `module_id` is the composite "namespace/name/provider" identifier.
    async fn list_module_versions(&self, module_id: &str) -> Result<Vec<ModuleVersion>>;

    /// Fetch details for a specific module version.
    async fn get_module_details(
        &self,
        namespace: &str,
        name: &str,
        provider: &str,
        version: &str,
    ) -> Result<ModuleDetails>;

    /// List all versions of a provider, newest first.
    ///
    /// `provider_id` is the composite "namespace/name" identifier.
    async fn list_provider_versions(&self, provider_id: &str) -> Result<Vec<ProviderVersion>>;

    /// Fetch details for a provider.
    async fn get_provider_details(&self, namespace: &str, name: &str) -> Result<ProviderDetails>;

    /// Search modules by query, in upstream relevance order (no local
    /// re-sorting).
    async fn list_modules(&self, query: &str) -> Result<Vec<Module>>;

    /// Search providers by query, in upstream relevance order.
    async fn list_providers(&self, query: &str) -> Result<Vec<Provider>>;
}

/// Construct the client for the requested registry flavor.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the HTTP
/// client cannot be built.
pub fn client_for(kind: RegistryKind, config: &Config) -> Result<Box<dyn RegistryClient>> {
    match kind {
        RegistryKind::Terraform => Ok(Box::new(TerraformRegistry::new(
            &config.registry.terraform_url,
            config.registry.timeout_secs,
        )?)),
        RegistryKind::OpenTofu => Ok(Box::new(OpenTofuRegistry::new(
            &config.registry.opentofu_url,
            config.registry.timeout_secs,
        )?)),
    }
}

/// Compare two version strings, semver when both parse, falling back to a
/// plain string comparison otherwise.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (lenient_semver(a), lenient_semver(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        _ => a.cmp(b),
    }
}

fn lenient_semver(raw: &str) -> Option<semver::Version> {
    semver::Version::parse(raw.trim().trim_start_matches('v')).ok()
}

/// Sort a version listing newest-first. Registries are not consistent about
/// the order of their `versions` arrays, and the contract here is that the
/// first element is the latest release.
pub(crate) fn sort_newest_first<T>(items: &mut [T], version_of: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare_versions(version_of(b), version_of(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("1.2.3", "1.2.4", std::cmp::Ordering::Less; "patch bump")]
    #[test_case("2.0.0", "1.99.99", std::cmp::Ordering::Greater; "major wins")]
    #[test_case("v1.2.3", "1.2.3", std::cmp::Ordering::Equal; "v prefix is ignored")]
    #[test_case("0.10.0", "0.9.0", std::cmp::Ordering::Greater; "numeric not lexical")]
    fn compare_versions_orders_semantically(a: &str, b: &str, expected: std::cmp::Ordering) {
        assert_eq!(compare_versions(a, b), expected);
    }

    #[test]
    fn registry_kind_defaults_to_terraform() {
        assert_eq!(RegistryKind::parse_lenient(None), RegistryKind::Terraform);
        assert_eq!(
            RegistryKind::parse_lenient(Some("opentofu")),
            RegistryKind::OpenTofu
        );
        assert_eq!(RegistryKind::default(), RegistryKind::Terraform);
    }

    #[test]
    fn registry_kind_round_trips_through_from_str() {
        assert_eq!("terraform".parse::<RegistryKind>().unwrap(), RegistryKind::Terraform);
        assert_eq!("opentofu".parse::<RegistryKind>().unwrap(), RegistryKind::OpenTofu);
        assert!("pulumi".parse::<RegistryKind>().is_err());
    }

    #[test]
    fn sort_newest_first_orders_by_semver_not_lexically() {
        let mut versions = vec!["6.4.0", "6.10.0", "6.5.0"];
        sort_newest_first(&mut versions, |v| v);
        assert_eq!(versions, vec!["6.10.0", "6.5.0", "6.4.0"]);
    }

    #[test]
    fn sort_newest_first_tolerates_unparseable_versions() {
        let mut versions = vec!["abc", "6.5.0", "def"];
        sort_newest_first(&mut versions, |v| v);
        // Falls back to string comparison; must not panic
        assert_eq!(versions.len(), 3);
    }

    #[test]
    fn sort_newest_first_handles_v_prefix() {
        let mut versions = vec!["v1.2.0", "v1.10.0"];
        sort_newest_first(&mut versions, |v| v);
        assert_eq!(versions[0], "v1.10.0");
    }
}
