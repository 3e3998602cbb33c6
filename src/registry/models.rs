//! Registry domain objects.
//!
//! These types mirror the module/provider shapes returned by
//! Terraform-compatible and OpenTofu-compatible registry APIs. They are
//! owned by a registry client for the duration of a single query and are
//! never cached: every query re-fetches from source.
//!
//! Every field read from an untrusted registry response has an explicit
//! default policy (`Option` or `#[serde(default)]`) rather than relying on
//! implicit absence handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A module as returned by registry listing/search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Registry-assigned module ID (usually "namespace/name/provider/version")
    #[serde(default)]
    pub id: String,

    /// Module namespace (e.g., "terraform-aws-modules")
    #[serde(default)]
    pub namespace: String,

    /// Module name (e.g., "vpc")
    #[serde(default)]
    pub name: String,

    /// Target provider name (e.g., "aws")
    #[serde(rename = "provider", default)]
    pub provider_name: String,

    /// Module description
    #[serde(default)]
    pub description: Option<String>,

    /// Source repository URL
    #[serde(rename = "source", default)]
    pub source_url: Option<String>,

    /// Total download count
    #[serde(default)]
    pub downloads: u64,

    /// Whether the module is verified by the registry
    #[serde(default)]
    pub verified: bool,

    /// Latest version string, when the endpoint includes one
    #[serde(rename = "version", default)]
    pub latest_version: Option<String>,
}

/// A single version of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleVersion {
    /// Version string (e.g., "6.5.0")
    pub version: String,

    /// Publication timestamp, when the registry provides one
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// README content, when the registry provides it
    #[serde(rename = "readme", default)]
    pub readme_content: Option<String>,

    /// Root-module metadata (inputs/outputs/resources)
    #[serde(default)]
    pub root: ModuleVersionRoot,
}

/// Input/output/resource metadata for a module version's root module.
///
/// The registry returns these as loosely structured objects; they are kept
/// as raw JSON values and passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleVersionRoot {
    /// Input variable definitions
    #[serde(default)]
    pub inputs: Vec<serde_json::Value>,

    /// Output variable definitions
    #[serde(default)]
    pub outputs: Vec<serde_json::Value>,

    /// Resource usage entries
    #[serde(default)]
    pub resources: Vec<serde_json::Value>,
}

/// Detail response for a specific module version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleDetails {
    /// Version string
    #[serde(default)]
    pub version: Option<String>,

    /// Module description
    #[serde(default)]
    pub description: Option<String>,

    /// Source repository URL
    #[serde(rename = "source", default)]
    pub source_url: Option<String>,

    /// Total download count
    #[serde(default)]
    pub downloads: Option<u64>,

    /// Whether the module is verified
    #[serde(default)]
    pub verified: Option<bool>,

    /// Publication timestamp
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Module owner/maintainer username
    #[serde(default)]
    pub owner: Option<String>,
}

/// A provider as returned by registry listing/search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    /// Registry-assigned provider ID
    #[serde(default)]
    pub id: String,

    /// Provider namespace (meaning differs between the two registries:
    /// Terraform hosts original namespaces, OpenTofu hosts forks under
    /// "opentofu"; a caller concern, not validated here)
    #[serde(default)]
    pub namespace: String,

    /// Provider name (e.g., "aws")
    #[serde(default)]
    pub name: String,

    /// Provider description
    #[serde(default)]
    pub description: Option<String>,

    /// Source repository URL
    #[serde(rename = "source", default)]
    pub source_url: Option<String>,

    /// Provider tier (e.g., "official", "partner", "community")
    #[serde(default)]
    pub tier: Option<String>,

    /// Latest version string, when the endpoint includes one
    #[serde(rename = "version", default)]
    pub latest_version: Option<String>,
}

/// A single version of a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderVersion {
    /// Version string (e.g., "6.8.0")
    pub version: String,

    /// Supported plugin protocol versions (e.g., ["5.0", "6.0"])
    #[serde(default)]
    pub protocols: Vec<String>,

    /// Platforms this version is built for
    #[serde(default)]
    pub platforms: Vec<ProviderPlatform>,
}

/// An OS/architecture pair a provider version supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderPlatform {
    /// Operating system (e.g., "linux", "darwin", "windows")
    #[serde(default)]
    pub os: String,

    /// Architecture (e.g., "amd64", "arm64")
    #[serde(default)]
    pub arch: String,
}

/// Detail response for a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderDetails {
    /// Latest version string
    #[serde(default)]
    pub version: Option<String>,

    /// Provider description
    #[serde(default)]
    pub description: Option<String>,

    /// Source repository URL
    #[serde(rename = "source", default)]
    pub source_url: Option<String>,

    /// Total download count
    #[serde(default)]
    pub downloads: Option<u64>,

    /// Publication timestamp of the latest version
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// Provider tier
    #[serde(default)]
    pub tier: Option<String>,
}
