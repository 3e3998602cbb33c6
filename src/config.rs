//! Configuration module for TofuLens.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`tofulens.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # tofulens.yaml
//!
//! # Registry endpoints
//! registry:
//!   terraform_url: "https://registry.terraform.io"
//!   opentofu_url: "https://registry.opentofu.org"
//!   timeout_secs: 30
//!
//! # Cache options (accepted for forward compatibility; no cache is
//! # implemented; every query re-fetches from source)
//! cache:
//!   cache_dir: /tmp/tofulens-cache
//!   cache_ttl_hours: 24
//!
//! # Output options
//! output:
//!   pretty: true
//!
//! # Log level (RUST_LOG and -v/-q take precedence)
//! log_level: info
//! ```

use crate::error::{Result, TofuLensError};
use serde::{Deserialize, Serialize};

/// Default Terraform-compatible registry base URL.
pub const TERRAFORM_REGISTRY_URL: &str = "https://registry.terraform.io";

/// Default OpenTofu-compatible registry base URL.
pub const OPENTOFU_REGISTRY_URL: &str = "https://registry.opentofu.org";

/// Registry endpoint options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Terraform registry base URL.
    #[serde(default = "default_terraform_url")]
    pub terraform_url: String,

    /// OpenTofu registry base URL.
    #[serde(default = "default_opentofu_url")]
    pub opentofu_url: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            terraform_url: default_terraform_url(),
            opentofu_url: default_opentofu_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cache options.
///
/// These fields are accepted so existing configuration files keep loading,
/// but no cache exists: every query re-reads and re-derives from source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Directory path for cached registry responses.
    pub cache_dir: Option<String>,

    /// Cache time-to-live in hours.
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            cache_dir: None,
            cache_ttl_hours: default_cache_ttl_hours(),
        }
    }
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Registry endpoint options
    pub registry: RegistryOptions,

    /// Cache options (accepted but unused)
    pub cache: CacheOptions,

    /// Output options
    pub output: OutputOptions,

    /// Log level for the CLI ("error", "warn", "info", "debug", "trace").
    /// `RUST_LOG` and the `-v`/`-q` flags take precedence.
    pub log_level: Option<String>,
}

fn default_terraform_url() -> String {
    TERRAFORM_REGISTRY_URL.to_string()
}

fn default_opentofu_url() -> String {
    OPENTOFU_REGISTRY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");

        let config: Config = serde_yaml::from_str(content).map_err(|e| {
            TofuLensError::config_parse(e.to_string(), None, file!(), line!())
        })?;

        tracing::debug!(
            terraform_url = %config.registry.terraform_url,
            opentofu_url = %config.registry.opentofu_url,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TofuLensError::io(path, e, file!(), line!()))?;
        Self::from_yaml(&content)
    }

    /// Overlay registry URLs from environment variables
    /// (`TOFULENS_TERRAFORM_REGISTRY_URL`, `TOFULENS_OPENTOFU_REGISTRY_URL`).
    pub fn load_registry_urls_from_env(&mut self) {
        if let Ok(url) = std::env::var("TOFULENS_TERRAFORM_REGISTRY_URL") {
            if !url.is_empty() {
                tracing::debug!("Loaded Terraform registry URL from environment");
                self.registry.terraform_url = url;
            }
        }
        if let Ok(url) = std::env::var("TOFULENS_OPENTOFU_REGISTRY_URL") {
            if !url.is_empty() {
                tracing::debug!("Loaded OpenTofu registry URL from environment");
                self.registry.opentofu_url = url;
            }
        }
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# TofuLens Configuration File

# Registry endpoints
registry:
  # Terraform-compatible registry base URL
  terraform_url: "https://registry.terraform.io"

  # OpenTofu-compatible registry base URL
  opentofu_url: "https://registry.opentofu.org"

  # HTTP request timeout in seconds
  timeout_secs: 30

# Cache options (accepted for forward compatibility; queries always
# re-fetch from source)
cache:
  # cache_dir: /tmp/tofulens-cache
  cache_ttl_hours: 24

# Output options
output:
  # Pretty-print JSON output
  pretty: true

# Log level: error, warn, info, debug, trace
# (RUST_LOG and the -v/-q flags take precedence)
# log_level: info
"#
        .to_string()
    }
}
