//! Error types for TofuLens.
//!
//! This module defines the error hierarchy using `thiserror`. All errors
//! include context (paths, registry identifiers, queries) and can be
//! propagated using the `?` operator.
//!
//! # Error Categories
//!
//! - **State file errors**: missing file, wrong file type, permissions,
//!   malformed JSON
//! - **Registry errors**: module/provider not found, upstream HTTP failures
//! - **Validation errors**: all configuration violations collected into one
//!   batch, never just the first
//! - **Config errors**: invalid configuration files

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(StateFileNotFound { path: path.into() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::TofuLensError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for TofuLens operations.
pub type Result<T> = std::result::Result<T, TofuLensError>;

/// The main error type for TofuLens.
///
/// Covers every failure mode of registry queries and state file inspection.
/// Each named condition is distinct so callers never have to conflate, say,
/// a missing state file with an unreadable one.
#[derive(Error, Debug)]
pub enum TofuLensError {
    // =========================================================================
    // I/O and State File Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// State file does not exist.
    #[error("State file not found: {path} ({src_path}:{src_line})")]
    StateFileNotFound {
        /// The missing state file path, as the caller supplied it
        path: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Path exists but is not a regular file (e.g., a directory).
    #[error("Path is not a file: {path} ({src_path}:{src_line})")]
    NotAFile {
        /// The offending path
        path: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// State file exists but cannot be read.
    #[error("Permission denied reading state file: {path} ({src_path}:{src_line})")]
    PermissionDenied {
        /// The path that couldn't be read
        path: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// State file content is not well-formed JSON.
    #[error("Invalid JSON in state file '{path}' ({src_path}:{src_line}): {message}")]
    StateParse {
        /// The state file path
        path: String,
        /// The underlying parse error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Registry Errors
    // =========================================================================
    /// Module not found in the registry.
    #[error("Module {module_id} not found in {registry} registry ({src_path}:{src_line})")]
    ModuleNotFound {
        /// Composite module identifier (namespace/name/provider)
        module_id: String,
        /// Registry name ("terraform" or "opentofu")
        registry: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Provider not found in the registry.
    #[error("Provider {namespace}/{name} not found in {registry} registry ({src_path}:{src_line})")]
    ProviderNotFound {
        /// Provider namespace
        namespace: String,
        /// Provider name
        name: String,
        /// Registry name ("terraform" or "opentofu")
        registry: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Upstream registry failure: network error, unexpected HTTP status, or
    /// a response shape the client could not decode.
    #[error("Registry request failed ({registry}) ({src_path}:{src_line}): {message}")]
    RegistryApi {
        /// Registry name ("terraform" or "opentofu")
        registry: String,
        /// Error message including the operation and identifying context
        message: String,
        /// HTTP status code (if the request got that far)
        status_code: Option<u16>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// One or more configuration invariants were violated. All violations
    /// are collected so a caller can fix everything in one pass.
    #[error("Configuration validation failed: {}", errors.join("; "))]
    Validation {
        /// Human-readable violation messages
        errors: Vec<String>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Configuration file parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}' ({src_path}:{src_line}): {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Internal error (should not happen in normal operation).
    #[error("Internal error ({src_path}:{src_line}): {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },
}

impl TofuLensError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error, src_path: &'static str, src_line: u32) -> Self {
        Self::Io { path: path.into(), source, src_path, src_line }
    }

    /// Creates a `RegistryApi` error.
    #[must_use]
    pub fn registry_api(registry: String, message: String, status_code: Option<u16>, src_path: &'static str, src_line: u32) -> Self {
        Self::RegistryApi { registry, message, status_code, src_path, src_line }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>, src_path: &'static str, src_line: u32) -> Self {
        Self::ConfigParse { message, source, src_path, src_line }
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: String, src_path: &'static str, src_line: u32) -> Self {
        Self::Internal { message, src_path, src_line }
    }

    /// True when the same inputs might succeed on a retry (transient
    /// upstream conditions), false for deterministic failures.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::RegistryApi { .. })
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::PermissionDenied { .. } => 13,
            Self::StateFileNotFound { .. } => 14,
            Self::NotAFile { .. } => 15,
            Self::StateParse { .. } => 16,
            Self::ModuleNotFound { .. } | Self::ProviderNotFound { .. } => 17,
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            Self::Validation { .. } => 20,
            Self::RegistryApi { .. } => 22,
            _ => 1, // Generic unhandled error
        }
    }
}

impl From<std::io::Error> for TofuLensError {
    fn from(source: std::io::Error) -> Self {
        // This conversion is used when a PathBuf is not readily available.
        // Where a path is known, prefer TofuLensError::io(path, source, file!(), line!())
        Self::Io {
            path: PathBuf::new(),
            source,
            src_path: file!(),
            src_line: line!(),
        }
    }
}

impl From<serde_json::Error> for TofuLensError {
    fn from(source: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON serialization/deserialization error: {}", source),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_joins_all_messages() {
        let e = err!(Validation {
            errors: vec![
                "'namespace' is required and cannot be empty.".to_string(),
                "'registry' must be either 'terraform' or 'opentofu'.".to_string(),
            ],
        });
        let text = e.to_string();
        assert!(text.contains("'namespace' is required"));
        assert!(text.contains("'registry' must be either"));
    }

    #[test]
    fn not_found_message_contains_literal_path() {
        let e = err!(StateFileNotFound { path: "/no/such/file".to_string() });
        assert!(e.to_string().contains("/no/such/file"));
        assert_eq!(e.exit_code(), 14);
    }

    #[test]
    fn only_upstream_failures_are_recoverable() {
        let upstream = err!(RegistryApi {
            registry: "terraform".to_string(),
            message: "connect timeout".to_string(),
            status_code: None,
        });
        assert!(upstream.is_recoverable());

        let missing = err!(ModuleNotFound {
            module_id: "a/b/c".to_string(),
            registry: "terraform".to_string(),
        });
        assert!(!missing.is_recoverable());
    }
}
