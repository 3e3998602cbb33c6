//! State file loading.
//!
//! Resolves a user-supplied path (`~` and relative paths included), checks
//! it in a fixed order (missing, then not a regular file, then unreadable) and
//! parses the content as JSON. Each failure mode is a distinct error so
//! callers never have to guess which precondition broke.

use crate::error::Result;
use crate::state::document::StateDocument;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A loaded state file: the parsed document plus filesystem metadata.
#[derive(Debug, Clone)]
pub struct StateFile {
    /// The parsed state document
    pub document: StateDocument,

    /// File size in bytes
    pub size_bytes: u64,

    /// Last-modified timestamp, when the filesystem reports one
    pub modified: Option<DateTime<Utc>>,
}

/// Expand `~` to the home directory and make relative paths absolute
/// against the current working directory.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = if let Some(rest) = raw.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(raw),
        }
    } else if raw == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw))
    } else {
        PathBuf::from(raw)
    };

    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    }
}

/// Read and parse a state file, returning the document only.
pub fn read_state(path: &str) -> Result<StateDocument> {
    Ok(read_state_file(path)?.document)
}

/// Read and parse a state file, keeping file metadata alongside the
/// document.
pub fn read_state_file(raw_path: &str) -> Result<StateFile> {
    let resolved = expand_path(raw_path);
    tracing::debug!(path = %resolved.display(), "Reading state file");

    if !resolved.exists() {
        return Err(crate::err!(StateFileNotFound { path: raw_path.to_string() }));
    }

    if !resolved.is_file() {
        return Err(crate::err!(NotAFile { path: raw_path.to_string() }));
    }

    let metadata = stat(&resolved, raw_path)?;
    let content = match std::fs::read_to_string(&resolved) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(crate::err!(PermissionDenied { path: raw_path.to_string() }));
        }
        Err(e) => return Err(crate::err!(Io { path: resolved, source: e })),
    };

    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        crate::err!(StateParse {
            path: raw_path.to_string(),
            message: e.to_string(),
        })
    })?;

    Ok(StateFile {
        document: StateDocument::from_value(value),
        size_bytes: metadata.len(),
        modified: metadata.modified().ok().map(DateTime::<Utc>::from),
    })
}

fn stat(resolved: &Path, raw_path: &str) -> Result<std::fs::Metadata> {
    match std::fs::metadata(resolved) {
        Ok(metadata) => Ok(metadata),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(crate::err!(PermissionDenied { path: raw_path.to_string() }))
        }
        Err(e) => Err(crate::err!(Io { path: resolved.to_path_buf(), source: e })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TofuLensError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_is_not_found_with_literal_path() {
        let err = read_state("/no/such/file").unwrap_err();
        match err {
            TofuLensError::StateFileNotFound { ref path, .. } => {
                assert_eq!(path, "/no/such/file");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("/no/such/file"));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_state(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TofuLensError::NotAFile { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error_with_details() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = read_state(file.path().to_str().unwrap()).unwrap_err();
        match err {
            TofuLensError::StateParse { message, .. } => assert!(!message.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_state_loads_with_metadata() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": 4, "serial": 3, "lineage": "abc", "resources": [], "outputs": {{}}}}"#
        )
        .unwrap();

        let state = read_state_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(state.document.version, Some(4));
        assert_eq!(state.document.serial, Some(3));
        assert!(state.size_bytes > 0);
        assert!(state.modified.is_some());
    }

    #[test]
    fn relative_paths_are_resolved_against_cwd() {
        let resolved = expand_path("some/relative/path.tfstate");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/relative/path.tfstate"));
    }

    #[test]
    fn tilde_expands_to_home() {
        if dirs::home_dir().is_some() {
            let resolved = expand_path("~/state.tfstate");
            assert!(!resolved.to_string_lossy().contains('~'));
            assert!(resolved.ends_with("state.tfstate"));
        }
    }
}
