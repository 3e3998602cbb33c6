//! Shared HTTP plumbing for the registry clients.
//!
//! Wraps a `reqwest::Client` with the base URL and error mapping both
//! registry flavors share. HTTP 404 is surfaced as `Ok(None)` so callers
//! can translate it into their own not-found semantics; every other
//! failure (connect error, non-success status, undecodable body) becomes a
//! `RegistryApi` error carrying the operation context.

use crate::error::Result;
use crate::registry::RegistryKind;
use std::time::Duration;
use url::Url;

/// HTTP transport for a single registry.
#[derive(Debug, Clone)]
pub struct RegistryHttp {
    client: reqwest::Client,
    base_url: Url,
    kind: RegistryKind,
}

impl RegistryHttp {
    /// Build a transport for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout_secs: u64, kind: RegistryKind) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            crate::err!(ConfigValue {
                key: format!("{kind}_registry_url"),
                message: format!("invalid base URL '{base_url}': {e}"),
            })
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("tofulens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| crate::err!(Internal {
                message: format!("failed to build HTTP client: {e}"),
            }))?;

        Ok(Self { client, base_url, kind })
    }

    /// Which registry this transport talks to.
    #[must_use]
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// GET `path` (joined onto the base URL, query string included) and
    /// decode the JSON body.
    ///
    /// Returns `Ok(None)` on HTTP 404. `context` names the operation and
    /// its identifiers for error messages.
    pub async fn get_json(&self, path: &str, context: &str) -> Result<Option<serde_json::Value>> {
        let url = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        tracing::debug!(url = %url, registry = %self.kind, "Registry GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            crate::err!(RegistryApi {
                registry: self.kind.to_string(),
                message: format!("{context}: request to {url} failed: {e}"),
                status_code: None,
            })
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(url = %url, "Registry returned 404");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(crate::err!(RegistryApi {
                registry: self.kind.to_string(),
                message: format!("{context}: {url} returned status {status}"),
                status_code: Some(status.as_u16()),
            }));
        }

        let value = response.json::<serde_json::Value>().await.map_err(|e| {
            crate::err!(RegistryApi {
                registry: self.kind.to_string(),
                message: format!("{context}: failed to decode response from {url}: {e}"),
                status_code: Some(status.as_u16()),
            })
        })?;

        Ok(Some(value))
    }

    /// Decode a JSON value into a typed response shape, wrapping decode
    /// failures with the operation context.
    pub fn decode<T: serde::de::DeserializeOwned>(
        &self,
        value: serde_json::Value,
        context: &str,
    ) -> Result<T> {
        serde_json::from_value(value).map_err(|e| {
            crate::err!(RegistryApi {
                registry: self.kind.to_string(),
                message: format!("{context}: unexpected response shape: {e}"),
                status_code: None,
            })
        })
    }
}
