//! OpenTofu-registry-compatible client.
//!
//! The OpenTofu registry exposes the same v1 API surface as the Terraform
//! registry with a couple of shape nuances: search endpoints may return a
//! bare array instead of a wrapped object, and provider entries routinely
//! omit `downloads`/`tier`. Namespaces also mean something different here
//! (forked providers live under the `opentofu` namespace), but that is a
//! caller concern, not validated by the client.

use crate::error::Result;
use crate::registry::http::RegistryHttp;
use crate::registry::models::{
    Module, ModuleDetails, ModuleVersion, Provider, ProviderDetails, ProviderVersion,
};
use crate::registry::{sort_newest_first, RegistryClient, RegistryKind};
use async_trait::async_trait;
use serde::Deserialize;

/// Client for an OpenTofu-compatible registry.
pub struct OpenTofuRegistry {
    http: RegistryHttp,
}

impl OpenTofuRegistry {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            http: RegistryHttp::new(base_url, timeout_secs, RegistryKind::OpenTofu)?,
        })
    }

    /// OpenTofu search endpoints have been observed returning both
    /// `{"modules": [...]}` and a bare `[...]`; accept either.
    fn unwrap_listing(value: serde_json::Value, key: &str) -> serde_json::Value {
        match value {
            serde_json::Value::Object(mut map) => {
                map.remove(key).unwrap_or(serde_json::Value::Array(Vec::new()))
            }
            other => other,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModuleVersionsResponse {
    #[serde(default)]
    modules: Vec<ModuleVersionsEntry>,
}

#[derive(Debug, Deserialize)]
struct ModuleVersionsEntry {
    #[serde(default)]
    versions: Vec<ModuleVersion>,
}

#[derive(Debug, Deserialize)]
struct ProviderVersionsResponse {
    #[serde(default)]
    versions: Vec<ProviderVersion>,
}

#[async_trait]
impl RegistryClient for OpenTofuRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::OpenTofu
    }

    async fn list_module_versions(&self, module_id: &str) -> Result<Vec<ModuleVersion>> {
        let context = format!("module versions for {module_id}");
        let Some(value) = self
            .http
            .get_json(&format!("/v1/modules/{module_id}/versions"), &context)
            .await?
        else {
            return Ok(Vec::new());
        };

        let response: ModuleVersionsResponse = self.http.decode(value, &context)?;
        let mut versions: Vec<ModuleVersion> = response
            .modules
            .into_iter()
            .next()
            .map(|entry| entry.versions)
            .unwrap_or_default();
        sort_newest_first(&mut versions, |v| &v.version);
        Ok(versions)
    }

    async fn get_module_details(
        &self,
        namespace: &str,
        name: &str,
        provider: &str,
        version: &str,
    ) -> Result<ModuleDetails> {
        let module_id = format!("{namespace}/{name}/{provider}");
        let context = format!("module details for {module_id} version {version}");
        let Some(value) = self
            .http
            .get_json(&format!("/v1/modules/{module_id}/{version}"), &context)
            .await?
        else {
            return Err(crate::err!(ModuleNotFound {
                module_id: module_id,
                registry: self.kind().to_string(),
            }));
        };

        self.http.decode(value, &context)
    }

    async fn list_provider_versions(&self, provider_id: &str) -> Result<Vec<ProviderVersion>> {
        let context = format!("provider versions for {provider_id}");
        let Some(value) = self
            .http
            .get_json(&format!("/v1/providers/{provider_id}/versions"), &context)
            .await?
        else {
            return Ok(Vec::new());
        };

        let response: ProviderVersionsResponse = self.http.decode(value, &context)?;
        let mut versions = response.versions;
        sort_newest_first(&mut versions, |v| &v.version);
        Ok(versions)
    }

    async fn get_provider_details(&self, namespace: &str, name: &str) -> Result<ProviderDetails> {
        let context = format!("provider details for {namespace}/{name}");
        let Some(value) = self
            .http
            .get_json(&format!("/v1/providers/{namespace}/{name}"), &context)
            .await?
        else {
            return Err(crate::err!(ProviderNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
                registry: self.kind().to_string(),
            }));
        };

        self.http.decode(value, &context)
    }

    async fn list_modules(&self, query: &str) -> Result<Vec<Module>> {
        let context = format!("module search for '{query}'");
        let path = format!("/v1/modules/search?q={}&limit=100", urlencoding::encode(query));
        let Some(value) = self.http.get_json(&path, &context).await? else {
            return Ok(Vec::new());
        };

        let listing = Self::unwrap_listing(value, "modules");
        self.http.decode(listing, &context)
    }

    async fn list_providers(&self, query: &str) -> Result<Vec<Provider>> {
        let context = format!("provider search for '{query}'");
        let path = format!(
            "/v1/providers/search?q={}&limit=100",
            urlencoding::encode(query)
        );
        let Some(value) = self.http.get_json(&path, &context).await? else {
            return Ok(Vec::new());
        };

        let listing = Self::unwrap_listing(value, "providers");
        self.http.decode(listing, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_accepts_bare_array_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/providers/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "opentofu/aws", "namespace": "opentofu", "name": "aws"}
            ])))
            .mount(&server)
            .await;

        let registry = OpenTofuRegistry::new(&server.uri(), 5).unwrap();
        let providers = registry.list_providers("aws").await.unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].namespace, "opentofu");
        // Tier and downloads are routinely absent from OpenTofu responses
        assert!(providers[0].tier.is_none());
    }

    #[tokio::test]
    async fn search_accepts_wrapped_object_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/modules/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "modules": [
                    {"id": "Azure/compute/azurerm/5.0.0", "namespace": "Azure", "name": "compute", "provider": "azurerm"}
                ]
            })))
            .mount(&server)
            .await;

        let registry = OpenTofuRegistry::new(&server.uri(), 5).unwrap();
        let modules = registry.list_modules("compute").await.unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].provider_name, "azurerm");
    }

    #[tokio::test]
    async fn module_versions_sorted_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/modules/Azure/compute/azurerm/versions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "modules": [{"versions": [{"version": "4.9.0"}, {"version": "5.1.0"}]}]
            })))
            .mount(&server)
            .await;

        let registry = OpenTofuRegistry::new(&server.uri(), 5).unwrap();
        let versions = registry
            .list_module_versions("Azure/compute/azurerm")
            .await
            .unwrap();
        assert_eq!(versions[0].version, "5.1.0");
    }
}
