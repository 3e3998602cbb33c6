//! Terraform-registry-compatible client.
//!
//! Talks the v1 registry API rooted at `https://registry.terraform.io` (the
//! base URL is configurable, which the tests rely on).

use crate::error::Result;
use crate::registry::http::RegistryHttp;
use crate::registry::models::{
    Module, ModuleDetails, ModuleVersion, Provider, ProviderDetails, ProviderVersion,
};
use crate::registry::{sort_newest_first, RegistryClient, RegistryKind};
use async_trait::async_trait;
use serde::Deserialize;

/// Client for a Terraform-compatible registry.
pub struct TerraformRegistry {
    http: RegistryHttp,
}

impl TerraformRegistry {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            http: RegistryHttp::new(base_url, timeout_secs, RegistryKind::Terraform)?,
        })
    }
}

/// Response shape of `/v1/modules/{id}/versions`.
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

/// Response shape of `/v1/providers/{id}/versions`.
#[derive(Debug, Deserialize)]
struct ProviderVersionsResponse {
    #[serde(default)]
    versions: Vec<ProviderVersion>,
}

/// Response shape of `/v1/modules/search`.
#[derive(Debug, Deserialize)]
struct ModuleSearchResponse {
    #[serde(default)]
    modules: Vec<Module>,
}

/// Response shape of `/v1/providers/search`.
#[derive(Debug, Deserialize)]
struct ProviderSearchResponse {
    #[serde(default)]
    providers: Vec<Provider>,
}

#[async_trait]
impl RegistryClient for TerraformRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Terraform
    }

    async fn list_module_versions(&self, module_id: &str) -> Result<Vec<ModuleVersion>> {
        let context = format!("module versions for {module_id}");
        let Some(value) = self
            .http
            .get_json(&format!("/v1/modules/{module_id}/versions"), &context)
            .await?
        else {
            // Unknown module: the empty listing is the not-found signal,
            // callers translate it into a domain error.
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

        let response: ModuleSearchResponse = self.http.decode(value, &context)?;
        // Upstream relevance order is preserved as-is.
        Ok(response.modules)
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

        let response: ProviderSearchResponse = self.http.decode(value, &context)?;
        Ok(response.providers)
    }
}
