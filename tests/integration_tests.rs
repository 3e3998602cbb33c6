//! Integration tests for TofuLens.
//!
//! These tests run the query operations end to end: registry operations
//! against a mock HTTP server, state operations against real temporary
//! files.

use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use tofulens::{Config, TofuLensError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration pointing both registry flavors at the mock server.
fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.registry.terraform_url = server.uri();
    config.registry.opentofu_url = server.uri();
    config.registry.timeout_secs = 5;
    config
}

fn write_state(content: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

mod registry_tests {
    use super::*;
    use tofulens::datasource::{module_info, module_search, provider_info, registry_search};

    #[tokio::test]
    async fn module_info_fetches_details_for_the_newest_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/modules/terraform-aws-modules/vpc/aws/versions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "modules": [{
                    "versions": [
                        {"version": "6.4.0"},
                        {"version": "6.5.0"},
                        {"version": "6.3.0"}
                    ]
                }]
            })))
            .mount(&server)
            .await;
        // Only the 6.5.0 detail endpoint exists; asking for any other
        // version would fail the test.
        Mock::given(method("GET"))
            .and(path("/v1/modules/terraform-aws-modules/vpc/aws/6.5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": "6.5.0",
                "description": "AWS VPC Terraform module",
                "source": "https://github.com/terraform-aws-modules/terraform-aws-vpc",
                "downloads": 100000000,
                "verified": true,
                "published_at": "2024-03-01T12:00:00Z",
                "owner": "antonbabenko"
            })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let query = module_info::ModuleInfoQuery {
            namespace: "terraform-aws-modules".to_string(),
            name: "vpc".to_string(),
            target_provider: "aws".to_string(),
            registry: None,
        };
        let info = module_info::read(&config, &query).await.unwrap();

        assert_eq!(info.version.as_deref(), Some("6.5.0"));
        assert_eq!(info.registry, "terraform");
        assert_eq!(info.downloads, Some(100000000));
        assert_eq!(info.verified, Some(true));
        assert_eq!(info.owner.as_deref(), Some("antonbabenko"));
        assert_eq!(
            info.published_at.as_deref(),
            Some("2024-03-01T12:00:00+00:00")
        );
    }

    #[tokio::test]
    async fn module_info_translates_an_empty_listing_into_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/modules/nobody/nothing/aws/versions"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let query = module_info::ModuleInfoQuery {
            namespace: "nobody".to_string(),
            name: "nothing".to_string(),
            target_provider: "aws".to_string(),
            registry: None,
        };
        let err = module_info::read(&config, &query).await.unwrap_err();

        match err {
            TofuLensError::ModuleNotFound { module_id, registry, .. } => {
                assert_eq!(module_id, "nobody/nothing/aws");
                assert_eq!(registry, "terraform");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn provider_info_resolves_against_the_opentofu_flavor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/providers/opentofu/aws"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": "5.70.0",
                "description": "AWS provider",
                "source": "https://github.com/opentofu/terraform-provider-aws",
                "downloads": 12345
            })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let query = provider_info::ProviderInfoQuery {
            namespace: "opentofu".to_string(),
            name: "aws".to_string(),
            registry: Some("opentofu".to_string()),
        };
        let info = provider_info::read(&config, &query).await.unwrap();

        assert_eq!(info.registry, "opentofu");
        assert_eq!(info.latest_version.as_deref(), Some("5.70.0"));
        assert_eq!(info.downloads, Some(12345));
    }

    #[tokio::test]
    async fn module_search_truncation_is_order_preserving_and_exact() {
        let server = MockServer::start().await;
        let hits: Vec<serde_json::Value> = (0..5)
            .map(|i| {
                json!({
                    "id": format!("ns{i}/mod{i}/aws/1.0.0"),
                    "namespace": format!("ns{i}"),
                    "name": format!("mod{i}"),
                    "provider": "aws",
                    "downloads": i
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/v1/modules/search"))
            .and(query_param("q", "vpc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"modules": hits})))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let query = module_search::ModuleSearchQuery {
            query: "vpc".to_string(),
            registry: None,
            limit: Some(3),
        };
        let result = module_search::read(&config, &query).await.unwrap();

        assert_eq!(result.result_count, 3);
        assert_eq!(result.results[0].namespace, "ns0");
        assert_eq!(result.results[2].namespace, "ns2");
    }

    #[tokio::test]
    async fn providers_only_search_returns_no_modules() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/providers/search"))
            .and(query_param("q", "cloud"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "providers": [
                    {"id": "hashicorp/aws", "namespace": "hashicorp", "name": "aws", "tier": "official"},
                    {"id": "hashicorp/google", "namespace": "hashicorp", "name": "google", "tier": "official"}
                ]
            })))
            .mount(&server)
            .await;
        // No module mock is registered: resource_type=providers must never
        // hit the module endpoint, and a stray request would fail the
        // search with a 404.

        let config = config_for(&server);
        let query = registry_search::RegistrySearchQuery {
            query: "cloud".to_string(),
            registry: None,
            resource_type: Some("providers".to_string()),
            limit: Some(10),
        };
        let result = registry_search::read(&config, &query).await.unwrap();

        assert_eq!(result.result_count, 2);
        assert_eq!(result.provider_count, 2);
        assert_eq!(result.module_count, 0);
        assert!(result.results.iter().all(|r| r.record_type == "provider"));
    }

    #[tokio::test]
    async fn providers_crowd_out_modules_when_the_limit_is_small() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/providers/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "providers": [
                    {"id": "p/one", "namespace": "p", "name": "one"},
                    {"id": "p/two", "namespace": "p", "name": "two"},
                    {"id": "p/three", "namespace": "p", "name": "three"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/modules/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "modules": [
                    {"id": "m/one/aws/1.0.0", "namespace": "m", "name": "one", "provider": "aws"}
                ]
            })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let query = registry_search::RegistrySearchQuery {
            query: "anything".to_string(),
            registry: None,
            resource_type: Some("all".to_string()),
            limit: Some(2),
        };
        let result = registry_search::read(&config, &query).await.unwrap();

        // Hard truncation of the concatenated sequence: providers fill the
        // limit, the module never appears.
        assert_eq!(result.result_count, 2);
        assert_eq!(result.provider_count, 2);
        assert_eq!(result.module_count, 0);
    }

    #[tokio::test]
    async fn upstream_server_errors_surface_as_registry_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/providers/hashicorp/aws"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let query = provider_info::ProviderInfoQuery {
            namespace: "hashicorp".to_string(),
            name: "aws".to_string(),
            registry: None,
        };
        let err = provider_info::read(&config, &query).await.unwrap_err();

        assert!(err.is_recoverable());
        match err {
            TofuLensError::RegistryApi { status_code, message, .. } => {
                assert_eq!(status_code, Some(503));
                assert!(message.contains("hashicorp/aws"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn validation_failures_never_reach_the_network() {
        // No mock server at all: a validation failure must return before
        // any HTTP request is attempted.
        let config = Config::default();
        let query = registry_search::RegistrySearchQuery {
            query: String::new(),
            registry: Some("npm".to_string()),
            resource_type: None,
            limit: Some(0),
        };
        let err = registry_search::read(&config, &query).await.unwrap_err();

        match err {
            TofuLensError::Validation { errors, .. } => {
                assert_eq!(errors.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

mod state_tests {
    use super::*;
    use tofulens::datasource::{state_info, state_outputs, state_resources};

    fn three_resource_state() -> serde_json::Value {
        json!({
            "version": 4,
            "terraform_version": "1.9.5",
            "serial": 42,
            "lineage": "5b1bbb15-0000-0000-0000-000000000000",
            "outputs": {
                "vpc_id": {"value": "vpc-123", "type": "string"},
                "endpoints": {"value": null, "type": ["list", "string"], "sensitive": true}
            },
            "resources": [
                {
                    "mode": "managed", "type": "aws_instance", "name": "web",
                    "module": "module.ec2_cluster",
                    "instances": [
                        {"attributes": {"id": "i-001"}},
                        {"attributes": {"id": "i-002"}}
                    ]
                },
                {
                    "mode": "managed", "type": "aws_db_instance", "name": "primary",
                    "module": "module.database",
                    "instances": [{"attributes": {"id": "db-1"}}]
                },
                {
                    "mode": "data", "type": "aws_ami", "name": "ubuntu",
                    "module": "module.ec2_cluster",
                    "instances": [{"attributes": {"id": "ami-1"}}]
                }
            ]
        })
    }

    #[tokio::test]
    async fn state_info_counts_match_the_document() {
        let file = write_state(&three_resource_state());
        let query = state_info::StateInfoQuery {
            state_path: file.path().to_string_lossy().to_string(),
        };
        let info = state_info::read(&Config::default(), &query).await.unwrap();

        assert_eq!(info.version, Some(4));
        assert_eq!(info.terraform_version.as_deref(), Some("1.9.5"));
        assert_eq!(info.serial, Some(42));
        assert_eq!(info.resources_count, 3);
        assert_eq!(info.managed_resources_count, 2);
        assert_eq!(info.data_resources_count, 1);
        assert_eq!(info.modules_count, 2);
        assert_eq!(info.outputs_count, 2);
        assert!(info.state_file_size > 0);
    }

    #[tokio::test]
    async fn empty_state_reports_zero_everything() {
        let file = write_state(&json!({"resources": [], "outputs": {}}));
        let query = state_info::StateInfoQuery {
            state_path: file.path().to_string_lossy().to_string(),
        };
        let info = state_info::read(&Config::default(), &query).await.unwrap();

        assert_eq!(info.resources_count, 0);
        assert_eq!(info.outputs_count, 0);
        assert_eq!(info.modules_count, 0);
        assert_eq!(info.managed_resources_count, 0);
        assert_eq!(info.data_resources_count, 0);
    }

    #[tokio::test]
    async fn missing_state_file_error_names_the_literal_path() {
        let query = state_info::StateInfoQuery {
            state_path: "/no/such/file".to_string(),
        };
        let err = state_info::read(&Config::default(), &query).await.unwrap_err();

        assert!(matches!(err, TofuLensError::StateFileNotFound { .. }));
        assert!(err.to_string().contains("/no/such/file"));
    }

    #[tokio::test]
    async fn directory_path_is_invalid_input_not_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let query = state_info::StateInfoQuery {
            state_path: dir.path().to_string_lossy().to_string(),
        };
        let err = state_info::read(&Config::default(), &query).await.unwrap_err();
        assert!(matches!(err, TofuLensError::NotAFile { .. }));
    }

    #[tokio::test]
    async fn malformed_json_error_carries_the_parse_message() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let query = state_info::StateInfoQuery {
            state_path: file.path().to_string_lossy().to_string(),
        };
        let err = state_info::read(&Config::default(), &query).await.unwrap_err();

        match err {
            TofuLensError::StateParse { message, .. } => assert!(!message.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn resource_filters_compose_as_a_conjunction() {
        let file = write_state(&three_resource_state());

        let both = state_resources::read(
            &Config::default(),
            &state_resources::StateResourcesQuery {
                state_path: file.path().to_string_lossy().to_string(),
                filter_mode: Some("managed".to_string()),
                filter_module: Some("module.ec2_cluster".to_string()),
                filter_type: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(both.resource_count, 1);
        assert_eq!(
            both.resources[0].resource_id,
            "managed.module.ec2_cluster.aws_instance.web"
        );
        assert_eq!(both.resources[0].instance_count, 2);
        assert!(both.resources[0].has_multiple_instances);
        assert_eq!(both.resources[0].id.as_deref(), Some("i-001"));
    }

    #[tokio::test]
    async fn outputs_round_trip_with_null_encoded_literally() {
        let file = write_state(&three_resource_state());
        let result = state_outputs::read(
            &Config::default(),
            &state_outputs::StateOutputsQuery {
                state_path: file.path().to_string_lossy().to_string(),
                filter_name: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(result.output_count, 2);

        let vpc = result.outputs.iter().find(|o| o.name == "vpc_id").unwrap();
        assert_eq!(vpc.value, r#""vpc-123""#);
        assert_eq!(vpc.output_type, "string");
        assert!(!vpc.sensitive);

        let endpoints = result.outputs.iter().find(|o| o.name == "endpoints").unwrap();
        assert_eq!(endpoints.value, "null");
        assert_eq!(endpoints.output_type, r#"["list","string"]"#);
        assert!(endpoints.sensitive);
    }

    #[tokio::test]
    async fn repeated_reads_are_idempotent() {
        let file = write_state(&three_resource_state());
        let query = state_info::StateInfoQuery {
            state_path: file.path().to_string_lossy().to_string(),
        };

        let first = state_info::read(&Config::default(), &query).await.unwrap();
        let second = state_info::read(&Config::default(), &query).await.unwrap();

        assert_eq!(first.resources_count, second.resources_count);
        assert_eq!(first.modules_count, second.modules_count);
        assert_eq!(first.serial, second.serial);
    }
}
