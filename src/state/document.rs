//! Terraform/OpenTofu state document model.
//!
//! A state document is built leniently from parsed JSON: no schema
//! validation beyond well-formedness is performed, and absent fields
//! default to empty/`None` rather than raising. Output mapping order is
//! preserved (serde_json's `preserve_order` feature).

use serde_json::{Map, Value};

/// A parsed state file (format version 4).
#[derive(Debug, Clone, Default)]
pub struct StateDocument {
    /// State file format version (typically 4)
    pub version: Option<i64>,

    /// Version of Terraform/OpenTofu that wrote the state
    pub terraform_version: Option<String>,

    /// Serial number, incremented on each state write
    pub serial: Option<i64>,

    /// Lineage UUID identifying the state file's line of descent
    pub lineage: Option<String>,

    /// Output name → raw output entry, in file order
    pub outputs: Map<String, Value>,

    /// Resource records, in file order
    pub resources: Vec<StateResource>,
}

/// A single resource record from the state.
///
/// Identity within its scope is `(mode, module, type, name)`; an absent
/// `module` means the root module.
#[derive(Debug, Clone, Default)]
pub struct StateResource {
    /// "managed" or "data"; absent in malformed states
    pub mode: Option<String>,

    /// Resource type (e.g., "aws_instance")
    pub resource_type: Option<String>,

    /// Resource name as defined in configuration
    pub name: Option<String>,

    /// Provider reference string
    pub provider: Option<String>,

    /// Module path (e.g., "module.ec2_cluster"); `None` for root module.
    /// Treated as an opaque string key, never decomposed.
    pub module: Option<String>,

    /// Raw instance objects
    pub instances: Vec<Value>,
}

impl StateDocument {
    /// Build a document from a parsed JSON value. Never fails: anything
    /// that isn't the expected shape simply defaults.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let outputs = match map.remove("outputs") {
            Some(Value::Object(outputs)) => outputs,
            _ => Map::new(),
        };

        let resources = match map.remove("resources") {
            Some(Value::Array(entries)) => {
                entries.into_iter().map(StateResource::from_value).collect()
            }
            _ => Vec::new(),
        };

        Self {
            version: map.get("version").and_then(Value::as_i64),
            terraform_version: string_field(&map, "terraform_version"),
            serial: map.get("serial").and_then(Value::as_i64),
            lineage: string_field(&map, "lineage"),
            outputs,
            resources,
        }
    }
}

impl StateResource {
    fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let instances = match map.remove("instances") {
            Some(Value::Array(instances)) => instances,
            _ => Vec::new(),
        };

        Self {
            mode: string_field(&map, "mode"),
            resource_type: string_field(&map, "type"),
            name: string_field(&map, "name"),
            provider: string_field(&map, "provider"),
            module: string_field(&map, "module"),
            instances,
        }
    }

    /// The `id` attribute of the first instance, when present.
    #[must_use]
    pub fn first_instance_id(&self) -> Option<String> {
        let attributes = self.instances.first()?.get("attributes")?;
        match attributes.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(String::from)
}
