//! Resource and output projection over a parsed state document.
//!
//! All functions here are single-pass, stateless transforms: records are
//! computed fresh on every call and never cached or mutated in place.

use crate::state::document::{StateDocument, StateResource};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Filter predicates for [`project_resources`]. Filters combine as a
/// conjunction: a resource must satisfy every provided filter to be
/// retained; absent filters impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Retain only resources with this mode ("managed" or "data")
    pub mode: Option<String>,

    /// Retain only resources of this type (e.g., "aws_instance")
    pub resource_type: Option<String>,

    /// Retain only resources in this module path (e.g., "module.ec2_cluster")
    pub module: Option<String>,
}

/// A projected per-resource view record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceRecord {
    /// Resource mode; "unknown" when the state record carries none
    pub mode: String,

    /// Resource type; "unknown" when absent
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Resource name; "unknown" when absent
    pub name: String,

    /// Provider reference string; empty when absent
    pub provider: String,

    /// Module path, `None` for the root module
    pub module: Option<String>,

    /// Number of instances (>1 for count/for_each resources)
    pub instance_count: usize,

    /// Whether the resource uses count/for_each
    pub has_multiple_instances: bool,

    /// "{mode}.{module}.{type}.{name}", module segment omitted at root
    pub resource_id: String,

    /// `id` attribute of the first instance, when present
    pub id: Option<String>,
}

/// A projected output record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutputRecord {
    /// Output name as defined in configuration
    pub name: String,

    /// Output value, JSON-encoded (null encodes as the literal "null")
    pub value: String,

    /// Type as its scalar string form, or a JSON-encoded array string for
    /// compound types (Terraform encodes those as nested arrays, e.g.
    /// `["list","string"]`)
    #[serde(rename = "type")]
    pub output_type: String,

    /// Whether the output is marked sensitive (defaults to false).
    /// Sensitive values are NOT redacted; this projection is purely
    /// structural, and safeguarding state files is the caller's job.
    pub sensitive: bool,
}

/// Per-mode resource counts. Resources with a missing or unrecognized mode
/// are excluded from both, so `managed + data` may be less than the total
/// resource count.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ModeCounts {
    /// Number of managed resources
    pub managed: usize,

    /// Number of data resources
    pub data: usize,
}

/// Project the state's resources into view records, in file order,
/// applying the filter conjunction.
#[must_use]
pub fn project_resources(state: &StateDocument, filter: &ResourceFilter) -> Vec<ResourceRecord> {
    state
        .resources
        .iter()
        .filter(|resource| retain(resource, filter))
        .map(project_resource)
        .collect()
}

fn retain(resource: &StateResource, filter: &ResourceFilter) -> bool {
    if let Some(ref mode) = filter.mode {
        if resource.mode.as_deref() != Some(mode.as_str()) {
            return false;
        }
    }
    if let Some(ref resource_type) = filter.resource_type {
        if resource.resource_type.as_deref() != Some(resource_type.as_str()) {
            return false;
        }
    }
    if let Some(ref module) = filter.module {
        if resource.module.as_deref() != Some(module.as_str()) {
            return false;
        }
    }
    true
}

fn project_resource(resource: &StateResource) -> ResourceRecord {
    let mode = resource.mode.clone().unwrap_or_else(|| "unknown".to_string());
    let resource_type = resource
        .resource_type
        .clone()
        .unwrap_or_else(|| "unknown".to_string());
    let name = resource.name.clone().unwrap_or_else(|| "unknown".to_string());
    let instance_count = resource.instances.len();

    let resource_id = match resource.module {
        Some(ref module) => format!("{mode}.{module}.{resource_type}.{name}"),
        None => format!("{mode}.{resource_type}.{name}"),
    };

    ResourceRecord {
        mode,
        resource_type,
        name,
        provider: resource.provider.clone().unwrap_or_default(),
        module: resource.module.clone(),
        instance_count,
        has_multiple_instances: instance_count > 1,
        resource_id,
        id: resource.first_instance_id(),
    }
}

/// Project the state's outputs into records, in insertion order. When
/// `filter_name` is given, at most the single matching entry is retained.
#[must_use]
pub fn project_outputs(state: &StateDocument, filter_name: Option<&str>) -> Vec<OutputRecord> {
    state
        .outputs
        .iter()
        .filter(|(name, _)| filter_name.is_none_or(|wanted| wanted == name.as_str()))
        .map(|(name, entry)| project_output(name, entry))
        .collect()
}

fn project_output(name: &str, entry: &Value) -> OutputRecord {
    let (value, output_type, sensitive) = match entry {
        Value::Object(fields) => (
            fields.get("value").unwrap_or(&Value::Null),
            fields.get("type"),
            fields
                .get("sensitive")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        ),
        // Tolerate non-object entries by treating them as the value itself
        other => (other, None, false),
    };

    OutputRecord {
        name: name.to_string(),
        value: encode_json(value),
        output_type: render_type(output_type),
        sensitive,
    }
}

fn encode_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn render_type(type_value: Option<&Value>) -> String {
    match type_value {
        None => "unknown".to_string(),
        Some(Value::String(scalar)) => scalar.clone(),
        Some(array @ Value::Array(_)) => encode_json(array),
        Some(other) => other.to_string(),
    }
}

/// Count distinct module paths across all resources. Module paths are
/// opaque string keys; duplicates count once, and ordering is irrelevant.
#[must_use]
pub fn count_unique_modules(state: &StateDocument) -> usize {
    state
        .resources
        .iter()
        .filter_map(|resource| resource.module.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Classify each resource's mode in a single pass.
#[must_use]
pub fn count_by_mode(state: &StateDocument) -> ModeCounts {
    let mut counts = ModeCounts::default();
    for resource in &state.resources {
        match resource.mode.as_deref() {
            Some("managed") => counts.managed += 1,
            Some("data") => counts.data += 1,
            _ => {}
        }
    }
    counts
}
