//! Result rendering for the CLI: human-readable tables or JSON.

use crate::datasource::{
    ModuleInfo, ModuleSearch, ModuleVersions, ProviderInfo, ProviderVersions, RegistrySearch,
    StateInfo, StateOutputs, StateResources,
};
use crate::error::Result;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

/// Serialize any result record as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn opt_display<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), T::to_string)
}

/// Render module details as a field/value table.
#[must_use]
pub fn module_info(info: &ModuleInfo) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec![
        "Module",
        &format!("{}/{}/{}", info.namespace, info.name, info.target_provider),
    ]);
    table.add_row(vec!["Registry", &info.registry]);
    table.add_row(vec!["Version", opt(&info.version)]);
    table.add_row(vec!["Description", opt(&info.description)]);
    table.add_row(vec!["Source", opt(&info.source_url)]);
    table.add_row(vec!["Downloads", &opt_display(&info.downloads)]);
    table.add_row(vec!["Verified", &opt_display(&info.verified)]);
    table.add_row(vec!["Published", opt(&info.published_at)]);
    table.add_row(vec!["Owner", opt(&info.owner)]);
    table.to_string()
}

/// Render a module version listing.
#[must_use]
pub fn module_versions(result: &ModuleVersions) -> String {
    let mut table = new_table();
    table.set_header(vec!["Version", "Published", "Inputs", "Outputs", "Resources"]);
    for entry in &result.versions {
        table.add_row(vec![
            entry.version.clone(),
            entry.published_at.clone().unwrap_or_else(|| "-".to_string()),
            entry.inputs.len().to_string(),
            entry.outputs.len().to_string(),
            entry.resources.len().to_string(),
        ]);
    }
    format!(
        "{} versions of {}/{}/{} ({})\n{}",
        result.version_count,
        result.namespace,
        result.name,
        result.target_provider,
        result.registry,
        table
    )
}

/// Render module search hits.
#[must_use]
pub fn module_search(result: &ModuleSearch) -> String {
    let mut table = new_table();
    table.set_header(vec!["Module", "Description", "Downloads", "Verified"]);
    for record in &result.results {
        table.add_row(vec![
            format!("{}/{}/{}", record.namespace, record.name, record.provider_name),
            record.description.clone().unwrap_or_else(|| "-".to_string()),
            record.downloads.to_string(),
            record.verified.to_string(),
        ]);
    }
    format!(
        "{} modules for '{}' ({})\n{}",
        result.result_count, result.query, result.registry, table
    )
}

/// Render provider details as a field/value table.
#[must_use]
pub fn provider_info(info: &ProviderInfo) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Provider", &format!("{}/{}", info.namespace, info.name)]);
    table.add_row(vec!["Registry", &info.registry]);
    table.add_row(vec!["Latest version", opt(&info.latest_version)]);
    table.add_row(vec!["Description", opt(&info.description)]);
    table.add_row(vec!["Source", opt(&info.source_url)]);
    table.add_row(vec!["Downloads", &opt_display(&info.downloads)]);
    table.add_row(vec!["Published", opt(&info.published_at)]);
    table.to_string()
}

/// Render a provider version listing.
#[must_use]
pub fn provider_versions(result: &ProviderVersions) -> String {
    let mut table = new_table();
    table.set_header(vec!["Version", "Protocols", "Platforms"]);
    for version in &result.versions {
        let platforms = version
            .platforms
            .iter()
            .map(|p| format!("{}/{}", p.os, p.arch))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            version.version.clone(),
            version.protocols.join(", "),
            platforms,
        ]);
    }
    format!(
        "{} versions of {}/{} ({})\n{}",
        result.version_count, result.namespace, result.name, result.registry, table
    )
}

/// Render combined search hits with their type tags.
#[must_use]
pub fn registry_search(result: &RegistrySearch) -> String {
    let mut table = new_table();
    table.set_header(vec!["Type", "Name", "Description", "Downloads", "Tier"]);
    for record in &result.results {
        table.add_row(vec![
            record.record_type.clone(),
            format!("{}/{}", record.namespace, record.name),
            record.description.clone().unwrap_or_else(|| "-".to_string()),
            record.downloads.to_string(),
            record.tier.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!(
        "{} results for '{}' ({}): {} providers, {} modules\n{}",
        result.result_count,
        result.query,
        result.registry,
        result.provider_count,
        result.module_count,
        table
    )
}

/// Render state summary as a field/value table.
#[must_use]
pub fn state_info(info: &StateInfo) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["State file", &info.state_path]);
    table.add_row(vec!["Format version", &opt_display(&info.version)]);
    table.add_row(vec!["Written by", opt(&info.terraform_version)]);
    table.add_row(vec!["Serial", &opt_display(&info.serial)]);
    table.add_row(vec!["Lineage", opt(&info.lineage)]);
    table.add_row(vec!["Resources", &info.resources_count.to_string()]);
    table.add_row(vec!["  managed", &info.managed_resources_count.to_string()]);
    table.add_row(vec!["  data", &info.data_resources_count.to_string()]);
    table.add_row(vec!["Outputs", &info.outputs_count.to_string()]);
    table.add_row(vec!["Modules", &info.modules_count.to_string()]);
    table.add_row(vec!["File size", &format!("{} bytes", info.state_file_size)]);
    table.add_row(vec![
        "Modified",
        info.state_file_modified.as_deref().unwrap_or("-"),
    ]);
    table.to_string()
}

/// Render a filtered resource listing.
#[must_use]
pub fn state_resources(result: &StateResources) -> String {
    let mut table = new_table();
    table.set_header(vec!["Resource", "Mode", "Instances", "ID"]);
    for resource in &result.resources {
        table.add_row(vec![
            resource.resource_id.clone(),
            resource.mode.clone(),
            resource.instance_count.to_string(),
            resource.id.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!("{} resources\n{}", result.resource_count, table)
}

/// Render an output listing.
#[must_use]
pub fn state_outputs(result: &StateOutputs) -> String {
    let mut table = new_table();
    table.set_header(vec!["Name", "Value", "Type", "Sensitive"]);
    for output in &result.outputs {
        table.add_row(vec![
            output.name.clone(),
            output.value.clone(),
            output.output_type.clone(),
            output.sensitive.to_string(),
        ]);
    }
    format!("{} outputs\n{}", result.output_count, table)
}
