//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `module`: Query module info, versions, or search for modules
//! - `provider`: Query provider info or versions
//! - `search`: Combined provider and module search
//! - `state`: Inspect a local state file (info, resources, outputs)
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Latest-version details of a module
//! tofulens module info terraform-aws-modules vpc aws
//!
//! # All versions of a provider from the OpenTofu registry
//! tofulens provider versions opentofu aws --registry opentofu
//!
//! # Combined search, JSON output
//! tofulens search kubernetes --format json --limit 30
//!
//! # State file inspection
//! tofulens state info ./terraform.tfstate
//! tofulens state resources ./terraform.tfstate --mode managed
//! tofulens state outputs ./terraform.tfstate --name vpc_id
//! ```

pub mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// TofuLens - Terraform/OpenTofu registry query and state inspection tool.
#[derive(Parser, Debug)]
#[command(
    name = "tofulens",
    author,
    version,
    about = "Terraform/OpenTofu registry query and local state inspection tool",
    long_about = "TofuLens queries Terraform-compatible and OpenTofu-compatible registries \
                  for module and provider metadata, and inspects local state files: summary \
                  counts, filtered resource listings, and output values."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TOFULENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// How results are printed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query registry modules
    #[command(subcommand, visible_alias = "m")]
    Module(ModuleCommand),

    /// Query registry providers
    #[command(subcommand, visible_alias = "p")]
    Provider(ProviderCommand),

    /// Search providers and modules together
    Search(SearchArgs),

    /// Inspect a local state file
    #[command(subcommand, visible_alias = "st")]
    State(StateCommand),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Module query subcommands.
#[derive(Subcommand, Debug)]
pub enum ModuleCommand {
    /// Latest-version details of a module
    Info(ModuleRefArgs),

    /// All known versions of a module, newest first
    Versions(ModuleRefArgs),

    /// Search modules by query string
    Search(ModuleSearchArgs),
}

/// Provider query subcommands.
#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// Details of a provider
    Info(ProviderRefArgs),

    /// All known versions of a provider, newest first
    Versions(ProviderRefArgs),
}

/// State inspection subcommands.
#[derive(Subcommand, Debug)]
pub enum StateCommand {
    /// Summary metadata and counts
    Info(StatePathArgs),

    /// Resource listing, optionally filtered
    Resources(StateResourcesArgs),

    /// Output listing, optionally filtered by name
    Outputs(StateOutputsArgs),
}

/// Identifies a module in a registry.
#[derive(Args, Debug)]
pub struct ModuleRefArgs {
    /// Module namespace (e.g., "terraform-aws-modules")
    #[arg(value_name = "NAMESPACE")]
    pub namespace: String,

    /// Module name (e.g., "vpc")
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Target provider (e.g., "aws")
    #[arg(value_name = "PROVIDER")]
    pub target_provider: String,

    /// Registry to query
    #[arg(short, long, value_name = "REGISTRY")]
    pub registry: Option<String>,
}

/// Arguments for module search.
#[derive(Args, Debug)]
pub struct ModuleSearchArgs {
    /// Search query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Registry to search
    #[arg(short, long, value_name = "REGISTRY")]
    pub registry: Option<String>,

    /// Maximum number of results (default 20, max 100)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<i64>,
}

/// Identifies a provider in a registry.
#[derive(Args, Debug)]
pub struct ProviderRefArgs {
    /// Provider namespace (e.g., "hashicorp", or "opentofu" for OpenTofu forks)
    #[arg(value_name = "NAMESPACE")]
    pub namespace: String,

    /// Provider name (e.g., "aws")
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Registry to query
    #[arg(short, long, value_name = "REGISTRY")]
    pub registry: Option<String>,
}

/// Arguments for the combined search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Registry to search
    #[arg(short, long, value_name = "REGISTRY")]
    pub registry: Option<String>,

    /// Which result kinds to fetch: all, providers or modules
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub resource_type: Option<String>,

    /// Maximum number of results (default 50, max 100)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<i64>,
}

/// A bare state file path.
#[derive(Args, Debug)]
pub struct StatePathArgs {
    /// Path to the state file (absolute, relative or ~)
    #[arg(value_name = "STATE_FILE")]
    pub state_path: String,
}

/// Arguments for state resource listing.
#[derive(Args, Debug)]
pub struct StateResourcesArgs {
    /// Path to the state file
    #[arg(value_name = "STATE_FILE")]
    pub state_path: String,

    /// Retain only resources with this mode (managed or data)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Retain only resources of this type
    #[arg(long = "type", value_name = "TYPE")]
    pub resource_type: Option<String>,

    /// Retain only resources in this module path
    #[arg(long, value_name = "MODULE")]
    pub module: Option<String>,
}

/// Arguments for state output listing.
#[derive(Args, Debug)]
pub struct StateOutputsArgs {
    /// Path to the state file
    #[arg(value_name = "STATE_FILE")]
    pub state_path: String,

    /// Retain only the output with this name
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "tofulens.yaml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        // Verify CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_module_info_command() {
        let cli = Cli::parse_from(["tofulens", "module", "info", "terraform-aws-modules", "vpc", "aws"]);
        match cli.command {
            Commands::Module(ModuleCommand::Info(args)) => {
                assert_eq!(args.namespace, "terraform-aws-modules");
                assert_eq!(args.name, "vpc");
                assert_eq!(args.target_provider, "aws");
                assert!(args.registry.is_none());
            }
            _ => panic!("Expected module info command"),
        }
    }

    #[test]
    fn test_provider_versions_with_registry() {
        let cli = Cli::parse_from([
            "tofulens", "provider", "versions", "opentofu", "aws", "--registry", "opentofu",
        ]);
        match cli.command {
            Commands::Provider(ProviderCommand::Versions(args)) => {
                assert_eq!(args.namespace, "opentofu");
                assert_eq!(args.registry.as_deref(), Some("opentofu"));
            }
            _ => panic!("Expected provider versions command"),
        }
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from([
            "tofulens", "search", "kubernetes", "--type", "providers", "--limit", "30",
        ]);
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "kubernetes");
                assert_eq!(args.resource_type.as_deref(), Some("providers"));
                assert_eq!(args.limit, Some(30));
            }
            _ => panic!("Expected search command"),
        }
    }

    #[test]
    fn test_state_resources_filters() {
        let cli = Cli::parse_from([
            "tofulens",
            "state",
            "resources",
            "./terraform.tfstate",
            "--mode",
            "managed",
            "--module",
            "module.ec2_cluster",
        ]);
        match cli.command {
            Commands::State(StateCommand::Resources(args)) => {
                assert_eq!(args.state_path, "./terraform.tfstate");
                assert_eq!(args.mode.as_deref(), Some("managed"));
                assert_eq!(args.module.as_deref(), Some("module.ec2_cluster"));
                assert!(args.resource_type.is_none());
            }
            _ => panic!("Expected state resources command"),
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "tofulens",
            "-vv",
            "--format",
            "json",
            "state",
            "info",
            "./terraform.tfstate",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::parse_from(["tofulens", "m", "search", "vpc"]);
        assert!(matches!(cli.command, Commands::Module(ModuleCommand::Search(_))));

        let cli = Cli::parse_from(["tofulens", "st", "info", "s.tfstate"]);
        assert!(matches!(cli.command, Commands::State(StateCommand::Info(_))));
    }
}
