//! TofuLens CLI entry point.
//!
//! This binary provides the command-line interface for TofuLens.

use clap::Parser;
use std::process::ExitCode;
use tofulens::cli::{
    render, Cli, Commands, ModuleCommand, OutputFormat, ProviderCommand, StateCommand,
};
use tofulens::{datasource, Config, TofuLensError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration before logging so its log_level can seed the filter
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(cli.verbose, cli.quiet, None);
            eprintln!("Error: {e}");
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1));
        }
    };

    // Initialize logging
    init_logging(cli.verbose, cli.quiet, config.log_level.as_deref());

    // Run the appropriate command
    match run(cli, config).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut source = std::error::Error::source(&e);
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool, config_level: Option<&str>) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // First try to use RUST_LOG from environment, otherwise the verbose
        // flag, otherwise the configuration file's log_level
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => config_level.unwrap_or("warn"),
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // Filter string: tofulens at the chosen level, everything else at warn
            EnvFilter::new(format!("warn,tofulens={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli, config: Config) -> tofulens::Result<ExitCode> {
    let format = cli.format;

    match cli.command {
        Commands::Module(command) => match command {
            ModuleCommand::Info(args) => {
                let query = datasource::module_info::ModuleInfoQuery {
                    namespace: args.namespace,
                    name: args.name,
                    target_provider: args.target_provider,
                    registry: args.registry,
                };
                let result = datasource::module_info::read(&config, &query).await?;
                emit(format, &result, render::module_info(&result))?;
            }
            ModuleCommand::Versions(args) => {
                let query = datasource::module_versions::ModuleVersionsQuery {
                    namespace: args.namespace,
                    name: args.name,
                    target_provider: args.target_provider,
                    registry: args.registry,
                };
                let result = datasource::module_versions::read(&config, &query).await?;
                emit(format, &result, render::module_versions(&result))?;
            }
            ModuleCommand::Search(args) => {
                let query = datasource::module_search::ModuleSearchQuery {
                    query: args.query,
                    registry: args.registry,
                    limit: args.limit,
                };
                let result = datasource::module_search::read(&config, &query).await?;
                emit(format, &result, render::module_search(&result))?;
            }
        },

        Commands::Provider(command) => match command {
            ProviderCommand::Info(args) => {
                let query = datasource::provider_info::ProviderInfoQuery {
                    namespace: args.namespace,
                    name: args.name,
                    registry: args.registry,
                };
                let result = datasource::provider_info::read(&config, &query).await?;
                emit(format, &result, render::provider_info(&result))?;
            }
            ProviderCommand::Versions(args) => {
                let query = datasource::provider_versions::ProviderVersionsQuery {
                    namespace: args.namespace,
                    name: args.name,
                    registry: args.registry,
                };
                let result = datasource::provider_versions::read(&config, &query).await?;
                emit(format, &result, render::provider_versions(&result))?;
            }
        },

        Commands::Search(args) => {
            let query = datasource::registry_search::RegistrySearchQuery {
                query: args.query,
                registry: args.registry,
                resource_type: args.resource_type,
                limit: args.limit,
            };
            let result = datasource::registry_search::read(&config, &query).await?;
            emit(format, &result, render::registry_search(&result))?;
        }

        Commands::State(command) => match command {
            StateCommand::Info(args) => {
                let query = datasource::state_info::StateInfoQuery {
                    state_path: args.state_path,
                };
                let result = datasource::state_info::read(&config, &query).await?;
                emit(format, &result, render::state_info(&result))?;
            }
            StateCommand::Resources(args) => {
                let query = datasource::state_resources::StateResourcesQuery {
                    state_path: args.state_path,
                    filter_mode: args.mode,
                    filter_type: args.resource_type,
                    filter_module: args.module,
                };
                let result = datasource::state_resources::read(&config, &query).await?;
                emit(format, &result, render::state_resources(&result))?;
            }
            StateCommand::Outputs(args) => {
                let query = datasource::state_outputs::StateOutputsQuery {
                    state_path: args.state_path,
                    filter_name: args.name,
                };
                let result = datasource::state_outputs::read(&config, &query).await?;
                emit(format, &result, render::state_outputs(&result))?;
            }
        },

        Commands::Init => {
            // Generate example configuration file
            let example_config = Config::example_yaml();
            let config_path = std::path::Path::new("tofulens.yaml");

            if config_path.exists() {
                return Err(TofuLensError::config_parse(
                    format!("Configuration file already exists: {}", config_path.display()),
                    None,
                    file!(),
                    line!(),
                ));
            }

            std::fs::write(config_path, example_config)
                .map_err(|e| TofuLensError::io(config_path, e, file!(), line!()))?;
            println!("Created example configuration: tofulens.yaml");
        }

        Commands::Validate(args) => {
            // Validate configuration file
            let config_content = std::fs::read_to_string(&args.config)
                .map_err(|e| TofuLensError::io(&args.config, e, file!(), line!()))?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    return Ok(ExitCode::from(1));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn emit<T: serde::Serialize>(
    format: OutputFormat,
    result: &T,
    table: String,
) -> tofulens::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render::to_json(result)?),
        OutputFormat::Table => println!("{table}"),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> tofulens::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let mut config = Config::from_file(config_path)?;
        config.load_registry_urls_from_env();
        return Ok(config);
    }

    // Look for default config files
    let default_paths = ["tofulens.yaml", "tofulens.yml", ".tofulens.yaml"];
    tracing::debug!("Searching for default configuration files");
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let mut config = Config::from_file(std::path::Path::new(path))?;
            config.load_registry_urls_from_env();
            return Ok(config);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    // Use default configuration
    let mut config = Config::default();
    config.load_registry_urls_from_env();
    Ok(config)
}
