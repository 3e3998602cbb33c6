//! # TofuLens
//!
//! A Terraform/OpenTofu registry query and local state inspection library.
//!
//! TofuLens queries Terraform-compatible and OpenTofu-compatible registries
//! for module and provider metadata, and reads local state files (format
//! version 4) to derive summary counts, filtered resource listings, and
//! output values.
//!
//! ## Features
//!
//! - **Registry queries**: module info/versions/search, provider
//!   info/versions, and a combined provider+module search, against either
//!   registry flavor behind one contract
//! - **State inspection**: summary metadata, per-resource records with
//!   stable IDs, and JSON-encoded output values
//! - **Filtering**: resource filters (mode, type, module path) combine as a
//!   conjunction; output listings filter by name
//! - **Batch validation**: every query is validated up front and all
//!   violations are reported together
//!
//! Everything is read-only and stateless: no caching, no authentication,
//! no state mutation, no remote state backends.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tofulens::datasource::state_info;
//! use tofulens::Config;
//!
//! #[tokio::main]
//! async fn main() -> tofulens::Result<()> {
//!     let config = Config::default();
//!     let query = state_info::StateInfoQuery {
//!         state_path: "./terraform.tfstate".to_string(),
//!     };
//!     let info = state_info::read(&config, &query).await?;
//!     println!("{} resources in {} modules", info.resources_count, info.modules_count);
//!     Ok(())
//! }
//! ```

// Note: README is not included as doc to avoid doctest failures
// See README.md for full documentation
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod datasource;
pub mod error;
pub mod registry;
pub mod state;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{Result, TofuLensError};
pub use registry::{RegistryClient, RegistryKind};
