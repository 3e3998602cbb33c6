//! Local Terraform/OpenTofu state file loading and projection.
//!
//! [`reader`] turns a path into a parsed [`document::StateDocument`];
//! [`project`] derives resource and output views from the parsed document.
//! State files are only ever read, never written or locked.

pub mod document;
pub mod project;
pub mod reader;

pub use document::{StateDocument, StateResource};
pub use project::{
    count_by_mode, count_unique_modules, project_outputs, project_resources, ModeCounts,
    OutputRecord, ResourceFilter, ResourceRecord,
};
pub use reader::{expand_path, read_state, read_state_file, StateFile};
