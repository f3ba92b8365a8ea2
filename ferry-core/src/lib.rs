//! # Ferry Core Library
//!
//! Shared building blocks for the ferry workspace: persisted configuration,
//! credential discovery, URL normalization and terminal output helpers.

pub mod config;
pub mod consts;
pub mod creds;
pub mod output;
pub mod url;

pub use config::{ConfigDirs, FerryConfig, JiraSettings, MigrationSettings, get_config_dirs};
pub use creds::{Credentials, resolve_credentials};
pub use output::{ColorMode, print_error, print_header, print_info, print_success, print_warning};
