//! # Client Creation
//!
//! Turns the persisted configuration into a ready-to-use issue repository
//! plus the tokio runtime that drives it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use ferry_core::config::{FerryConfig, get_config_dirs};
use ferry_core::creds::resolve_credentials;
use ferry_jira::IssueRepository;
use tokio::runtime::Runtime;
use tracing::debug;

/// Path of the configuration file, honoring `--config`
pub fn config_path(override_path: Option<&Path>) -> Result<PathBuf> {
  match override_path {
    Some(path) => Ok(path.to_path_buf()),
    None => Ok(get_config_dirs()?.config_path()),
  }
}

/// Load the configuration file with environment overrides applied, ready for
/// talking to Jira
pub fn load_effective_config(override_path: Option<&Path>) -> Result<FerryConfig> {
  let path = config_path(override_path)?;
  let mut config = FerryConfig::load_from(&path)?;
  config.apply_process_env();
  config.validate()?;
  debug!(server = %config.jira.server, api_path = %config.jira.api_path, "Resolved Jira settings");
  Ok(config)
}

/// Creates a tokio runtime and an authenticated issue repository
///
/// `max_results` overrides the configured page size when given.
pub fn create_runtime_and_repository(
  config: &FerryConfig,
  max_results: Option<u32>,
) -> Result<(Runtime, IssueRepository)> {
  let base_dirs = BaseDirs::new().context("Failed to get $HOME directory")?;
  let credentials =
    resolve_credentials(&config.jira, base_dirs.home_dir()).context("Failed to get Jira credentials")?;

  let max_results = max_results.unwrap_or(config.migration.max_results);
  if max_results == 0 {
    anyhow::bail!("--max-results must be at least 1");
  }

  let repository = IssueRepository::connect(&config.jira, &credentials)
    .context("Failed to create Jira client")?
    .with_max_results(max_results);
  let rt = Runtime::new().context("Failed to create async runtime")?;

  Ok((rt, repository))
}
