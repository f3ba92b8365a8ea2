//! # Configuration Management
//!
//! Persisted settings for the ferry tool: where Jira lives, how to talk to
//! it, and which projects a migration moves issues between. The file is TOML
//! under the XDG config directory; environment variables can override the
//! connection settings at load time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
  CONFIG_FILE_NAME, DEFAULT_API_PATH, DEFAULT_MAX_RESULTS, ENV_JIRA_API_TOKEN, ENV_JIRA_HOST, ENV_JIRA_USER,
};
use crate::url::ensure_url_scheme;

/// Represents the configuration directories for the ferry application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("eddieland", "", "ferry").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Load the configuration file, or defaults when it does not exist yet
  pub fn load_config(&self) -> Result<FerryConfig> {
    FerryConfig::load_from(&self.config_path())
  }

  /// Save the configuration file, creating the directory when needed
  pub fn save_config(&self, config: &FerryConfig) -> Result<()> {
    config.save_to(&self.config_path())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Connection settings for the Jira instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraSettings {
  /// Base URL of the Jira instance (e.g. https://company.atlassian.net)
  pub server: String,
  /// REST root appended to the server
  pub api_path: String,
  /// Account name for Basic auth
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user: Option<String>,
  /// API token for Basic auth
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key: Option<String>,
  /// Per-request timeout; unset means wait indefinitely
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout_secs: Option<u64>,
}

impl Default for JiraSettings {
  fn default() -> Self {
    Self::new("")
  }
}

impl JiraSettings {
  pub fn new(server: impl Into<String>) -> Self {
    Self {
      server: server.into(),
      api_path: DEFAULT_API_PATH.to_string(),
      user: None,
      api_key: None,
      timeout_secs: None,
    }
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_secs.map(Duration::from_secs)
  }

  /// The configured API token, ignoring blank values
  pub fn api_key(&self) -> Option<&str> {
    self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
  }
}

/// Defaults for migration runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationSettings {
  /// Page size of the project search, which caps issues moved per run
  pub max_results: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_project: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub destination_project: Option<String>,
}

impl Default for MigrationSettings {
  fn default() -> Self {
    Self {
      max_results: DEFAULT_MAX_RESULTS,
      source_project: None,
      destination_project: None,
    }
  }
}

/// Complete ferry configuration as stored in `ferry.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FerryConfig {
  pub jira: JiraSettings,
  pub migration: MigrationSettings,
}

impl FerryConfig {
  /// Load configuration from a TOML file, falling back to defaults when the
  /// file is absent
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!(path = %path.display(), "Config file not found, using defaults");
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Self =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;

    debug!(path = %path.display(), "Loaded config");
    Ok(config)
  }

  /// Write configuration to a TOML file
  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;

    debug!(path = %path.display(), "Saved config");
    Ok(())
  }

  /// Override connection settings from environment variables.
  ///
  /// `lookup` resolves a variable name to its value; empty values are
  /// ignored.
  pub fn apply_env_overrides<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(host) = lookup(ENV_JIRA_HOST) {
      self.jira.server = host;
    }
    if let Some(user) = lookup(ENV_JIRA_USER) {
      self.jira.user = Some(user);
    }
    if let Some(token) = lookup(ENV_JIRA_API_TOKEN) {
      self.jira.api_key = Some(token);
    }
  }

  /// Apply overrides from the process environment
  pub fn apply_process_env(&mut self) {
    self.apply_env_overrides(|name| std::env::var(name).ok());
  }

  /// Check the settings needed to reach Jira and normalize the server URL
  pub fn validate(&mut self) -> Result<()> {
    if self.jira.server.trim().is_empty() {
      return Err(anyhow::anyhow!(
        "Jira host is not configured. Run 'ferry config --host <URL>' or set {ENV_JIRA_HOST}."
      ));
    }
    self.jira.server = ensure_url_scheme(&self.jira.server)?;

    if self.jira.api_path.trim().is_empty() {
      self.jira.api_path = DEFAULT_API_PATH.to_string();
    }
    if self.jira.timeout_secs == Some(0) {
      return Err(anyhow::anyhow!("jira.timeout_secs must be at least 1"));
    }
    if self.migration.max_results == 0 {
      return Err(anyhow::anyhow!("migration.max_results must be at least 1"));
    }

    Ok(())
  }
}
