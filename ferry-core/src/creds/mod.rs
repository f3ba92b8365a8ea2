//! # Credential Management
//!
//! Resolves the account name and API token used for Basic auth against Jira.
//! Explicit settings (config file or environment) win; otherwise the user's
//! `.netrc` is consulted for the configured host and then for
//! `atlassian.net`.

pub mod netrc;

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::config::JiraSettings;
use crate::consts::FALLBACK_NETRC_MACHINE;
use crate::url::normalize_host;

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Resolve Jira credentials for the configured host.
///
/// `home` is the directory holding the `.netrc` file, normally the user's
/// home directory.
pub fn resolve_credentials(settings: &JiraSettings, home: &Path) -> Result<Credentials> {
  if let (Some(username), Some(password)) = (non_empty(&settings.user), settings.api_key()) {
    debug!("Using Jira credentials from configuration");
    return Ok(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    });
  }

  let host = normalize_host(&settings.server);
  let netrc_path = netrc::get_netrc_path(home);
  if netrc_path.exists() {
    for machine in [host.as_str(), FALLBACK_NETRC_MACHINE] {
      if machine.is_empty() {
        continue;
      }
      if let Some(creds) = netrc::parse_netrc_file(&netrc_path, machine)? {
        debug!(machine, "Using Jira credentials from .netrc");
        return Ok(creds);
      }
    }
  }

  Err(anyhow::anyhow!(
    "Jira credentials not found. Set jira.user in the config and JIRA_API_TOKEN in the environment, \
     or add a .netrc entry for machine '{host}' or '{FALLBACK_NETRC_MACHINE}'."
  ))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use ferry_test_utils::NetrcGuard;

  use super::*;

  fn settings(server: &str) -> JiraSettings {
    JiraSettings::new(server)
  }

  #[test]
  fn test_explicit_settings_win_over_netrc() {
    let guard = NetrcGuard::new("machine company.atlassian.net login netrc-user password netrc-pass\n");
    let mut settings = settings("https://company.atlassian.net");
    settings.user = Some("config-user".to_string());
    settings.api_key = Some("config-token".to_string());

    let creds = resolve_credentials(&settings, guard.home_dir()).unwrap();

    assert_eq!(creds.username, "config-user");
    assert_eq!(creds.password, "config-token");
  }

  #[test]
  fn test_netrc_host_entry() {
    let guard = NetrcGuard::new(
      r#"machine atlassian.net
  login generic@example.com
  password generic-token

machine company.atlassian.net
  login specific@example.com
  password specific-token
"#,
    );

    let creds = resolve_credentials(&settings("https://company.atlassian.net/"), guard.home_dir()).unwrap();

    assert_eq!(creds.username, "specific@example.com");
    assert_eq!(creds.password, "specific-token");
  }

  #[test]
  fn test_netrc_falls_back_to_atlassian_net() {
    let guard = NetrcGuard::new("machine atlassian.net login generic@example.com password generic-token\n");

    let creds = resolve_credentials(&settings("https://other.atlassian.net"), guard.home_dir()).unwrap();

    assert_eq!(creds.username, "generic@example.com");
    assert_eq!(creds.password, "generic-token");
  }

  #[test]
  fn test_partial_settings_use_netrc() {
    let guard = NetrcGuard::new("machine jira.example.com login netrc-user password netrc-pass\n");
    let mut settings = settings("https://jira.example.com");
    settings.user = Some("config-user".to_string());

    let creds = resolve_credentials(&settings, guard.home_dir()).unwrap();

    assert_eq!(creds.username, "netrc-user");
  }

  #[test]
  fn test_missing_credentials_error() {
    let guard = NetrcGuard::new("machine github.com login a password b\n");

    let error = resolve_credentials(&settings("https://jira.example.com"), guard.home_dir()).unwrap_err();

    let message = error.to_string();
    assert!(message.contains("jira.example.com"));
    assert!(message.contains("atlassian.net"));
  }

  #[test]
  fn test_missing_netrc_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    assert!(resolve_credentials(&settings("https://jira.example.com"), temp_dir.path()).is_err());
  }
}
