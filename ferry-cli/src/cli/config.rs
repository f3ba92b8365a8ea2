//! # Config Command
//!
//! Shows and updates `ferry.toml`. The API token is only ever reported as
//! set or unset.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use ferry_core::config::FerryConfig;
use ferry_core::output::{print_info, print_success};
use ferry_core::url::ensure_url_scheme;
use owo_colors::OwoColorize;

use crate::clients;

/// Command for showing or changing configuration
#[derive(Args)]
pub struct ConfigArgs {
  /// Show the current configuration
  #[arg(long)]
  pub show: bool,

  /// Set the Jira host URL (e.g., https://company.atlassian.net)
  #[arg(long, value_name = "URL")]
  pub host: Option<String>,

  /// Set the REST API root (e.g., /rest/api/2)
  #[arg(long, value_name = "PATH")]
  pub api_path: Option<String>,

  /// Set the Jira account name used for authentication
  #[arg(long, value_name = "NAME")]
  pub user: Option<String>,

  /// Set how many issues a migration moves per run
  #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
  pub max_results: Option<u32>,

  /// Set the default source project
  #[arg(long, value_name = "KEY")]
  pub source_project: Option<String>,

  /// Set the default destination project
  #[arg(long, value_name = "KEY")]
  pub destination_project: Option<String>,

  /// Set the request timeout in seconds
  #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
  pub timeout_secs: Option<u64>,
}

impl ConfigArgs {
  fn has_changes(&self) -> bool {
    self.host.is_some()
      || self.api_path.is_some()
      || self.user.is_some()
      || self.max_results.is_some()
      || self.source_project.is_some()
      || self.destination_project.is_some()
      || self.timeout_secs.is_some()
  }
}

pub(crate) fn handle_config_command(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
  if !args.show && !args.has_changes() {
    anyhow::bail!("Please specify --show or a setting to change");
  }

  if args.has_changes() {
    handle_set_config(&args, config_path)?;
  }
  if args.show {
    handle_show_config(config_path)?;
  }

  Ok(())
}

/// Print the effective configuration, including environment overrides
fn handle_show_config(config_path: Option<&Path>) -> Result<()> {
  let path = clients::config_path(config_path)?;
  let mut config = FerryConfig::load_from(&path)?;
  config.apply_process_env();

  let or_unset = |value: &Option<String>| value.clone().unwrap_or_else(|| "Not configured".to_string());

  print_info(&format!("Configuration file: {}", path.display()));
  println!("\n{}", "Jira".bold().underline());
  if config.jira.server.is_empty() {
    println!("  Host: Not configured");
  } else {
    println!("  Host: {}", config.jira.server);
  }
  println!("  API path: {}", config.jira.api_path);
  println!("  User: {}", or_unset(&config.jira.user));
  println!(
    "  API key: {}",
    if config.jira.api_key().is_some() { "<set>" } else { "<unset>" }
  );
  match config.jira.timeout_secs {
    Some(secs) => println!("  Timeout: {secs}s"),
    None => println!("  Timeout: none"),
  }

  println!("\n{}", "Migration".bold().underline());
  println!("  Max results: {}", config.migration.max_results);
  println!("  Source project: {}", or_unset(&config.migration.source_project));
  println!("  Destination project: {}", or_unset(&config.migration.destination_project));

  Ok(())
}

/// Apply the requested changes to the file on disk, without env overrides
fn handle_set_config(args: &ConfigArgs, config_path: Option<&Path>) -> Result<()> {
  let path = clients::config_path(config_path)?;
  let mut config = FerryConfig::load_from(&path)?;
  let mut changes = Vec::new();

  if let Some(host) = &args.host {
    let normalized = ensure_url_scheme(host)?;
    changes.push(format!("host set to: {normalized}"));
    config.jira.server = normalized;
  }
  if let Some(api_path) = &args.api_path {
    let api_path = format!("/{}", api_path.trim().trim_matches('/'));
    changes.push(format!("API path set to: {api_path}"));
    config.jira.api_path = api_path;
  }
  if let Some(user) = &args.user {
    changes.push(format!("user set to: {user}"));
    config.jira.user = Some(user.clone());
  }
  if let Some(timeout) = args.timeout_secs {
    changes.push(format!("timeout set to: {timeout}s"));
    config.jira.timeout_secs = Some(timeout);
  }
  if let Some(max_results) = args.max_results {
    changes.push(format!("max results set to: {max_results}"));
    config.migration.max_results = max_results;
  }
  if let Some(key) = &args.source_project {
    changes.push(format!("source project set to: {key}"));
    config.migration.source_project = Some(key.clone());
  }
  if let Some(key) = &args.destination_project {
    changes.push(format!("destination project set to: {key}"));
    config.migration.destination_project = Some(key.clone());
  }

  config.save_to(&path)?;

  print_success("Configuration updated:");
  for change in changes {
    print_success(&format!("  {change}"));
  }

  Ok(())
}
