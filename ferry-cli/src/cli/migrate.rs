//! # Migrate Command
//!
//! Runs a migration (or a read-only preview of one) and renders the outcome.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use ferry_core::config::FerryConfig;
use ferry_core::output::{
  format_command, format_issue_key, format_status, print_error, print_header, print_info, print_success, print_warning,
};
use ferry_jira::{MigratedIssue, Migrator, PlannedIssue};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::clients;

/// Command for moving issues between projects
#[derive(Args)]
pub struct MigrateArgs {
  /// Project to move issues out of (defaults to migration.source_project)
  #[arg(index = 1, value_name = "SOURCE")]
  pub source: Option<String>,

  /// Project to move issues into (defaults to migration.destination_project)
  #[arg(index = 2, value_name = "DESTINATION")]
  pub destination: Option<String>,

  /// Number of issues to move in this run (defaults to migration.max_results)
  #[arg(long, value_name = "N")]
  pub max_results: Option<u32>,

  /// Show what would be moved without creating or deleting anything
  #[arg(long, short = 'n')]
  pub dry_run: bool,
}

#[derive(Tabled)]
struct MigratedRow {
  #[tabled(rename = "Source")]
  source: String,
  #[tabled(rename = "Destination")]
  destination: String,
  #[tabled(rename = "Comments")]
  comments: usize,
  #[tabled(rename = "Status")]
  status: String,
}

impl From<&MigratedIssue> for MigratedRow {
  fn from(record: &MigratedIssue) -> Self {
    Self {
      source: record.source_key.clone(),
      destination: format_issue_key(&record.destination.key),
      comments: record.comments_copied,
      status: record
        .status
        .as_deref()
        .map_or_else(|| "unchanged".to_string(), format_status),
    }
  }
}

#[derive(Tabled)]
struct PlannedRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Status")]
  status: String,
  #[tabled(rename = "Comments")]
  comments: usize,
}

impl From<&PlannedIssue> for PlannedRow {
  fn from(planned: &PlannedIssue) -> Self {
    Self {
      key: format_issue_key(&planned.issue.key),
      summary: planned.issue.fields.summary.clone(),
      status: format_status(&planned.issue.fields.status.name),
      comments: planned.comments.len(),
    }
  }
}

/// Source and destination keys after falling back to the configured defaults
fn resolve_projects(args: &MigrateArgs, config: &FerryConfig) -> Result<(String, String)> {
  let pick = |arg: &Option<String>, configured: &Option<String>| {
    arg
      .as_deref()
      .or(configured.as_deref())
      .map(str::trim)
      .filter(|key| !key.is_empty())
      .map(str::to_string)
  };

  let Some(source) = pick(&args.source, &config.migration.source_project) else {
    anyhow::bail!("No source project given. Pass SOURCE or set migration.source_project in the config.");
  };
  let Some(destination) = pick(&args.destination, &config.migration.destination_project) else {
    anyhow::bail!("No destination project given. Pass DESTINATION or set migration.destination_project in the config.");
  };
  if source.eq_ignore_ascii_case(&destination) {
    anyhow::bail!("Source and destination project are both '{source}'");
  }

  Ok((source, destination))
}

pub(crate) fn handle_migrate_command(args: MigrateArgs, config_path: Option<&Path>) -> Result<()> {
  let config = clients::load_effective_config(config_path)?;
  let (source, destination) = resolve_projects(&args, &config)?;
  let (rt, repository) = clients::create_runtime_and_repository(&config, args.max_results)?;
  let migrator = Migrator::new(&repository);

  if args.dry_run {
    let planned = rt.block_on(migrator.preview(&source))?;
    print_info(&format!(
      "Dry run: {} issue(s) would move from {source} to {destination}",
      planned.len()
    ));
    if !planned.is_empty() {
      let rows: Vec<PlannedRow> = planned.iter().map(PlannedRow::from).collect();
      println!("\n{}", Table::new(rows).with(Style::sharp()));
    }
    return Ok(());
  }

  match rt.block_on(migrator.migrate(&source, &destination)) {
    Ok(report) => {
      if report.migrated.is_empty() {
        print_info(&format!("No issues found in {source}, nothing to migrate"));
        return Ok(());
      }

      print_header(&format!("Migrated {source} → {destination}"));
      let rows: Vec<MigratedRow> = report.migrated.iter().map(MigratedRow::from).collect();
      println!("\n{}", Table::new(rows).with(Style::sharp()));

      let unchanged = report.migrated.iter().filter(|m| m.status.is_none()).count();
      if unchanged > 0 {
        print_warning(&format!(
          "{unchanged} issue(s) kept their default status; no transition matched the source status"
        ));
      }
      print_success(&format!("Moved {} issue(s) to {destination}", report.migrated.len()));
      Ok(())
    }
    Err(error) => {
      if !error.completed.is_empty() {
        print_header("Completed before the failure");
        let rows: Vec<MigratedRow> = error.completed.iter().map(MigratedRow::from).collect();
        println!("\n{}", Table::new(rows).with(Style::sharp()));
      }

      print_error(&format!("Failed to {}", error.operation()));
      if let Some(issue) = &error.issue {
        print_error(&format!("Issue: {issue}"));
      }
      print_error(&format!("Completed before failure: {}", error.completed.len()));
      print_info(&format!(
        "Runs are not idempotent: check {destination} for a partial copy before running {} again",
        format_command("ferry migrate")
      ));

      Err(error.into())
    }
  }
}
