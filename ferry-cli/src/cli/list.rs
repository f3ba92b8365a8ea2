//! # List Command
//!
//! Shows the issues a migration would pick up, without touching them.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use ferry_core::output::{format_issue_key, format_status, print_header, print_info};
use ferry_jira::Issue;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::clients;

/// Command for listing project issues
#[derive(Args)]
pub struct ListArgs {
  /// Project key to list (e.g. OLD)
  #[arg(index = 1, value_name = "PROJECT")]
  pub project: String,

  /// Number of issues to fetch (defaults to migration.max_results)
  #[arg(long, value_name = "N")]
  pub max_results: Option<u32>,
}

#[derive(Tabled)]
struct IssueRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Type")]
  issue_type: String,
  #[tabled(rename = "Priority")]
  priority: String,
  #[tabled(rename = "Status")]
  status: String,
}

impl From<&Issue> for IssueRow {
  fn from(issue: &Issue) -> Self {
    Self {
      key: format_issue_key(&issue.key),
      summary: issue.fields.summary.clone(),
      issue_type: issue.fields.issuetype.name.clone(),
      priority: issue
        .fields
        .priority
        .as_ref()
        .map_or_else(|| "None".to_string(), |p| p.name.clone()),
      status: format_status(&issue.fields.status.name),
    }
  }
}

pub(crate) fn handle_list_command(args: ListArgs, config_path: Option<&Path>) -> Result<()> {
  let config = clients::load_effective_config(config_path)?;
  let (rt, repository) = clients::create_runtime_and_repository(&config, args.max_results)?;

  let issues = rt.block_on(repository.fetch_issues(&args.project))?;

  print_header(&format!("Issues in {}", args.project));
  if issues.is_empty() {
    print_info("No issues found");
    return Ok(());
  }

  let rows: Vec<IssueRow> = issues.iter().map(IssueRow::from).collect();
  println!("\n{}", Table::new(rows).with(Style::sharp()));

  Ok(())
}
