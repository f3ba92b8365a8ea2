//! # Issue Migration
//!
//! Moves issues from one project to another, one issue at a time:
//!
//! 1. create the destination issue from the source fields
//! 2. replay the source comments, oldest first
//! 3. move the destination issue to the source status, if a transition leads
//!    there
//! 4. delete the source issue
//!
//! Deletion is always the last step for an issue, and the next issue is not
//! touched until the previous one has been deleted. The first failure aborts
//! the run; the error still reports which issues made it across.
//!
//! Runs are not idempotent. Re-running after a partial failure recreates
//! (and deletes) whatever is still left in the source project, including an
//! issue whose destination copy was created before the failure.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::endpoints::IssueRepository;
use crate::error::{ErrorKind, RepositoryError, RepositoryOperation};
use crate::models::{Comment, CreatedIssue, Issue, Transition};
use crate::ordering::order_comments;
use crate::query;

/// One source issue that went through the full create/comment/status/delete cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedIssue {
  pub source_id: String,
  pub source_key: String,
  pub destination: CreatedIssue,
  pub comments_copied: usize,
  /// Status the destination issue was moved to, `None` when no transition matched
  pub status: Option<String>,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct MigrationReport {
  pub source_project: String,
  pub destination_project: String,
  pub migrated: Vec<MigratedIssue>,
}

impl MigrationReport {
  /// Identifiers of the created issues, in migration order
  pub fn created_ids(&self) -> Vec<&str> {
    self.migrated.iter().map(|m| m.destination.id.as_str()).collect()
  }
}

/// A source issue together with the comments that would be replayed for it
#[derive(Debug, Clone)]
pub struct PlannedIssue {
  pub issue: Issue,
  pub comments: Vec<Comment>,
}

/// A run that stopped part way
#[derive(Debug, Error)]
#[error("Migration aborted during {}{}: {}", .source.operation, describe_issue(.issue), .source.source)]
pub struct MigrationError {
  /// Source issue being migrated when the failure happened
  pub issue: Option<String>,
  /// Issues that completed their cycle (and were deleted at the source) before the failure
  pub completed: Vec<MigratedIssue>,
  #[source]
  pub source: RepositoryError,
}

impl MigrationError {
  pub fn operation(&self) -> RepositoryOperation {
    self.source.operation
  }

  pub fn kind(&self) -> ErrorKind {
    self.source.kind()
  }
}

fn describe_issue(issue: &Option<String>) -> String {
  match issue {
    Some(issue) => format!(" of {issue}"),
    None => String::new(),
  }
}

/// Pick the first transition whose target status is exactly `status`
pub fn select_transition<'t>(transitions: &'t [Transition], status: &str) -> Option<&'t Transition> {
  transitions.iter().find(|transition| transition.to.name == status)
}

/// Drives migrations over an [`IssueRepository`]
pub struct Migrator<'a> {
  repository: &'a IssueRepository,
}

impl<'a> Migrator<'a> {
  pub fn new(repository: &'a IssueRepository) -> Self {
    Self { repository }
  }

  /// Move the first page of `source_project` issues into `destination_project`
  pub async fn migrate(
    &self,
    source_project: &str,
    destination_project: &str,
  ) -> Result<MigrationReport, MigrationError> {
    info!(
      source = source_project,
      destination = destination_project,
      "Starting migration"
    );

    let issues = self
      .repository
      .fetch_issues(source_project)
      .await
      .map_err(|source| MigrationError {
        issue: None,
        completed: Vec::new(),
        source,
      })?;

    let mut migrated = Vec::with_capacity(issues.len());
    for (index, issue) in issues.iter().enumerate() {
      debug!(issue = %issue_label(issue), position = index + 1, total = issues.len(), "Migrating issue");

      match self.migrate_issue(issue, destination_project).await {
        Ok(record) => {
          info!(
            source = %record.source_key,
            destination = %record.destination.key,
            comments = record.comments_copied,
            "Issue migrated"
          );
          migrated.push(record);
        }
        Err(source) => {
          warn!(
            issue = %issue_label(issue),
            completed = migrated.len(),
            error = %source,
            "Migration aborted"
          );
          return Err(MigrationError {
            issue: Some(issue_label(issue).to_string()),
            completed: migrated,
            source,
          });
        }
      }
    }

    info!(count = migrated.len(), "Migration finished");
    Ok(MigrationReport {
      source_project: source_project.to_string(),
      destination_project: destination_project.to_string(),
      migrated,
    })
  }

  /// Fetch what a migration would move, without writing anything
  pub async fn preview(&self, source_project: &str) -> Result<Vec<PlannedIssue>, RepositoryError> {
    let issues = self.repository.fetch_issues(source_project).await?;

    let mut planned = Vec::with_capacity(issues.len());
    for issue in issues {
      let comments = order_comments(self.repository.fetch_comments(&issue.id).await?);
      planned.push(PlannedIssue { issue, comments });
    }
    Ok(planned)
  }

  async fn migrate_issue(&self, issue: &Issue, destination_project: &str) -> Result<MigratedIssue, RepositoryError> {
    let payload = query::build_issue_payload(issue, destination_project);
    let destination = self.repository.create_issue(&payload).await?;
    debug!(source = %issue_label(issue), destination = %destination.key, "Created destination issue");

    let comments = order_comments(self.repository.fetch_comments(&issue.id).await?);
    for comment in &comments {
      let payload = query::build_comment_payload(comment);
      self.repository.create_comment(&destination.id, &payload).await?;
    }

    let status = self.transfer_status(issue, &destination).await?;

    self.repository.delete_issue(&issue.id).await?;
    debug!(source = %issue_label(issue), "Deleted source issue");

    Ok(MigratedIssue {
      source_id: issue.id.clone(),
      source_key: issue_label(issue).to_string(),
      destination,
      comments_copied: comments.len(),
      status,
    })
  }

  async fn transfer_status(&self, issue: &Issue, destination: &CreatedIssue) -> Result<Option<String>, RepositoryError> {
    let wanted = issue.fields.status.name.as_str();
    let transitions = self.repository.fetch_transitions(&destination.id).await?;

    match select_transition(&transitions, wanted) {
      Some(transition) => {
        self.repository.apply_transition(&destination.id, &transition.id).await?;
        Ok(Some(transition.to.name.clone()))
      }
      None => {
        debug!(
          issue = %destination.key,
          status = wanted,
          "No transition leads to the source status, leaving status unchanged"
        );
        Ok(None)
      }
    }
  }
}

fn issue_label(issue: &Issue) -> &str {
  if issue.key.is_empty() { &issue.id } else { &issue.key }
}
