//! # Jira Errors
//!
//! Typed failures for the transport, the issue repository and the migration
//! run, so callers can branch on the cause instead of matching strings.

use std::fmt;

use thiserror::Error;

/// Broad classification of a failure, independent of which layer raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Network failure, unexpected HTTP status or client setup problem
  Transport,
  /// The response (or the configured endpoint) did not have the expected shape
  DataShape,
}

/// Errors raised while talking to the Jira REST API
#[derive(Debug, Error)]
pub enum JiraError {
  #[error("Failed to build HTTP client")]
  Client(#[source] reqwest::Error),

  #[error("Request to {url} failed")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{}", describe_status(.status, .url, .body))]
  Status { url: String, status: u16, body: String },

  #[error("Unexpected response from {url}")]
  DataShape {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to encode request body")]
  Encode(#[source] serde_json::Error),

  #[error("Invalid Jira endpoint '{url}': {reason}")]
  Endpoint { url: String, reason: String },

  #[error("Jira created an issue but returned no id")]
  EmptyCreatedIssue,
}

impl JiraError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Client(_) | Self::Transport { .. } | Self::Status { .. } => ErrorKind::Transport,
      Self::DataShape { .. } | Self::Encode(_) | Self::Endpoint { .. } | Self::EmptyCreatedIssue => {
        ErrorKind::DataShape
      }
    }
  }

  /// HTTP status of the failed response, if the server answered at all
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

fn describe_status(status: &u16, url: &str, body: &str) -> String {
  match *status {
    401 | 403 => format!("Authentication failed (HTTP {status}). Please check your Jira credentials."),
    404 => format!("Not found (HTTP 404): {url}"),
    _ => format!("Unexpected error: HTTP {status} - {body}"),
  }
}

/// The repository operation that was running when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryOperation {
  FetchIssues,
  FetchComments,
  FetchTransitions,
  CreateIssue,
  CreateComment,
  ApplyTransition,
  DeleteIssue,
}

impl fmt::Display for RepositoryOperation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::FetchIssues => "fetch issues",
      Self::FetchComments => "fetch comments",
      Self::FetchTransitions => "fetch transitions",
      Self::CreateIssue => "create issue",
      Self::CreateComment => "create comment",
      Self::ApplyTransition => "apply transition",
      Self::DeleteIssue => "delete issue",
    };
    f.write_str(name)
  }
}

/// A failed repository round trip
#[derive(Debug, Error)]
#[error("Repository operation failed: {operation}")]
pub struct RepositoryError {
  pub operation: RepositoryOperation,
  #[source]
  pub source: JiraError,
}

impl RepositoryError {
  pub fn new(operation: RepositoryOperation, source: JiraError) -> Self {
    Self { operation, source }
  }

  pub fn kind(&self) -> ErrorKind {
    self.source.kind()
  }
}
