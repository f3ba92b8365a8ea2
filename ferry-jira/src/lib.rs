//! # Jira Migration Client
//!
//! Jira REST API integration for moving issues between projects: request
//! construction, an authenticated transport, issue/comment/transition
//! operations, and the migration run that ties them together.

mod client;
pub mod consts;
mod endpoints;
pub mod error;
pub mod migration;
pub mod models;
pub mod ordering;
pub mod query;

// Re-export the client and repository
pub use client::{JiraClient, create_jira_client};
pub use endpoints::IssueRepository;
pub use error::{ErrorKind, JiraError, RepositoryError, RepositoryOperation};
pub use migration::{MigratedIssue, MigrationError, MigrationReport, Migrator, PlannedIssue, select_transition};
// Re-export models
pub use models::{
  Comment, CommentRequest, CreateIssueRequest, CreatedIssue, Issue, IssueFields, JiraAuth, NamedField, Transition,
  TransitionId, TransitionRequest,
};
pub use ordering::order_comments;
pub use query::{ApiEndpoint, ApiRequest};
