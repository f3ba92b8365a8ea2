use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira issue as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
  pub id: String,
  #[serde(default)]
  pub key: String,
  pub fields: IssueFields,
}

/// Represents the Jira issue fields that survive a migration
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
  pub summary: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub priority: Option<NamedField>,
  pub issuetype: NamedField,
  pub status: NamedField,
}

/// A Jira field that is identified by its name (priority, issue type, status)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
  pub name: String,
}

impl NamedField {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

/// Response envelope of the search endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
  pub issues: Vec<Issue>,
}

/// Represents a Jira comment
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
  #[serde(default)]
  pub id: String,
  pub body: String,
  /// Author is replayed verbatim, so it is kept as raw JSON
  #[serde(default)]
  pub author: serde_json::Value,
  #[serde(with = "jira_timestamp")]
  pub created: DateTime<FixedOffset>,
}

/// Response envelope of the comment endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct CommentsResponse {
  #[serde(default)]
  pub comments: Vec<Comment>,
}

/// Represents a Jira transition
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
  pub id: String,
  #[serde(default)]
  pub name: String,
  pub to: NamedField,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub(crate) struct TransitionsResponse {
  pub transitions: Vec<Transition>,
}

/// The issue reference returned by the create-issue endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub key: String,
}

/// Payload of the create-issue endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
  pub fields: CreateIssueFields,
}

/// Fields copied onto a newly created issue
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueFields {
  pub project: ProjectRef,
  pub summary: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub priority: Option<NamedField>,
  pub issuetype: NamedField,
}

/// Reference to the project a new issue is created in
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRef {
  pub key: String,
}

/// Payload of the create-comment endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
  pub body: String,
  pub author: serde_json::Value,
}

/// Represents a transition request payload
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

/// Represents a transition ID for the request
#[derive(Debug, Clone, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Comment timestamps look like `2024-03-01T09:15:42.123+0000`.
pub mod jira_timestamp {
  use chrono::{DateTime, FixedOffset};
  use serde::{Deserialize, Deserializer};

  pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

  pub fn parse(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(raw, FORMAT)
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
  }
}
