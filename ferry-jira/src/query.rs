//! # Request Construction
//!
//! Pure functions that turn an operation and its parameters into a fully
//! qualified request against the configured Jira REST root. Nothing here
//! touches the network.

use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::JiraError;
use crate::models::{
  Comment, CommentRequest, CreateIssueFields, CreateIssueRequest, Issue, ProjectRef, TransitionId, TransitionRequest,
};

/// Server URL plus the REST base path every request is rooted at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
  base: Url,
}

impl ApiEndpoint {
  /// Combine a server URL (`https://example.atlassian.net`) with an API base
  /// path (`/rest/api/2`, `/rest/agile/1.0`).
  pub fn new(server: &str, api_path: &str) -> Result<Self, JiraError> {
    let invalid = |reason: &str| JiraError::Endpoint {
      url: server.to_string(),
      reason: reason.to_string(),
    };

    let mut base = Url::parse(server).map_err(|e| invalid(&e.to_string()))?;
    if base.cannot_be_a_base() {
      return Err(invalid("URL cannot be used as a base"));
    }
    base.set_query(None);
    base.set_fragment(None);

    {
      let mut segments = base
        .path_segments_mut()
        .map_err(|()| invalid("URL cannot be used as a base"))?;
      segments.pop_if_empty();
      segments.extend(api_path.split('/').filter(|s| !s.is_empty()));
    }

    Ok(Self { base })
  }

  /// The REST root all operations are resolved against
  pub fn base(&self) -> &Url {
    &self.base
  }

  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty();
      path.extend(segments);
    }
    url
  }
}

/// A request descriptor ready to be handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub url: Url,
  pub body: Option<serde_json::Value>,
}

impl ApiRequest {
  fn get(url: Url) -> Self {
    Self {
      method: Method::GET,
      url,
      body: None,
    }
  }

  fn delete(url: Url) -> Self {
    Self {
      method: Method::DELETE,
      url,
      body: None,
    }
  }

  fn post<T: Serialize>(url: Url, payload: &T) -> Result<Self, JiraError> {
    let body = serde_json::to_value(payload).map_err(JiraError::Encode)?;
    Ok(Self {
      method: Method::POST,
      url,
      body: Some(body),
    })
  }
}

/// `GET {base}/search?jql=project=<key>&maxResults=<n>`
pub fn search_issues_by_project(endpoint: &ApiEndpoint, project_key: &str, max_results: u32) -> ApiRequest {
  let mut url = endpoint.url(&["search"]);
  url
    .query_pairs_mut()
    .append_pair("jql", &format!("project={project_key}"))
    .append_pair("maxResults", &max_results.to_string());
  ApiRequest::get(url)
}

/// `GET {base}/issue/{id}/comment`
pub fn fetch_comments(endpoint: &ApiEndpoint, issue_id: &str) -> ApiRequest {
  ApiRequest::get(endpoint.url(&["issue", issue_id, "comment"]))
}

/// `POST {base}/issue/{id}/comment`
pub fn create_comment(endpoint: &ApiEndpoint, issue_id: &str, payload: &CommentRequest) -> Result<ApiRequest, JiraError> {
  ApiRequest::post(endpoint.url(&["issue", issue_id, "comment"]), payload)
}

/// `GET {base}/issue/{id}/transitions`
pub fn fetch_transitions(endpoint: &ApiEndpoint, issue_id: &str) -> ApiRequest {
  ApiRequest::get(endpoint.url(&["issue", issue_id, "transitions"]))
}

/// `POST {base}/issue/{id}/transitions`
pub fn apply_transition(
  endpoint: &ApiEndpoint,
  issue_id: &str,
  payload: &TransitionRequest,
) -> Result<ApiRequest, JiraError> {
  ApiRequest::post(endpoint.url(&["issue", issue_id, "transitions"]), payload)
}

/// `POST {base}/issue`
pub fn create_issue(endpoint: &ApiEndpoint, payload: &CreateIssueRequest) -> Result<ApiRequest, JiraError> {
  ApiRequest::post(endpoint.url(&["issue"]), payload)
}

/// `DELETE {base}/issue/{id}`
pub fn delete_issue(endpoint: &ApiEndpoint, issue_id: &str) -> ApiRequest {
  ApiRequest::delete(endpoint.url(&["issue", issue_id]))
}

/// Copy the migrated fields of `issue` into a create payload for `destination_key`
pub fn build_issue_payload(issue: &Issue, destination_key: &str) -> CreateIssueRequest {
  CreateIssueRequest {
    fields: CreateIssueFields {
      project: ProjectRef {
        key: destination_key.to_string(),
      },
      summary: issue.fields.summary.clone(),
      description: issue.fields.description.clone(),
      priority: issue.fields.priority.clone(),
      issuetype: issue.fields.issuetype.clone(),
    },
  }
}

pub fn build_comment_payload(comment: &Comment) -> CommentRequest {
  CommentRequest {
    body: comment.body.clone(),
    author: comment.author.clone(),
  }
}

pub fn build_transition_payload(transition_id: &str) -> TransitionRequest {
  TransitionRequest {
    transition: TransitionId {
      id: transition_id.to_string(),
    },
  }
}
