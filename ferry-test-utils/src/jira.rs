//! Jira REST API v2 response bodies for mock servers

use serde_json::{Value, json};

/// An issue as returned inside a search result
pub fn issue_json(id: &str, key: &str, summary: &str, status: &str) -> Value {
  json!({
      "id": id,
      "key": key,
      "self": format!("https://example.atlassian.net/rest/api/2/issue/{id}"),
      "fields": {
          "summary": summary,
          "description": format!("Description of {summary}"),
          "priority": { "id": "3", "name": "Medium" },
          "issuetype": { "id": "10002", "name": "Task" },
          "status": { "id": "1", "name": status }
      }
  })
}

/// A search response wrapping the given issues
pub fn search_json(issues: Vec<Value>) -> Value {
  json!({
      "startAt": 0,
      "maxResults": 5,
      "total": issues.len(),
      "issues": issues
  })
}

/// A comment with a Jira formatted `created` timestamp
pub fn comment_json(id: &str, body: &str, created: &str) -> Value {
  json!({
      "id": id,
      "body": body,
      "author": {
          "accountId": "557058:test-user",
          "displayName": "Test User",
          "active": true
      },
      "created": created,
      "updated": created
  })
}

/// A comments page wrapping the given comments
pub fn comments_json(comments: Vec<Value>) -> Value {
  json!({
      "startAt": 0,
      "maxResults": 50,
      "total": comments.len(),
      "comments": comments
  })
}

/// A workflow transition leading to `to_name`
pub fn transition_json(id: &str, to_name: &str) -> Value {
  json!({
      "id": id,
      "name": format!("Move to {to_name}"),
      "to": { "id": format!("status-{id}"), "name": to_name }
  })
}

/// A transitions response wrapping the given transitions
pub fn transitions_json(transitions: Vec<Value>) -> Value {
  json!({ "transitions": transitions })
}

/// The body Jira answers an issue creation with
pub fn created_issue_json(id: &str, key: &str) -> Value {
  json!({
      "id": id,
      "key": key,
      "self": format!("https://example.atlassian.net/rest/api/2/issue/{id}")
  })
}
