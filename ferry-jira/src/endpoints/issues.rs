//! # Jira Issue Endpoints
//!
//! Searching a project, creating issues and deleting them.

use tracing::debug;

use crate::endpoints::IssueRepository;
use crate::error::{JiraError, RepositoryError, RepositoryOperation};
use crate::models::{CreateIssueRequest, CreatedIssue, Issue, SearchResponse};
use crate::query;

impl IssueRepository {
  /// Fetch the first page of issues belonging to `project_key`
  pub async fn fetch_issues(&self, project_key: &str) -> Result<Vec<Issue>, RepositoryError> {
    let request = query::search_issues_by_project(&self.endpoint, project_key, self.max_results);
    let response: SearchResponse = self.fetch(RepositoryOperation::FetchIssues, request).await?;
    debug!(project = project_key, count = response.issues.len(), "Fetched issues");
    Ok(response.issues)
  }

  /// Create an issue and return the reference Jira assigned to it
  pub async fn create_issue(&self, payload: &CreateIssueRequest) -> Result<CreatedIssue, RepositoryError> {
    let operation = RepositoryOperation::CreateIssue;
    let request = query::create_issue(&self.endpoint, payload).map_err(|e| RepositoryError::new(operation, e))?;
    let created: CreatedIssue = self.fetch(operation, request).await?;
    if created.id.is_empty() {
      return Err(RepositoryError::new(operation, JiraError::EmptyCreatedIssue));
    }
    Ok(created)
  }

  pub async fn delete_issue(&self, issue_id: &str) -> Result<(), RepositoryError> {
    let request = query::delete_issue(&self.endpoint, issue_id);
    self.execute(RepositoryOperation::DeleteIssue, request).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use ferry_test_utils::jira::{issue_json, search_json};
  use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::endpoints::test_support::repository_for;
  use crate::error::{ErrorKind, JiraError, RepositoryOperation};
  use crate::models::NamedField;
  use crate::query::build_issue_payload;

  #[tokio::test]
  async fn test_fetch_issues() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("jql", "project=LBN"))
      .and(query_param("maxResults", "5"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![
        issue_json("10001", "LBN-1", "First", "Done"),
        issue_json("10002", "LBN-2", "Second", "To Do"),
      ])))
      .mount(&mock_server)
      .await;

    let issues = repository.fetch_issues("LBN").await?;

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].id, "10001");
    assert_eq!(issues[0].fields.summary, "First");
    assert_eq!(issues[0].fields.priority, Some(NamedField::new("Medium")));
    assert_eq!(issues[1].fields.status.name, "To Do");

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_issues_respects_max_results() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server).with_max_results(2);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .and(query_param("maxResults", "2"))
      .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![])))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert!(repository.fetch_issues("LBN").await?.is_empty());

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_issues_missing_array_is_data_shape_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "total": 0 })))
      .mount(&mock_server)
      .await;

    let error = repository.fetch_issues("LBN").await.unwrap_err();

    assert_eq!(error.operation, RepositoryOperation::FetchIssues);
    assert_eq!(error.kind(), ErrorKind::DataShape);

    Ok(())
  }

  #[tokio::test]
  async fn test_fetch_issues_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/rest/api/2/search"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "errorMessages": ["Authentication failed"],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let error = repository.fetch_issues("LBN").await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Transport);
    assert_eq!(error.source.status(), Some(401));
    assert!(error.source.to_string().contains("Authentication failed"));

    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    let source: crate::models::Issue = serde_json::from_value(issue_json("10001", "LBN-1", "First", "Done"))?;
    let payload = build_issue_payload(&source, "DST");

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .and(body_json(serde_json::to_value(&payload)?))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
          "id": "20001",
          "key": "DST-1",
          "self": "https://example.atlassian.net/rest/api/2/issue/20001"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let created = repository.create_issue(&payload).await?;

    assert_eq!(created.id, "20001");
    assert_eq!(created.key, "DST-1");

    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_without_id_is_rejected() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    let source: crate::models::Issue = serde_json::from_value(issue_json("10001", "LBN-1", "First", "Done"))?;

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue"))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
      .mount(&mock_server)
      .await;

    let error = repository
      .create_issue(&build_issue_payload(&source, "DST"))
      .await
      .unwrap_err();

    assert!(matches!(error.source, JiraError::EmptyCreatedIssue));

    Ok(())
  }

  #[tokio::test]
  async fn test_delete_issue() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    Mock::given(method("DELETE"))
      .and(path("/rest/api/2/issue/10001"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    repository.delete_issue("10001").await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_delete_issue_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let repository = repository_for(&mock_server);

    Mock::given(method("DELETE"))
      .and(path("/rest/api/2/issue/NONEXISTENT"))
      .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
          "errorMessages": ["Issue does not exist or you do not have permission to see it."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let error = repository.delete_issue("NONEXISTENT").await.unwrap_err();

    assert_eq!(error.operation, RepositoryOperation::DeleteIssue);
    assert!(error.source.to_string().contains("Not found"));

    Ok(())
  }
}
