//! # Jira Comment Endpoints

use crate::endpoints::IssueRepository;
use crate::error::{RepositoryError, RepositoryOperation};
use crate::models::{Comment, CommentRequest, CommentsResponse};
use crate::query;

impl IssueRepository {
  /// Fetch the comments of an issue in the order Jira returns them
  ///
  /// A response without a `comments` array yields an empty list.
  pub async fn fetch_comments(&self, issue_id: &str) -> Result<Vec<Comment>, RepositoryError> {
    let request = query::fetch_comments(&self.endpoint, issue_id);
    let response: CommentsResponse = self.fetch(RepositoryOperation::FetchComments, request).await?;
    Ok(response.comments)
  }

  pub async fn create_comment(&self, issue_id: &str, payload: &CommentRequest) -> Result<(), RepositoryError> {
    let operation = RepositoryOperation::CreateComment;
    let request =
      query::create_comment(&self.endpoint, issue_id, payload).map_err(|e| RepositoryError::new(operation, e))?;
    self.execute(operation, request).await?;
    Ok(())
  }
}
