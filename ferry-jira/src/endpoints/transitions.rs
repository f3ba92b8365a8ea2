use crate::endpoints::IssueRepository;
use crate::error::{RepositoryError, RepositoryOperation};
use crate::models::{Transition, TransitionsResponse};
use crate::query;

impl IssueRepository {
  /// Get available transitions for an issue
  pub async fn fetch_transitions(&self, issue_id: &str) -> Result<Vec<Transition>, RepositoryError> {
    let request = query::fetch_transitions(&self.endpoint, issue_id);
    let response: TransitionsResponse = self.fetch(RepositoryOperation::FetchTransitions, request).await?;
    Ok(response.transitions)
  }

  /// Move an issue along a workflow transition
  pub async fn apply_transition(&self, issue_id: &str, transition_id: &str) -> Result<(), RepositoryError> {
    let operation = RepositoryOperation::ApplyTransition;
    let payload = query::build_transition_payload(transition_id);
    let request =
      query::apply_transition(&self.endpoint, issue_id, &payload).map_err(|e| RepositoryError::new(operation, e))?;
    self.execute(operation, request).await?;
    Ok(())
  }
}
