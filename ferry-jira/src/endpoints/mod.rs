//! # Issue Repository
//!
//! Domain operations over the Jira REST API. Each operation is exactly one
//! round trip: build the request, send it, decode the interesting part of the
//! body. Failures are wrapped once in [`RepositoryError`]; nothing is retried.

pub mod comments;
pub mod issues;
pub mod transitions;

use ferry_core::config::JiraSettings;
use ferry_core::consts::DEFAULT_MAX_RESULTS;
use ferry_core::creds::Credentials;
use serde::de::DeserializeOwned;

use crate::client::{JiraClient, create_jira_client};
use crate::error::{JiraError, RepositoryError, RepositoryOperation};
use crate::query::{ApiEndpoint, ApiRequest};

/// Issue-level operations against one Jira REST root
///
/// The repository owns its transport, so dropping it releases the underlying
/// connection pool.
pub struct IssueRepository {
  pub(crate) client: JiraClient,
  pub(crate) endpoint: ApiEndpoint,
  pub(crate) max_results: u32,
}

impl IssueRepository {
  pub fn new(client: JiraClient, endpoint: ApiEndpoint) -> Self {
    Self {
      client,
      endpoint,
      max_results: DEFAULT_MAX_RESULTS,
    }
  }

  /// Build a repository (and its transport) straight from configuration
  pub fn connect(settings: &JiraSettings, credentials: &Credentials) -> Result<Self, JiraError> {
    let endpoint = ApiEndpoint::new(&settings.server, &settings.api_path)?;
    let client = create_jira_client(settings, credentials)?;
    Ok(Self::new(client, endpoint))
  }

  /// Page size used when searching a project
  pub fn with_max_results(mut self, max_results: u32) -> Self {
    self.max_results = max_results;
    self
  }

  pub fn max_results(&self) -> u32 {
    self.max_results
  }

  pub fn endpoint(&self) -> &ApiEndpoint {
    &self.endpoint
  }

  /// Send a request and hand back the raw body
  pub(crate) async fn execute(&self, operation: RepositoryOperation, request: ApiRequest) -> Result<String, RepositoryError> {
    self
      .client
      .send(request)
      .await
      .map_err(|e| RepositoryError::new(operation, e))
  }

  /// Send a request and decode the JSON body into `T`
  pub(crate) async fn fetch<T: DeserializeOwned>(
    &self,
    operation: RepositoryOperation,
    request: ApiRequest,
  ) -> Result<T, RepositoryError> {
    let url = request.url.to_string();
    let body = self.execute(operation, request).await?;
    decode(&url, &body).map_err(|e| RepositoryError::new(operation, e))
  }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, JiraError> {
  serde_json::from_str(body).map_err(|source| JiraError::DataShape {
    url: url.to_string(),
    source,
  })
}
