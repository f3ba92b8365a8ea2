use std::time::Duration;

use ferry_core::config::JiraSettings;
use ferry_core::creds::Credentials;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, trace};

use crate::consts::USER_AGENT;
use crate::error::JiraError;
use crate::models::JiraAuth;
use crate::query::ApiRequest;

/// Represents a Jira API client
///
/// Every request carries Basic auth and a JSON content type; any response
/// outside 2xx is turned into [`JiraError::Status`].
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(auth: JiraAuth, timeout: Option<Duration>) -> Result<Self, JiraError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(JiraError::Client)?;

    Ok(Self { client, auth })
  }

  /// Execute a request and return the raw response body
  pub async fn send(&self, request: ApiRequest) -> Result<String, JiraError> {
    let ApiRequest { method, url, body } = request;
    let url_text = url.to_string();
    debug!(%method, url = %url_text, "Sending Jira request");

    let mut builder = self
      .client
      .request(method, url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(body) = &body {
      builder = builder.json(body);
    }

    let response = builder.send().await.map_err(|source| JiraError::Transport {
      url: url_text.clone(),
      source,
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|source| JiraError::Transport {
      url: url_text.clone(),
      source,
    })?;
    trace!(status = status.as_u16(), body = %text, "Jira response");

    if !status.is_success() {
      return Err(JiraError::Status {
        url: url_text,
        status: status.as_u16(),
        body: text,
      });
    }

    Ok(text)
  }
}

/// Create a Jira client from configured settings and resolved credentials
pub fn create_jira_client(settings: &JiraSettings, credentials: &Credentials) -> Result<JiraClient, JiraError> {
  let auth = JiraAuth {
    username: credentials.username.clone(),
    api_token: credentials.password.clone(),
  };

  JiraClient::new(auth, settings.timeout())
}
