//! URL helpers for the configured Jira host.

use anyhow::Result;
use url::{Position, Url};

/// Render a URL without the lone trailing slash `Url` adds to bare hosts.
fn normalize_url(url: &Url) -> String {
  let mut result = url[..Position::BeforePath].to_string();

  let path = url.path();
  if path != "/" {
    result.push_str(path.trim_end_matches('/'));
  }

  result
}

/// Ensure a host has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Also repairs
/// single-slash schemes such as `https:/example.com`. Query strings and
/// fragments are dropped since the value is used as a REST root.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let (scheme, remainder) = if lowered.starts_with("http:") {
    ("http", &trimmed["http:".len()..])
  } else if lowered.starts_with("https:") {
    ("https", &trimmed["https:".len()..])
  } else {
    ("https", trimmed)
  };

  let candidate = format!("{scheme}://{}", remainder.trim_start_matches('/'));
  let url = Url::parse(&candidate).map_err(|e| anyhow::anyhow!("Failed to parse URL '{input}': {e}"))?;
  if url.host().is_none() {
    return Err(anyhow::anyhow!("URL '{input}' has no host"));
  }

  Ok(normalize_url(&url))
}

/// Strip scheme and trailing slashes so a host can be matched against
/// `.netrc` machine entries.
pub fn normalize_host(raw_host: &str) -> String {
  let host = raw_host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://")
    .trim_end_matches('/');
  host.split('/').next().unwrap_or(host).to_string()
}
