//! Constants for the ferry-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("ferry/", env!("CARGO_PKG_VERSION"));
