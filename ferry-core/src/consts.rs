//! Core constants shared across ferry components.

/// Environment variable for the Jira host URL.
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";

/// Environment variable for the Jira account name used for Basic auth.
pub const ENV_JIRA_USER: &str = "JIRA_USER";

/// Environment variable for the Jira API token used for Basic auth.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// REST root appended to the configured host.
pub const DEFAULT_API_PATH: &str = "/rest/api/2";

/// Number of issues fetched per migration run.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "ferry.toml";

/// `.netrc` machine consulted when no entry matches the configured host.
pub const FALLBACK_NETRC_MACHINE: &str = "atlassian.net";
