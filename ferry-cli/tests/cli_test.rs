use std::fs;
use std::path::Path;
use std::process::Output;

use anyhow::Result;
use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use ferry_test_utils::jira::{
  comment_json, comments_json, created_issue_json, issue_json, search_json, transition_json, transitions_json,
};
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `ferry` command isolated from the caller's config, home and Jira env
fn ferry(home: &Path) -> Command {
  let mut cmd = cargo_bin_cmd!("ferry");
  cmd
    .env("HOME", home)
    .env("XDG_CONFIG_HOME", home.join("config"))
    .env("NO_COLOR", "1")
    .env_remove("JIRA_HOST")
    .env_remove("JIRA_USER")
    .env_remove("JIRA_API_TOKEN")
    .env_remove("RUST_LOG");
  cmd
}

/// A `ferry` command pointed at a mock Jira with credentials in the environment
fn ferry_against(home: &Path, server: &MockServer) -> Command {
  let mut cmd = ferry(home);
  cmd
    .env("JIRA_HOST", server.uri())
    .env("JIRA_USER", "test_user")
    .env("JIRA_API_TOKEN", "test_token")
    .arg("--config")
    .arg(home.join("ferry.toml"));
  cmd
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> Result<Output> {
  Ok(tokio::task::spawn_blocking(move || cmd.output()).await??)
}

async fn mount_source_issue(server: &MockServer) {
  Mock::given(method("GET"))
    .and(path("/rest/api/2/search"))
    .and(query_param("jql", "project=OLD"))
    .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![issue_json(
      "10001", "OLD-1", "First", "Done",
    )])))
    .mount(server)
    .await;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/10001/comment"))
    .respond_with(ResponseTemplate::new(200).set_body_json(comments_json(vec![
      comment_json("2", "second", "2024-01-02T09:00:00.000+0000"),
      comment_json("1", "first", "2024-01-01T09:00:00.000+0000"),
    ])))
    .mount(server)
    .await;
}

#[test]
fn test_help_lists_commands() {
  let temp_dir = TempDir::new().unwrap();

  ferry(temp_dir.path())
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("migrate"))
    .stdout(predicate::str::contains("list"))
    .stdout(predicate::str::contains("config"));
}

#[test]
fn test_migrate_without_host_fails() {
  let temp_dir = TempDir::new().unwrap();

  ferry(temp_dir.path())
    .args(["migrate", "OLD", "NEW"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Jira host is not configured"));
}

#[test]
fn test_config_round_trip_hides_api_key() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let config_path = temp_dir.path().join("ferry.toml");

  ferry(temp_dir.path())
    .arg("--config")
    .arg(&config_path)
    .args(["config", "--host", "company.atlassian.net", "--user", "me@example.com", "--max-results", "3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("host set to: https://company.atlassian.net"));

  // Token added by hand, as documented
  let mut content = fs::read_to_string(&config_path)?;
  content = content.replace("[jira]\n", "[jira]\napi_key = \"super-secret-token\"\n");
  fs::write(&config_path, content)?;

  ferry(temp_dir.path())
    .arg("--config")
    .arg(&config_path)
    .args(["config", "--show"])
    .assert()
    .success()
    .stdout(predicate::str::contains("https://company.atlassian.net"))
    .stdout(predicate::str::contains("me@example.com"))
    .stdout(predicate::str::contains("Max results: 3"))
    .stdout(predicate::str::contains("<set>"))
    .stdout(predicate::str::contains("super-secret-token").not());

  Ok(())
}

#[test]
fn test_config_blank_api_key_shows_unset() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let config_path = temp_dir.path().join("ferry.toml");
  fs::write(&config_path, "[jira]\nserver = \"https://company.atlassian.net\"\napi_key = \"\"\n")?;

  ferry(temp_dir.path())
    .arg("--config")
    .arg(&config_path)
    .args(["config", "--show"])
    .assert()
    .success()
    .stdout(predicate::str::contains("API key: <unset>"));

  Ok(())
}

#[test]
fn test_config_without_flags_fails() {
  let temp_dir = TempDir::new().unwrap();

  ferry(temp_dir.path())
    .arg("config")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Please specify --show or a setting to change"));
}

#[test]
fn test_config_rejects_zero_timeout() {
  let temp_dir = TempDir::new().unwrap();
  let config_path = temp_dir.path().join("ferry.toml");

  ferry(temp_dir.path())
    .arg("--config")
    .arg(&config_path)
    .args(["config", "--timeout-secs", "0"])
    .assert()
    .failure();

  assert!(!config_path.exists());
}

#[test]
fn test_config_rejects_api_key_flag() {
  let temp_dir = TempDir::new().unwrap();

  ferry(temp_dir.path())
    .args(["config", "--api-key", "secret"])
    .assert()
    .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_migrate_moves_issue() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let server = MockServer::start().await;
  mount_source_issue(&server).await;

  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue"))
    .respond_with(ResponseTemplate::new(201).set_body_json(created_issue_json("20001", "NEW-1")))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue/20001/comment"))
    .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "id": "9" })))
    .expect(2)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/20001/transitions"))
    .respond_with(ResponseTemplate::new(200).set_body_json(transitions_json(vec![
      transition_json("11", "In Progress"),
      transition_json("31", "Done"),
    ])))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue/20001/transitions"))
    .respond_with(ResponseTemplate::new(204))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("DELETE"))
    .and(path("/rest/api/2/issue/10001"))
    .respond_with(ResponseTemplate::new(204))
    .expect(1)
    .mount(&server)
    .await;

  let mut cmd = ferry_against(temp_dir.path(), &server);
  cmd.args(["migrate", "OLD", "NEW"]);
  let output = run(cmd).await?;

  output
    .assert()
    .success()
    .stdout(predicate::str::contains("OLD-1"))
    .stdout(predicate::str::contains("NEW-1"))
    .stdout(predicate::str::contains("Moved 1 issue(s) to NEW"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_migrate_failure_reports_progress_and_keeps_source() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let server = MockServer::start().await;
  mount_source_issue(&server).await;

  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue"))
    .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
    .mount(&server)
    .await;
  Mock::given(method("DELETE"))
    .respond_with(ResponseTemplate::new(204))
    .expect(0)
    .mount(&server)
    .await;

  let mut cmd = ferry_against(temp_dir.path(), &server);
  cmd.args(["migrate", "OLD", "NEW"]);
  let output = run(cmd).await?;

  output
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to create issue"))
    .stderr(predicate::str::contains("OLD-1"))
    .stderr(predicate::str::contains("Completed before failure: 0"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_migrate_dry_run_writes_nothing() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let server = MockServer::start().await;
  mount_source_issue(&server).await;

  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(201))
    .expect(0)
    .mount(&server)
    .await;
  Mock::given(method("DELETE"))
    .respond_with(ResponseTemplate::new(204))
    .expect(0)
    .mount(&server)
    .await;

  let mut cmd = ferry_against(temp_dir.path(), &server);
  cmd.args(["migrate", "OLD", "NEW", "--dry-run"]);
  let output = run(cmd).await?;

  output
    .assert()
    .success()
    .stdout(predicate::str::contains("1 issue(s) would move from OLD to NEW"))
    .stdout(predicate::str::contains("First"));

  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_shows_issues() -> Result<()> {
  let temp_dir = TempDir::new()?;
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/search"))
    .and(query_param("jql", "project=OLD"))
    .and(query_param("maxResults", "2"))
    .respond_with(ResponseTemplate::new(200).set_body_json(search_json(vec![
      issue_json("10001", "OLD-1", "First", "Done"),
      issue_json("10002", "OLD-2", "Second", "To Do"),
    ])))
    .expect(1)
    .mount(&server)
    .await;

  let mut cmd = ferry_against(temp_dir.path(), &server);
  cmd.args(["list", "OLD", "--max-results", "2"]);
  let output = run(cmd).await?;

  output
    .assert()
    .success()
    .stdout(predicate::str::contains("OLD-1"))
    .stdout(predicate::str::contains("Second"))
    .stdout(predicate::str::contains("Medium"));

  Ok(())
}
