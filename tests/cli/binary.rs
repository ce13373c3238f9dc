//! The compiled binary, pointed at a mock GitHub API

use crate::common::github_mock::GithubMock;
use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

struct Run {
    output: Output,
    _config_home: TempDir,
}

impl Run {
    fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout should be JSON")
    }
}

// Logging off, so stdout holds only the report
async fn run_envscan(github: &GithubMock, extra: &[&str]) -> Run {
    let mut args = vec!["--log-level", "off"];
    args.extend_from_slice(extra);
    run_with_default_logging(github, &args).await
}

// Runs off the async runtime so the mock server keeps answering
async fn run_with_default_logging(github: &GithubMock, extra: &[&str]) -> Run {
    let config_home = tempfile::tempdir().expect("temp dir");
    let config_path = config_home.path().join("envscan.toml");
    std::fs::write(&config_path, format!("api_url = \"{}\"\n", github.server.uri()))
        .expect("write config");

    let mut command = Command::new(env!("CARGO_BIN_EXE_envscan"));
    command
        .arg("--config-file")
        .arg(&config_path)
        .arg("--no-color")
        .args(extra)
        .env_remove("GITHUB_TOKEN")
        .env("XDG_CONFIG_HOME", config_home.path());

    let output = tokio::task::spawn_blocking(move || command.output())
        .await
        .expect("join")
        .expect("binary should run");

    Run {
        output,
        _config_home: config_home,
    }
}

#[tokio::test]
async fn test_safe_account_exits_zero() {
    let github = GithubMock::start().await;
    github.user("alice").await;
    github.repos("alice", &["r1", "r2"], 100).await;

    let run = run_envscan(&github, &["alice"]).await;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("You are safe!"));
}

#[tokio::test]
async fn test_exposed_account_prints_table() {
    let github = GithubMock::start().await;
    github.user("bob").await;
    github.repos("bob", &["secrets", "clean"], 100).await;
    github.env_file("bob", "secrets", 3).await;

    let run = run_envscan(&github, &["bob"]).await;

    assert_eq!(run.code(), Some(0));
    let stdout = run.stdout();
    assert!(stdout.contains("You have been pwned!"));
    assert!(stdout.contains("https://github.com/bob/secrets"));
    assert!(!stdout.contains("bob/clean"));
}

#[tokio::test]
async fn test_json_report() {
    let github = GithubMock::start().await;
    github.user("bob").await;
    github.repos("bob", &["secrets"], 100).await;
    github.env_file("bob", "secrets", 2).await;

    let run = run_envscan(&github, &["--json", "bob"]).await;

    assert_eq!(run.code(), Some(0));
    let report = run.json();
    assert_eq!(report["state"], "done");
    assert_eq!(report["outcome"]["total_env_commits"], 2);
    assert_eq!(report["outcome"]["exposed_repos"][0]["name"], "secrets");
    assert_eq!(report["message"]["kind"], "exposed");
}

#[tokio::test]
async fn test_unknown_user_exits_one() {
    let github = GithubMock::start().await;

    let run = run_envscan(&github, &["--json", "doesnotexist"]).await;

    assert_eq!(run.code(), Some(1));
    let report = run.json();
    assert_eq!(report["state"], "failed");
    assert_eq!(report["message"]["failure"], "user_not_found");
}

#[tokio::test]
async fn test_usage_error_exit_code() {
    let github = GithubMock::start().await;

    let run = run_envscan(&github, &["--batch-size", "0", "alice"]).await;

    assert_eq!(run.code(), Some(2));
    assert_eq!(github.requests_to("/").await, 0);
}

#[tokio::test]
async fn test_failure_message_shown_once_with_default_logging() {
    let github = GithubMock::start().await;

    let run = run_with_default_logging(&github, &["doesnotexist"]).await;

    assert_eq!(run.code(), Some(1));
    let message = "GitHub user 'doesnotexist' was not found.";
    let combined = format!("{}{}", run.stdout(), run.stderr());
    assert_eq!(combined.matches(message).count(), 1, "output:\n{combined}");
    assert!(!run.stderr().contains("ERR"), "stderr: {}", run.stderr());
    assert!(!run.stderr().contains("WRN"), "stderr: {}", run.stderr());
}

#[tokio::test]
async fn test_unverified_repository_reported_once_with_default_logging() {
    let github = GithubMock::start().await;
    github.user("frank").await;
    github.repos("frank", &["flaky"], 100).await;
    github.contents_status("frank", "flaky", 500).await;

    let run = run_with_default_logging(&github, &["frank"]).await;

    assert_eq!(run.code(), Some(0));
    assert!(run.stdout().contains("could not verify 1 repository: flaky"));
    assert!(run.stderr().trim().is_empty(), "stderr: {}", run.stderr());
}
