//! Fatal failures and their classification

use crate::common::github_mock::GithubMock;
use envscan::github::api::{GithubClient, GithubClientConfig};
use envscan::scanner::api::{FailureKind, ScanSettings, ScanState, ScannerManager};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_unknown_user() {
    let github = GithubMock::start().await;

    let report = github
        .manager(ScanSettings::default())
        .start_scan("doesnotexist")
        .await;

    assert_eq!(report.state, ScanState::Failed);
    assert_eq!(report.failure(), Some(FailureKind::UserNotFound));
    assert_eq!(
        report.message.to_string(),
        "GitHub user 'doesnotexist' was not found."
    );
    assert_eq!(github.requests_to("/contents/").await, 0);
}

#[tokio::test]
async fn test_rate_limit_mid_pagination_keeps_gathered_repositories() {
    let github = GithubMock::start().await;
    github.user("grace").await;
    github.repo_page("grace", 1, &["r1", "r2"]).await;
    github.repo_page_status("grace", 2, 403).await;
    github.repo_page("grace", 3, &["r5"]).await;
    let settings = ScanSettings {
        page_size: 2,
        ..ScanSettings::default()
    };

    let report = github.manager(settings).start_scan("grace").await;

    assert_eq!(report.state, ScanState::Failed);
    assert_eq!(report.failure(), Some(FailureKind::RateLimited));
    assert!(report.outcome.is_none());
    let kept: Vec<_> = report.unevaluated.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(kept, vec!["r1", "r2"]);
    assert_eq!(github.requests_to("/users/grace/repos").await, 2);
    assert_eq!(github.requests_to("/contents/").await, 0);
}

#[tokio::test]
async fn test_rate_limited_user_lookup() {
    let github = GithubMock::start().await;
    github.user_status("heidi", 429).await;
    github.repos("heidi", &["r1"], 100).await;

    let report = github.manager(ScanSettings::default()).start_scan("heidi").await;

    assert_eq!(report.failure(), Some(FailureKind::RateLimited));
    assert!(report.message.to_string().contains("GITHUB_TOKEN"));
}

#[tokio::test]
async fn test_server_error_shows_generic_message() {
    let github = GithubMock::start().await;
    github.user("ivan").await;
    github.repo_page_status("ivan", 1, 503).await;

    let report = github.manager(ScanSettings::default()).start_scan("ivan").await;

    assert_eq!(report.failure(), Some(FailureKind::NetworkError));
    assert_eq!(
        report.message.to_string(),
        "Error fetching data. Please try again."
    );
}

#[tokio::test]
async fn test_invalid_username_makes_no_requests() {
    let github = GithubMock::start().await;
    let manager = github.manager(ScanSettings::default());

    for input in ["", "   ", "two  spaces", "bad/slash", "name?x=1"] {
        let report = manager.start_scan(input).await;
        assert_eq!(report.failure(), Some(FailureKind::InvalidInput), "input {input:?}");
    }

    assert_eq!(github.requests_to("/").await, 0);
}

#[tokio::test]
async fn test_unreachable_api_is_network_error() {
    let config = GithubClientConfig::default()
        .with_api_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2));
    let client = GithubClient::new(&config).expect("client should build");
    let manager = ScannerManager::new(Arc::new(client), ScanSettings::default());

    let report = manager.start_scan("alice").await;

    assert_eq!(report.state, ScanState::Failed);
    assert_eq!(report.failure(), Some(FailureKind::NetworkError));
}
