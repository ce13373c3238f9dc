//! Successful scans: safe, exposed, empty and repeated

use crate::common::github_mock::GithubMock;
use envscan::scanner::api::{OutcomeMessage, ScanSettings, ScanState};

#[tokio::test]
async fn test_account_without_env_files_is_safe() {
    let github = GithubMock::start().await;
    github.user("alice").await;
    github.repos("alice", &["r1", "r2"], 100).await;

    let report = github.manager(ScanSettings::default()).start_scan("alice").await;

    assert_eq!(report.state, ScanState::Done);
    let outcome = report.outcome.expect("outcome");
    assert_eq!(outcome.total_env_commits, 0);
    assert!(outcome.exposed_repos.is_empty());
    assert_eq!(report.message, OutcomeMessage::Safe);
    assert_eq!(
        report.message.to_string(),
        "You are safe! You have not pushed any .env file to GitHub."
    );
    assert_eq!(github.requests_to("/commits").await, 0);
}

#[tokio::test]
async fn test_committed_env_file_is_reported() {
    let github = GithubMock::start().await;
    github.user("bob").await;
    github.repos("bob", &["secrets"], 100).await;
    github.env_file("bob", "secrets", 3).await;

    let report = github.manager(ScanSettings::default()).start_scan("bob").await;

    let outcome = report.outcome.expect("outcome");
    assert_eq!(outcome.total_env_commits, 3);
    assert_eq!(outcome.exposed_repos.len(), 1);
    assert_eq!(outcome.exposed_repos[0].name, "secrets");
    assert_eq!(outcome.exposed_repos[0].url, "https://github.com/bob/secrets");
    assert_eq!(outcome.exposed_repos[0].description, "No description provided.");
    assert_eq!(outcome.avatar_url.as_deref(), Some("https://avatars.example/bob"));
    assert!(report
        .message
        .to_string()
        .starts_with("You have been pwned! You have pushed 3 .env files to GitHub"));
}

#[tokio::test]
async fn test_exposure_totals_and_order() {
    let github = GithubMock::start().await;
    github.user("carol").await;
    github
        .repos("carol", &["zeta", "alpha", "mid", "beta", "omega"], 100)
        .await;
    github.env_file("carol", "beta", 1).await;
    github.env_file("carol", "zeta", 4).await;
    github.env_file("carol", "mid", 2).await;

    let report = github.manager(ScanSettings::default()).start_scan("carol").await;

    let outcome = report.outcome.expect("outcome");
    let names: Vec<_> = outcome.exposed_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "mid", "beta"]);
    assert_eq!(
        outcome.total_env_commits,
        outcome.exposed_repos.iter().map(|r| r.commit_count).sum::<usize>()
    );
    assert_eq!(outcome.total_env_commits, 7);
}

#[tokio::test]
async fn test_user_without_repositories() {
    let github = GithubMock::start().await;
    github.user("empty").await;
    github.repos("empty", &[], 100).await;

    let report = github.manager(ScanSettings::default()).start_scan("empty").await;

    assert_eq!(report.state, ScanState::Done);
    assert_eq!(report.message.to_string(), "No repositories found for empty.");
    assert_ne!(report.message, OutcomeMessage::Safe);
    assert_eq!(report.outcome.map(|o| o.total_env_commits), Some(0));
}

#[tokio::test]
async fn test_repeated_scan_yields_identical_outcome() {
    let github = GithubMock::start().await;
    github.user("dave").await;
    github.repos("dave", &["a", "b", "c"], 100).await;
    github.env_file("dave", "c", 2).await;
    let manager = github.manager(ScanSettings::default());

    let first = manager.start_scan("dave").await;
    let second = manager.start_scan("dave").await;

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.message, second.message);
    assert_ne!(first.scan_id, second.scan_id);
}

#[tokio::test]
async fn test_listing_walks_every_page() {
    let github = GithubMock::start().await;
    github.user("erin").await;
    github
        .repos("erin", &["p1", "p2", "p3", "p4", "p5"], 2)
        .await;
    github.env_file("erin", "p5", 1).await;
    let settings = ScanSettings {
        page_size: 2,
        ..ScanSettings::default()
    };

    let report = github.manager(settings).start_scan("erin").await;

    assert_eq!(report.progress.total, 5);
    assert_eq!(github.requests_to("/users/erin/repos").await, 3);
    let outcome = report.outcome.expect("outcome");
    assert_eq!(outcome.exposed_repos[0].name, "p5");
}

#[tokio::test]
async fn test_failed_contents_lookup_is_listed_as_unverified() {
    let github = GithubMock::start().await;
    github.user("frank").await;
    github.repos("frank", &["ok", "flaky"], 100).await;
    github.contents_status("frank", "flaky", 500).await;

    let report = github.manager(ScanSettings::default()).start_scan("frank").await;

    assert_eq!(report.state, ScanState::Done);
    assert_eq!(report.message, OutcomeMessage::Safe);
    let outcome = report.outcome.expect("outcome");
    assert_eq!(outcome.unverified_repos, vec!["flaky".to_string()]);
}
