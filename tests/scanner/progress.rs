//! Batch progress as seen by a subscriber

use crate::common::github_mock::GithubMock;
use crate::common::{drain_scan_events, numbered};
use envscan::notifications::api::ScanEventType;
use envscan::scanner::api::{ScanSettings, ScanState};

async fn mock_with_repos(login: &str, count: usize) -> GithubMock {
    let github = GithubMock::start().await;
    let names = numbered("repo", count);
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    github.user(login).await;
    github.repos(login, &names, 100).await;
    github
}

#[tokio::test]
async fn test_progress_reported_per_batch() {
    let github = mock_with_repos("dave", 25).await;
    let manager = github.manager(ScanSettings::default());
    let mut events = manager.subscribe("observer", "test").await;

    let report = manager.start_scan("dave").await;
    assert_eq!(report.state, ScanState::Done);

    let events = drain_scan_events(&mut events);
    let completed: Vec<usize> = events
        .iter()
        .filter(|e| e.event_type == ScanEventType::Progress)
        .filter_map(|e| e.progress.map(|p| p.completed))
        .collect();
    assert_eq!(completed, vec![10, 20, 25]);

    assert!(events.iter().all(|e| e.scan_id == report.scan_id));
    assert_eq!(events.first().map(|e| e.event_type), Some(ScanEventType::Started));
    assert_eq!(events.last().map(|e| e.event_type), Some(ScanEventType::Completed));

    let last_progress = events
        .iter()
        .rev()
        .find(|e| e.event_type == ScanEventType::Progress)
        .and_then(|e| e.progress)
        .expect("at least one progress event");
    assert_eq!(last_progress.completed, last_progress.total);
    assert_eq!(report.progress.total, 25);
}

#[tokio::test]
async fn test_custom_batch_size() {
    let github = mock_with_repos("erin", 7).await;
    let settings = ScanSettings {
        batch_size: 3,
        ..ScanSettings::default()
    };
    let manager = github.manager(settings);
    let mut events = manager.subscribe("observer", "test").await;

    manager.start_scan("erin").await;

    let completed: Vec<usize> = drain_scan_events(&mut events)
        .iter()
        .filter(|e| e.event_type == ScanEventType::Progress)
        .filter_map(|e| e.progress.map(|p| p.completed))
        .collect();
    assert_eq!(completed, vec![3, 6, 7]);
}

#[tokio::test]
async fn test_failed_scan_publishes_error_event() {
    let github = GithubMock::start().await;
    let manager = github.manager(ScanSettings::default());
    let mut events = manager.subscribe("observer", "test").await;

    let report = manager.start_scan("nobody").await;

    let events = drain_scan_events(&mut events);
    let last = events.last().expect("events published");
    assert_eq!(last.event_type, ScanEventType::Error);
    assert_eq!(last.state, ScanState::Failed);
    assert_eq!(last.message.as_deref(), Some(report.message.to_string().as_str()));
    assert!(!events.iter().any(|e| e.event_type == ScanEventType::Progress));
}
