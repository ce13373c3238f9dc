//! Scanner data model
//!
//! Everything here is scoped to a single scan; nothing outlives the
//! `ScanReport` it ends up in.

use crate::github::api::Repository;
use crate::scanner::error::FailureKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

/// Shown when an exposed repository has no description
pub const NO_DESCRIPTION: &str = "No description provided.";

/// A user's request to scan one GitHub account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub username: String,
}

/// Orchestrator lifecycle
///
/// `Idle → Validating → ListingRepos → Scanning → Aggregating → Done | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Idle,
    Validating,
    ListingRepos,
    Scanning,
    Aggregating,
    Done,
    Failed,
}

/// Whether a negative check result is trustworthy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verification {
    /// The API answered definitively
    Confirmed,
    /// A call failed; the repository is reported as not exposed
    Unverified { reason: String },
}

/// Result of checking one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvCheckResult {
    pub repository: Repository,
    pub has_env_file: bool,
    pub commit_count: usize,
    pub verification: Verification,
}

impl EnvCheckResult {
    pub fn present(repository: &Repository, commit_count: usize) -> Self {
        Self {
            repository: repository.clone(),
            has_env_file: true,
            commit_count,
            verification: Verification::Confirmed,
        }
    }

    pub fn absent(repository: &Repository) -> Self {
        Self {
            repository: repository.clone(),
            has_env_file: false,
            commit_count: 0,
            verification: Verification::Confirmed,
        }
    }

    pub fn unverified(repository: &Repository, reason: String) -> Self {
        Self {
            repository: repository.clone(),
            has_env_file: false,
            commit_count: 0,
            verification: Verification::Unverified { reason },
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verification == Verification::Confirmed
    }
}

/// Repositories checked so far
///
/// `completed` only increases and never exceeds `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    pub completed: usize,
    pub total: usize,
}

impl ScanProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Record a finished batch, clamped to `total`
    pub fn advance(&mut self, batch_len: usize) {
        self.completed = self.completed.saturating_add(batch_len).min(self.total);
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

impl fmt::Display for ScanProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// An exposed repository as presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposedRepo {
    pub name: String,
    pub url: String,
    pub description: String,
    pub commit_count: usize,
}

/// Aggregate of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub total_env_commits: usize,
    pub exposed_repos: Vec<ExposedRepo>,
    /// Repositories whose check failed, in listing order
    pub unverified_repos: Vec<String>,
    pub avatar_url: Option<String>,
}

impl ScanOutcome {
    /// Fold check results, which must be in repository listing order
    pub fn aggregate(results: &[EnvCheckResult], avatar_url: Option<String>) -> Self {
        let mut outcome = ScanOutcome {
            avatar_url,
            ..Default::default()
        };

        for result in results {
            if !result.is_verified() {
                outcome.unverified_repos.push(result.repository.name.clone());
            }
            if !result.has_env_file {
                continue;
            }

            outcome.total_env_commits += result.commit_count;
            outcome.exposed_repos.push(ExposedRepo {
                name: result.repository.name.clone(),
                url: result.repository.html_url.clone(),
                description: result
                    .repository
                    .description
                    .clone()
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                commit_count: result.commit_count,
            });
        }

        outcome
    }

    pub fn is_exposed(&self) -> bool {
        !self.exposed_repos.is_empty()
    }
}

/// The single human-readable line shown for a terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeMessage {
    NoRepositories { username: String },
    Safe,
    Exposed { env_commits: usize, repositories: usize },
    Failed { failure: FailureKind, text: String },
}

impl OutcomeMessage {
    pub fn for_outcome(outcome: &ScanOutcome) -> Self {
        if outcome.is_exposed() {
            OutcomeMessage::Exposed {
                env_commits: outcome.total_env_commits,
                repositories: outcome.exposed_repos.len(),
            }
        } else {
            OutcomeMessage::Safe
        }
    }
}

impl fmt::Display for OutcomeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeMessage::NoRepositories { username } => {
                write!(f, "No repositories found for {}.", username)
            }
            OutcomeMessage::Safe => {
                write!(f, "You are safe! You have not pushed any .env file to GitHub.")
            }
            OutcomeMessage::Exposed {
                env_commits,
                repositories,
            } => write!(
                f,
                "You have been pwned! You have pushed {} .env file{} to GitHub across {} repositor{}.",
                env_commits,
                if *env_commits == 1 { "" } else { "s" },
                repositories,
                if *repositories == 1 { "y" } else { "ies" }
            ),
            OutcomeMessage::Failed { text, .. } => write!(f, "{}", text),
        }
    }
}

/// Everything the presentation layer needs once a scan ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: String,
    pub username: String,
    pub state: ScanState,
    pub progress: ScanProgress,
    pub outcome: Option<ScanOutcome>,
    pub message: OutcomeMessage,
    /// Repositories gathered before a fatal failure; never checked
    pub unevaluated: Vec<Repository>,
    pub started_at: String,
    pub finished_at: String,
}

impl ScanReport {
    pub fn failure(&self) -> Option<FailureKind> {
        match &self.message {
            OutcomeMessage::Failed { failure, .. } => Some(*failure),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == ScanState::Done
    }
}

/// Latest published state of the orchestrator, for polling consumers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSnapshot {
    pub scan_id: Option<String>,
    pub username: Option<String>,
    pub state: ScanState,
    pub progress: ScanProgress,
    pub outcome: Option<ScanOutcome>,
    pub message: Option<OutcomeMessage>,
}

impl Default for ScanSnapshot {
    fn default() -> Self {
        Self {
            scan_id: None,
            username: None,
            state: ScanState::Idle,
            progress: ScanProgress::default(),
            outcome: None,
            message: None,
        }
    }
}
