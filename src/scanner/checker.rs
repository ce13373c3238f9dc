//! `.env` detection for a single repository
//!
//! A contents lookup at the repository root decides existence; only when the
//! file exists is the path-filtered commit history fetched to count commits.
//! The checker never fails: every error becomes an unverified negative result.

use crate::github::api::{FailureClass, GithubApi, Repository};
use crate::scanner::types::EnvCheckResult;
use std::sync::Arc;

/// Path looked up at the repository root
pub const ENV_FILE_PATH: &str = ".env";

/// Commits fetched per repository; one page only
pub const DEFAULT_COMMITS_PER_PAGE: usize = 100;

#[derive(Clone)]
pub struct EnvFileChecker {
    api: Arc<dyn GithubApi>,
    commits_per_page: usize,
}

impl EnvFileChecker {
    pub fn new(api: Arc<dyn GithubApi>, commits_per_page: usize) -> Self {
        Self {
            api,
            commits_per_page,
        }
    }

    pub async fn check(&self, repository: &Repository, username: &str) -> EnvCheckResult {
        let lookup = self
            .api
            .get_contents(username, &repository.name, ENV_FILE_PATH)
            .await;

        if let Err(error) = lookup {
            return match error.class() {
                FailureClass::NotFound => {
                    log::trace!("{}: no {}", repository.full_name, ENV_FILE_PATH);
                    EnvCheckResult::absent(repository)
                }
                FailureClass::EmptyRepository => {
                    log::trace!("{}: empty repository", repository.full_name);
                    EnvCheckResult::absent(repository)
                }
                FailureClass::RateLimited | FailureClass::Other => {
                    log::info!(
                        "Could not verify {} in {}: {}",
                        ENV_FILE_PATH,
                        repository.full_name,
                        error
                    );
                    EnvCheckResult::unverified(repository, error.to_string())
                }
            };
        }

        match self
            .api
            .list_commits(
                username,
                &repository.name,
                ENV_FILE_PATH,
                self.commits_per_page,
            )
            .await
        {
            Ok(commits) => {
                log::info!(
                    "{} has a committed {} ({} commit{})",
                    repository.full_name,
                    ENV_FILE_PATH,
                    commits.len(),
                    if commits.len() == 1 { "" } else { "s" }
                );
                EnvCheckResult::present(repository, commits.len())
            }
            Err(error) => {
                log::info!(
                    "{} exists in {} but its history could not be read: {}",
                    ENV_FILE_PATH,
                    repository.full_name,
                    error
                );
                EnvCheckResult::unverified(repository, error.to_string())
            }
        }
    }
}
