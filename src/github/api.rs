//! Public API for the GitHub client

pub use crate::github::client::{
    GithubApi, GithubClient, GithubClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS,
};
pub use crate::github::error::{FailureClass, GithubError, GithubResult};
pub use crate::github::types::{CommitSummary, Repository, UserProfile};
