//! Scanner Error Types
//!
//! Fatal failures of a scan. Failures of a single repository's check never
//! become a `ScanError`; they are folded into an unverified `EnvCheckResult`.

use crate::github::api::{FailureClass, GithubError};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

/// Shown for any failure that is not the user's to fix
pub const GENERIC_FAILURE_MESSAGE: &str = "Error fetching data. Please try again.";

/// Serializable classification of a fatal failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    UserNotFound,
    RateLimited,
    NetworkError,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Username rejected before any request was made
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The user lookup returned 404
    #[error("GitHub user '{username}' was not found")]
    UserNotFound { username: String },

    /// The API refused the request (403/429)
    #[error("Rate limited: {source}")]
    RateLimited { source: GithubError },

    /// Any other failure of a call the scan cannot do without
    #[error("Network error: {source}")]
    NetworkError { source: GithubError },
}

impl ScanError {
    /// Classify a failed call from the listing stage
    pub fn from_github(error: GithubError, username: &str) -> Self {
        match error.class() {
            FailureClass::NotFound => ScanError::UserNotFound {
                username: username.to_string(),
            },
            FailureClass::RateLimited => ScanError::RateLimited { source: error },
            FailureClass::EmptyRepository | FailureClass::Other => {
                ScanError::NetworkError { source: error }
            }
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ScanError::InvalidInput { .. } => FailureKind::InvalidInput,
            ScanError::UserNotFound { .. } => FailureKind::UserNotFound,
            ScanError::RateLimited { .. } => FailureKind::RateLimited,
            ScanError::NetworkError { .. } => FailureKind::NetworkError,
        }
    }
}

impl From<crate::core::validation::ValidationError> for ScanError {
    fn from(error: crate::core::validation::ValidationError) -> Self {
        ScanError::InvalidInput {
            message: error.message,
        }
    }
}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ScanError::NetworkError { .. })
    }

    fn user_message(&self) -> Option<String> {
        match self {
            // The validation detail stays in the debug log
            ScanError::InvalidInput { .. } => {
                Some("Please enter a valid GitHub username.".to_string())
            }
            ScanError::UserNotFound { username } => {
                Some(format!("GitHub user '{}' was not found.", username))
            }
            ScanError::RateLimited { .. } => Some(
                "GitHub API rate limit reached. Provide a token (GITHUB_TOKEN) or try again later."
                    .to_string(),
            ),
            ScanError::NetworkError { .. } => None,
        }
    }
}
