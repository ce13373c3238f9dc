//! GitHub client error types

use thiserror::Error;

pub type GithubResult<T> = Result<T, GithubError>;

/// How a failed call should be treated by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 404: the resource does not exist
    NotFound,
    /// 403 or 429: quota exhausted or access throttled
    RateLimited,
    /// 409: repository exists but has no commits yet
    EmptyRepository,
    /// Anything else, including transport failures
    Other,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GithubError {
    /// Non-success HTTP status
    #[error("HTTP {status} from {url}{}", detail_suffix(.message))]
    Status {
        status: u16,
        url: String,
        message: Option<String>,
    },

    /// Connection, TLS or timeout failure
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// Body did not match the expected payload
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Client could not be built (bad token characters, TLS backend)
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl GithubError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GithubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn class(&self) -> FailureClass {
        match self.status() {
            Some(404) => FailureClass::NotFound,
            Some(403) | Some(429) => FailureClass::RateLimited,
            Some(409) => FailureClass::EmptyRepository,
            _ => FailureClass::Other,
        }
    }

    pub(crate) fn transport(url: &str, error: reqwest::Error) -> Self {
        GithubError::Transport {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}
