//! reqwest-backed GitHub client
//!
//! Authorization and API headers are fixed when the client is built and never
//! change afterwards, so one client is shared by every concurrent check.

use crate::core::version;
use crate::github::error::{GithubError, GithubResult};
use crate::github::types::{CommitSummary, Repository, UserProfile};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// The GitHub operations the scanner depends on
#[async_trait::async_trait]
pub trait GithubApi: Send + Sync {
    /// Fetch a user's public profile
    async fn get_user(&self, username: &str) -> GithubResult<UserProfile>;

    /// Fetch one page (1-based) of a user's repositories, most recently updated first
    async fn list_repos(
        &self,
        username: &str,
        page: u32,
        per_page: usize,
    ) -> GithubResult<Vec<Repository>>;

    /// Succeeds if `path` exists in the repository's default branch
    async fn get_contents(&self, owner: &str, repo: &str, path: &str) -> GithubResult<()>;

    /// First page of commits touching `path`
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        per_page: usize,
    ) -> GithubResult<Vec<CommitSummary>>;
}

/// Connection settings for `GithubClient`
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GithubClientConfig {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

// Error body GitHub sends with most 4xx responses
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    pub fn new(config: &GithubClientConfig) -> GithubResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            API_VERSION_HEADER,
            HeaderValue::from_static(version::github_api_version()),
        );

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| {
                    GithubError::Configuration("token contains invalid characters".to_string())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(version::user_agent())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GithubError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        log::debug!(
            "GitHub client ready for {} ({})",
            config.api_url,
            if config.token.is_some() {
                "authenticated"
            } else {
                "anonymous"
            }
        );

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> GithubResult<reqwest::Response> {
        log::trace!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| GithubError::transport(url, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        log::debug!("GET {} returned {}", url, status.as_u16());

        Err(GithubError::Status {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> GithubResult<T> {
        self.send(url, query)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GithubError::Decode {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait::async_trait]
impl GithubApi for GithubClient {
    async fn get_user(&self, username: &str) -> GithubResult<UserProfile> {
        let url = self.url(&format!("/users/{}", username));
        self.get_json(&url, &[]).await
    }

    async fn list_repos(
        &self,
        username: &str,
        page: u32,
        per_page: usize,
    ) -> GithubResult<Vec<Repository>> {
        let url = self.url(&format!("/users/{}/repos", username));
        let query = [
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("sort", "updated".to_string()),
        ];
        self.get_json(&url, &query).await
    }

    async fn get_contents(&self, owner: &str, repo: &str, path: &str) -> GithubResult<()> {
        let url = self.url(&format!("/repos/{}/{}/contents/{}", owner, repo, path));
        self.send(&url, &[]).await.map(|_| ())
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        per_page: usize,
    ) -> GithubResult<Vec<CommitSummary>> {
        let url = self.url(&format!("/repos/{}/{}/commits", owner, repo));
        let query = [("path", path.to_string()), ("per_page", per_page.to_string())];
        self.get_json(&url, &query).await
    }
}
