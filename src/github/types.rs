//! Response payloads, reduced to the fields the scanner reads

use serde::{Deserialize, Serialize};

/// `GET /users/{username}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub avatar_url: String,
}

/// One entry of `GET /users/{username}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Repository {
    pub fn new(owner: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            html_url: format!("https://github.com/{}/{}", owner, name),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// One entry of `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
}
