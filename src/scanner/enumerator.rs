//! Repository enumeration
//!
//! Walks `GET /users/{username}/repos` page by page until a short or empty
//! page. A failing page ends the walk; whatever was gathered is returned
//! together with the failure so the caller decides what it means.

use crate::github::api::{GithubApi, GithubError, Repository};
use std::collections::HashSet;

/// Result of walking a user's repository pages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoListing {
    /// Deduplicated, in the order the API returned them
    pub repositories: Vec<Repository>,
    /// The page request that stopped the walk early, if any
    pub interrupted: Option<GithubError>,
    pub pages_fetched: u32,
}

impl RepoListing {
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}

pub struct RepositoryEnumerator<'a> {
    api: &'a dyn GithubApi,
    page_size: usize,
    max_pages: u32,
}

impl<'a> RepositoryEnumerator<'a> {
    pub fn new(api: &'a dyn GithubApi, page_size: usize, max_pages: u32) -> Self {
        Self {
            api,
            page_size,
            max_pages,
        }
    }

    pub async fn enumerate(&self, username: &str) -> RepoListing {
        let mut listing = RepoListing::default();
        let mut seen = HashSet::new();

        for page in 1..=self.max_pages {
            let batch = match self.api.list_repos(username, page, self.page_size).await {
                Ok(batch) => batch,
                Err(error) => {
                    log::debug!(
                        "Repository listing for {} stopped at page {}: {}",
                        username,
                        page,
                        error
                    );
                    listing.interrupted = Some(error);
                    return listing;
                }
            };
            listing.pages_fetched = page;

            let page_len = batch.len();
            let before = listing.repositories.len();
            for repo in batch {
                // Sorting by `updated` can shift entries across pages mid-walk
                if seen.insert(repo.full_name.clone()) {
                    listing.repositories.push(repo);
                }
            }

            log::debug!(
                "Page {} for {}: {} repositories ({} new)",
                page,
                username,
                page_len,
                listing.repositories.len() - before
            );

            if page_len < self.page_size {
                return listing;
            }
        }

        log::warn!(
            "Repository listing for {} hit the {} page limit",
            username,
            self.max_pages
        );
        listing
    }
}
