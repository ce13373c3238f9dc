//! Scan orchestration
//!
//! `ScannerManager` drives one scan at a time through
//! `Validating → ListingRepos → Scanning → Aggregating → Done | Failed`.
//! Each call to `start_scan` takes a new generation; the published snapshot
//! and events only accept writes from the newest generation, so a scan that
//! has been superseded finishes silently.

use crate::core::error_handling::log_error_with_context;
use crate::core::validation::validate_username;
use crate::github::api::{GithubApi, Repository};
use crate::notifications::api::{
    AsyncNotificationManager, EventReceiver, ScanEvent, ScanEventType,
};
use crate::scanner::checker::{EnvFileChecker, DEFAULT_COMMITS_PER_PAGE};
use crate::scanner::enumerator::RepositoryEnumerator;
use crate::scanner::error::{ScanError, GENERIC_FAILURE_MESSAGE};
use crate::scanner::types::{
    OutcomeMessage, ScanOutcome, ScanProgress, ScanReport, ScanSnapshot, ScanState,
};
use futures::future::join_all;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Tunables of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Repositories checked concurrently; batches run one after another
    pub batch_size: usize,
    /// `per_page` for the repository listing
    pub page_size: usize,
    /// Hard ceiling on listing pages
    pub max_pages: u32,
    /// `per_page` for the `.env` commit history
    pub commits_per_page: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            commits_per_page: DEFAULT_COMMITS_PER_PAGE,
        }
    }
}

// Identity of one `start_scan` call
struct ScanContext {
    generation: u64,
    scan_id: String,
    username: String,
    started_at: String,
}

// A fatal failure plus whatever had been gathered when it happened
struct Failure {
    error: ScanError,
    unevaluated: Vec<Repository>,
}

impl From<ScanError> for Failure {
    fn from(error: ScanError) -> Self {
        Self {
            error,
            unevaluated: Vec::new(),
        }
    }
}

pub struct ScannerManager {
    api: Arc<dyn GithubApi>,
    settings: ScanSettings,
    notifications: Mutex<AsyncNotificationManager>,
    generation: AtomicU64,
    snapshot: RwLock<ScanSnapshot>,
}

impl ScannerManager {
    pub fn new(api: Arc<dyn GithubApi>, settings: ScanSettings) -> Self {
        Self {
            api,
            settings,
            notifications: Mutex::new(AsyncNotificationManager::new()),
            generation: AtomicU64::new(0),
            snapshot: RwLock::new(ScanSnapshot::default()),
        }
    }

    /// Subscribe to this manager's scan events
    pub async fn subscribe(&self, subscriber_id: &str, source: &str) -> EventReceiver {
        self.notifications
            .lock()
            .await
            .subscribe(subscriber_id.to_string(), source.to_string())
    }

    /// Latest state published by the current scan
    pub async fn snapshot(&self) -> ScanSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Short SHA256-based identifier of one scan
    pub fn generate_scan_id(username: &str, generation: u64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(username.to_lowercase().as_bytes());
        hasher.update(generation.to_be_bytes());
        let hash_hex = format!("{:x}", hasher.finalize());
        hash_hex[..16].to_string()
    }

    /// Run a complete scan of `username`'s public repositories
    ///
    /// Never returns an error: fatal failures end in a `Failed` report.
    pub async fn start_scan(&self, username: &str) -> ScanReport {
        let display_name = username.trim().to_string();

        // The generation moves under the snapshot lock so no older scan can
        // write between the bump and the reset.
        let ctx = {
            let mut snapshot = self.snapshot.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let ctx = ScanContext {
                generation,
                scan_id: Self::generate_scan_id(&display_name, generation),
                username: display_name,
                started_at: chrono::Utc::now().to_rfc3339(),
            };
            *snapshot = ScanSnapshot {
                scan_id: Some(ctx.scan_id.clone()),
                username: Some(ctx.username.clone()),
                state: ScanState::Validating,
                ..ScanSnapshot::default()
            };
            ctx
        };

        log::info!("Scan {} started for '{}'", ctx.scan_id, ctx.username);

        self.publish(
            &ctx,
            ScanEvent::new(ScanEventType::Started, ctx.scan_id.clone(), ScanState::Validating)
                .with_message(format!("Scanning {}", ctx.username)),
        )
        .await;

        let report = match self.run(&ctx).await {
            Ok(report) => report,
            Err(failure) => self.fail(&ctx, failure).await,
        };

        if !self.is_current(&ctx) {
            log::debug!("Scan {} was superseded; its result is discarded", ctx.scan_id);
        }
        report
    }

    async fn run(&self, ctx: &ScanContext) -> Result<ScanReport, Failure> {
        let username = validate_username(&ctx.username).map_err(ScanError::from)?;

        self.transition(ctx, ScanState::ListingRepos).await;
        let enumerator = RepositoryEnumerator::new(
            self.api.as_ref(),
            self.settings.page_size,
            self.settings.max_pages,
        );
        let (user, listing) = tokio::join!(
            self.api.get_user(&username),
            enumerator.enumerate(&username)
        );

        let user = user.map_err(|e| ScanError::from_github(e, &username))?;
        log::debug!("Profile of {} loaded", user.login);
        if let Some(error) = listing.interrupted {
            return Err(Failure {
                error: ScanError::from_github(error, &username),
                unevaluated: listing.repositories,
            });
        }

        let repositories = listing.repositories;
        log::info!(
            "Found {} repositor{} for {} in {} page{}",
            repositories.len(),
            if repositories.len() == 1 { "y" } else { "ies" },
            username,
            listing.pages_fetched,
            if listing.pages_fetched == 1 { "" } else { "s" }
        );

        if repositories.is_empty() {
            let outcome = ScanOutcome {
                avatar_url: Some(user.avatar_url),
                ..ScanOutcome::default()
            };
            let message = OutcomeMessage::NoRepositories { username };
            return Ok(self
                .finish(ctx, ScanProgress::new(0), Some(outcome), message, Vec::new())
                .await);
        }

        let mut progress = ScanProgress::new(repositories.len());
        self.update(ctx, |snapshot| {
            snapshot.state = ScanState::Scanning;
            snapshot.progress = progress;
        })
        .await;

        let checker = EnvFileChecker::new(Arc::clone(&self.api), self.settings.commits_per_page);
        let mut results = Vec::with_capacity(repositories.len());

        for (index, batch) in repositories
            .chunks(self.settings.batch_size.max(1))
            .enumerate()
        {
            let checks = batch.iter().map(|repo| checker.check(repo, &username));
            results.extend(join_all(checks).await);

            progress.advance(batch.len());
            log::debug!("Batch {} of scan {} done ({})", index + 1, ctx.scan_id, progress);

            self.update(ctx, |snapshot| snapshot.progress = progress).await;
            self.publish(
                ctx,
                ScanEvent::new(ScanEventType::Progress, ctx.scan_id.clone(), ScanState::Scanning)
                    .with_progress(progress),
            )
            .await;
        }

        self.transition(ctx, ScanState::Aggregating).await;
        debug_assert!(progress.is_complete(), "aggregating before all batches finished");

        let outcome = ScanOutcome::aggregate(&results, Some(user.avatar_url));
        if !outcome.unverified_repos.is_empty() {
            log::info!(
                "{} repositor{} could not be verified: {}",
                outcome.unverified_repos.len(),
                if outcome.unverified_repos.len() == 1 { "y" } else { "ies" },
                outcome.unverified_repos.join(", ")
            );
        }

        let message = OutcomeMessage::for_outcome(&outcome);
        Ok(self
            .finish(ctx, progress, Some(outcome), message, Vec::new())
            .await)
    }

    async fn fail(&self, ctx: &ScanContext, failure: Failure) -> ScanReport {
        let Failure { error, unevaluated } = failure;

        // The report carries the only user-facing line
        let text = log_error_with_context(&error, GENERIC_FAILURE_MESSAGE);

        if !unevaluated.is_empty() {
            log::info!(
                "{} repositor{} gathered before the failure were not evaluated",
                unevaluated.len(),
                if unevaluated.len() == 1 { "y" } else { "ies" }
            );
        }

        let message = OutcomeMessage::Failed {
            failure: error.kind(),
            text,
        };
        self.finish(ctx, ScanProgress::default(), None, message, unevaluated)
            .await
    }

    async fn finish(
        &self,
        ctx: &ScanContext,
        progress: ScanProgress,
        outcome: Option<ScanOutcome>,
        message: OutcomeMessage,
        unevaluated: Vec<Repository>,
    ) -> ScanReport {
        let state = match message {
            OutcomeMessage::Failed { .. } => ScanState::Failed,
            _ => ScanState::Done,
        };

        let report = ScanReport {
            scan_id: ctx.scan_id.clone(),
            username: ctx.username.clone(),
            state,
            progress,
            outcome,
            message,
            unevaluated,
            started_at: ctx.started_at.clone(),
            finished_at: chrono::Utc::now().to_rfc3339(),
        };

        self.update(ctx, |snapshot| {
            snapshot.state = state;
            snapshot.progress = progress;
            snapshot.outcome = report.outcome.clone();
            snapshot.message = Some(report.message.clone());
        })
        .await;

        let event_type = if state == ScanState::Done {
            ScanEventType::Completed
        } else {
            ScanEventType::Error
        };
        self.publish(
            ctx,
            ScanEvent::new(event_type, ctx.scan_id.clone(), state)
                .with_progress(progress)
                .with_message(report.message.to_string()),
        )
        .await;

        log::info!("Scan {} finished: {}", ctx.scan_id, state);
        report
    }

    fn is_current(&self, ctx: &ScanContext) -> bool {
        self.generation.load(Ordering::SeqCst) == ctx.generation
    }

    async fn transition(&self, ctx: &ScanContext, state: ScanState) {
        log::debug!("Scan {} -> {}", ctx.scan_id, state);
        self.update(ctx, |snapshot| snapshot.state = state).await;
    }

    // Writes from a superseded scan are dropped
    async fn update<F>(&self, ctx: &ScanContext, apply: F)
    where
        F: FnOnce(&mut ScanSnapshot),
    {
        let mut snapshot = self.snapshot.write().await;
        if self.is_current(ctx) {
            apply(&mut snapshot);
        }
    }

    // Checked under the lock: a scan superseded while waiting publishes nothing
    async fn publish(&self, ctx: &ScanContext, event: ScanEvent) {
        let mut notifications = self.notifications.lock().await;
        if !self.is_current(ctx) {
            return;
        }
        if let Err(e) = notifications.publish(event).await {
            log::debug!("Scan {}: {}", ctx.scan_id, e);
        }
    }
}
