//! Scanner API
//!
//! Public interface of the scanner, following the same pattern as the
//! `github::api` and `notifications::api` modules.

// Orchestration
pub use crate::scanner::manager::{
    ScanSettings, ScannerManager, DEFAULT_BATCH_SIZE, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
};

// Building blocks
pub use crate::scanner::checker::{EnvFileChecker, DEFAULT_COMMITS_PER_PAGE, ENV_FILE_PATH};
pub use crate::scanner::enumerator::{RepoListing, RepositoryEnumerator};

// Error handling
pub use crate::scanner::error::{FailureKind, ScanError, GENERIC_FAILURE_MESSAGE};

// Data model
pub use crate::scanner::types::{
    EnvCheckResult, ExposedRepo, OutcomeMessage, ScanOutcome, ScanProgress, ScanReport,
    ScanRequest, ScanSnapshot, ScanState, Verification, NO_DESCRIPTION,
};
