//! Scanner Component
//!
//! Finds committed `.env` files across a GitHub user's public repositories.
//!
//! - **RepositoryEnumerator**: paginated, deduplicated repository listing
//! - **EnvFileChecker**: per-repository contents lookup plus commit count
//! - **ScannerManager**: the scan state machine, batching and progress events
//!
//! External code should go through `scanner::api`.

pub(crate) mod checker;
pub(crate) mod enumerator;
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod types;

pub mod api;

#[cfg(test)]
pub(crate) mod tests;
