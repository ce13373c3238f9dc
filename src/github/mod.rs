//! GitHub REST client
//!
//! Typed access to the four endpoints the scanner needs: user profile,
//! repository listing, contents lookup and path-filtered commit listing.
//! The `GithubApi` trait is the seam the scanner is written against; the
//! reqwest-backed `GithubClient` is the production implementation.

pub mod api;
pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod types;
