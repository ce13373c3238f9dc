//! Validation of user input and numeric settings
//!
//! Everything here runs before any network call is made.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Largest `per_page` the GitHub REST API honours
pub const MAX_PAGE_SIZE: usize = 100;

// Characters a login can contain; anything else would change the request path.
// Hyphen placement and length are left to GitHub, which answers 404.
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("static pattern"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trim and check a GitHub username, returning the trimmed form
///
/// Only empty input and characters unsafe in a URL path are rejected here.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let username = raw.trim();

    if username.is_empty() {
        return Err(ValidationError::new("Username cannot be empty"));
    }

    if !USERNAME_PATTERN.is_match(username) {
        return Err(ValidationError::new(format!(
            "'{}' is not a valid GitHub username",
            username
        )));
    }

    Ok(username.to_string())
}

/// Validate a strictly positive count (batch size, page limit)
pub fn validate_positive(name: &str, value: usize) -> Result<usize, ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(value)
}

/// Validate a listing page size against the API maximum
pub fn validate_page_size(value: usize) -> Result<usize, ValidationError> {
    let value = validate_positive("page_size", value)?;
    if value > MAX_PAGE_SIZE {
        return Err(ValidationError::new(format!(
            "page_size must be at most {}, got {}",
            MAX_PAGE_SIZE, value
        )));
    }
    Ok(value)
}

/// Parse a positive integer given as text (CLI values)
pub fn parse_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}
