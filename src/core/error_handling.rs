//! Shared error reporting
//!
//! Errors that reach the user are split into two kinds: user-actionable ones
//! (bad username, missing token) whose own message is shown, and system ones
//! (transport failures) that are reported with a generic context line while the
//! detail goes to the debug log.

/// Errors that know whether their message is fit for the end user
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(..)`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    /// True if the error carries a specific message the user can act on
    fn is_user_actionable(&self) -> bool;

    /// The message to show the user, for user-actionable errors
    fn user_message(&self) -> Option<String>;
}

/// Pick the single line to show the user for a terminal error
///
/// User-actionable errors surface their own message; system errors surface
/// `operation_context`. The caller prints the line; only the detail is logged,
/// at debug level, so the message never appears twice.
pub fn log_error_with_context<E>(error: &E, operation_context: &str) -> String
where
    E: ContextualError + std::fmt::Debug,
{
    let shown = match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => user_msg,
        _ => operation_context.to_string(),
    };

    log::debug!("FATAL: {}", shown);
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);

    shown
}
