//! Error types for the classi application.
//!
//! A small hierarchical taxonomy using `thiserror`, composing via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error for startup and the terminal shell
//!   - [`crate::config::ConfigError`] - config file read/parse failures
//!   - [`crate::logging::LoggingError`] - tracing initialization failures
//!   - `std::io::Error` - terminal/TUI failures
//! - [`AuthError`] - session bootstrap failures (non-fatal: the app runs
//!   with the chat widget suppressed)
//! - [`ChatRequestError`] - the single failure kind recognized at the
//!   widget boundary
//!
//! # Recovery Strategy
//!
//! Chat request failures are **fully recovered** inside the widget: the
//! fixed fallback assistant message is appended and nothing propagates
//! further. Only startup and terminal errors are fatal.

use thiserror::Error;

/// Top-level application error for startup and the terminal shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error. Fatal: without a working terminal
    /// the application cannot run.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Session bootstrap failure.
///
/// Raised while resolving the current user from a bearer token. Not fatal:
/// the application starts anyway and simply renders no chat widget, the same
/// behavior as having no token at all.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the token (401/403 or any non-2xx status).
    #[error("Authentication rejected with status {status}")]
    Rejected {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The identity endpoint could not be reached or its response could not
    /// be decoded.
    #[error("Authentication transport error: {reason}")]
    Transport {
        /// Human-readable description of the underlying failure.
        reason: String,
    },
}

/// The single failure kind recognized at the chat widget boundary.
///
/// Network errors, timeouts, non-2xx responses, and malformed reply bodies
/// all collapse into this one type. The distinction is preserved in the
/// `reason` field for `tracing` output only; the user always sees the same
/// fixed fallback message.
#[derive(Debug, Error)]
#[error("Chat request failed: {reason}")]
pub struct ChatRequestError {
    /// Diagnostic description of the underlying cause, for logs only.
    pub reason: String,
}

impl ChatRequestError {
    /// Wrap any underlying cause into the collapsed failure kind.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for ChatRequestError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}
