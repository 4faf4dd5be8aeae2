//! Error handling and custom error types
//!
//! Setup failures use [`Error`]; the outcome of a single exchange uses the
//! closed [`ExchangeError`] taxonomy so no transport or parser error leaks out.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classified failure of one query/answer exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The transport could not complete the round trip.
    #[error("{0}")]
    NetworkFailure(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    HttpFailure { status: u16, message: String },

    /// A success response whose body is not a well-formed answer payload.
    #[error("Error parsing response")]
    ParseFailure,

    #[error("Request cancelled")]
    Cancelled,
}

impl ExchangeError {
    /// Prefers the reason phrase the server sent, then the canonical one.
    pub(crate) fn http(status: reqwest::StatusCode, reason: Option<&str>) -> Self {
        let message = reason
            .filter(|r| !r.is_empty())
            .or_else(|| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self::HttpFailure {
            status: status.as_u16(),
            message,
        }
    }
}
