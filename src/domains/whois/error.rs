//! WHOIS error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that abort a WHOIS call.
#[derive(Debug, Error)]
pub enum WhoisError {
    #[error("parameter \"domain\" is required")]
    MissingDomain,

    #[error("invalid domain format: {0:?}")]
    InvalidDomain(String),

    /// The server could not be reached or refused the query.
    #[error("WHOIS query failed: {0}")]
    Lookup(String),

    #[error("WHOIS query failed: timed out after {0:?}")]
    TimedOut(Duration),

    #[error("WHOIS query failed: request cancelled")]
    Cancelled,
}

impl WhoisError {
    /// Whether this error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingDomain | Self::InvalidDomain(_))
    }
}
