//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

use crate::domains::resolution::ResolutionError;
use crate::domains::whois::WhoisError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A required parameter is absent or empty.
    #[error("parameter \"{0}\" is required")]
    MissingParameter(&'static str),

    /// The arguments do not match the tool's input schema.
    #[error("failed to parse tool input: {0}")]
    InvalidParams(String),

    /// The resolution call could not be processed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The WHOIS lookup was rejected or failed.
    #[error(transparent)]
    Whois(#[from] WhoisError),

    /// The report could not be serialized.
    #[error("error generating JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Whether the caller's input caused this error.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::MissingParameter(_) | Self::InvalidParams(_) => true,
            Self::Resolution(e) => e.is_validation(),
            Self::Whois(e) => e.is_validation(),
            Self::Encoding(_) => false,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        if err.is_invalid_input() {
            McpError::invalid_params(err.to_string(), None)
        } else {
            McpError::internal_error(err.to_string(), None)
        }
    }
}
