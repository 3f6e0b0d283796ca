//! Resolution error types.
//!
//! Two families of errors live here. [`ResolutionError`] covers conditions
//! that abort a call (bad input, encoding). [`LookupError`] describes a
//! failed family lookup and is always turned into report data, never
//! propagated to the caller.

use std::time::Duration;

use hickory_resolver::ResolveError;
use thiserror::Error;

use super::family::AddressFamily;

/// Errors that abort a resolution call before or after the lookups.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// A required parameter is absent or empty.
    #[error("parameter \"{0}\" is required")]
    MissingParameter(&'static str),

    /// A field holds a JSON value of the wrong type.
    #[error(
        "failed to parse tool input: invalid value for field \"{field}\": expected \"{expected}\" but got \"{actual}\""
    )]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// The argument payload is not an object at all.
    #[error("failed to parse tool input: invalid input provided to the tool")]
    MalformedArguments,

    /// The report could not be serialized.
    #[error("error generating JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ResolutionError {
    /// Whether this error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Encoding(_))
    }
}

/// A failed lookup for one address family.
#[derive(Debug, Error)]
#[error("lookup {hostname} ({family}): {kind}")]
pub struct LookupError {
    pub hostname: String,
    pub family: AddressFamily,
    #[source]
    pub kind: LookupErrorKind,
}

/// What went wrong during a single-family lookup.
#[derive(Debug, Error)]
pub enum LookupErrorKind {
    /// The resolver reported that the name has no records of this family.
    #[error("no such host")]
    NotFound,

    /// Any other resolver failure (refusal, transport, malformed name).
    #[error("{0}")]
    Resolver(#[from] ResolveError),

    /// The shared deadline elapsed before the resolver answered.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl LookupError {
    pub fn new(hostname: impl Into<String>, family: AddressFamily, kind: LookupErrorKind) -> Self {
        Self {
            hostname: hostname.into(),
            family,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = ResolutionError::MissingParameter("hostname");
        assert_eq!(err.to_string(), "parameter \"hostname\" is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_field_type_names_field_and_types() {
        let err = ResolutionError::InvalidFieldType {
            field: "hostname",
            expected: "string",
            actual: "number",
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to parse tool input"));
        assert!(msg.contains("\"hostname\""));
        assert!(msg.contains("\"string\""));
        assert!(msg.contains("\"number\""));
    }

    #[test]
    fn test_lookup_error_display() {
        let err = LookupError::new("example.invalid", AddressFamily::Ipv6, LookupErrorKind::NotFound);
        assert_eq!(err.to_string(), "lookup example.invalid (ipv6): no such host");

        let err = LookupError::new(
            "example.com",
            AddressFamily::Ipv4,
            LookupErrorKind::TimedOut(Duration::from_secs(5)),
        );
        assert_eq!(err.to_string(), "lookup example.com (ipv4): timed out after 5s");
    }
}
