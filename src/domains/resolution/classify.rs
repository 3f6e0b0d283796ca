//! Soft/hard classification of lookup failures.

use serde::Serialize;

use super::error::{LookupError, LookupErrorKind};

/// How serious a lookup failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The resolver said the host or record does not exist.
    NotFound,
    /// Anything else: timeout, cancellation, transport or resolver errors.
    Hard,
}

impl FailureClass {
    pub fn is_soft(self) -> bool {
        self == Self::NotFound
    }
}

/// Classify an optional lookup error. `None` means no failure.
///
/// Only an error the resolver structurally tagged as not-found is soft.
pub fn classify(error: Option<&LookupError>) -> Option<FailureClass> {
    error.map(|e| match e.kind {
        LookupErrorKind::NotFound => FailureClass::NotFound,
        LookupErrorKind::Resolver(_) | LookupErrorKind::TimedOut(_) | LookupErrorKind::Cancelled => {
            FailureClass::Hard
        }
    })
}
