//! Resolution domain module.
//!
//! Hostname resolution across address families with partial-failure
//! aggregation.
//!
//! ## Flow
//!
//! 1. `request.rs` - validates the untyped argument payload
//! 2. `scope.rs` - derives one deadline/cancellation scope per call
//! 3. `lookup.rs` - runs a single-family lookup inside that scope
//! 4. `classify.rs` - tells "not found" apart from hard failures
//! 5. `resolver.rs` - runs one or two lookups and aggregates them
//! 6. `report.rs` - the report and its JSON encoding
//!
//! A resolution failure is data: it ends up in the report with
//! `failed = true`. Only invalid input and encoding failures are returned
//! as errors.

pub mod classify;
mod error;
pub mod family;
pub mod lookup;
pub mod report;
pub mod request;
pub mod resolver;
pub mod scope;

pub use classify::{FailureClass, classify};
pub use error::{LookupError, LookupErrorKind, ResolutionError};
pub use family::{AddressFamily, IpVersion, Selection};
pub use lookup::{AddressLookup, SystemResolver};
pub use report::{FamilyOutcome, Failure, ResolutionReport};
pub use request::ResolutionRequest;
pub use resolver::HostnameResolver;
pub use scope::{ScopeExit, TimeoutScope};
