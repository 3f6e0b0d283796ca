//! WHOIS domain module.
//!
//! Registration lookups for domain names. The raw server answer is always
//! returned; a handful of common fields are extracted from it when present.

pub mod client;
mod error;
pub mod report;

pub use client::WhoisClient;
pub use error::WhoisError;
pub use report::WhoisReport;
