//! DNS record query domain.
//!
//! Typed record queries (A, AAAA, CNAME, MX, NS, PTR, SOA, SRV, TXT) either
//! through the host's resolvers (`local.rs`) or through DNS-over-HTTPS
//! (`remote.rs`). Both produce a [`DnsQueryReport`]; as with hostname
//! resolution, a failed query is reported with `failed = true` rather than
//! as an error.

pub mod local;
pub mod record;
pub mod remote;
pub mod report;

pub use local::{LocalDnsClient, RecordLookup, SystemRecordLookup};
pub use record::{DnsRecord, RecordKind};
pub use remote::DohClient;
pub use report::DnsQueryReport;
