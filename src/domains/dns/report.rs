//! Result of one DNS query, as returned to clients.

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::Serialize;

use super::record::{DnsRecord, RecordKind};

/// Outcome of a record query.
///
/// Like the resolution report, a failed query is data: `failed` is set,
/// `error` carries the reason and `records` is empty.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DnsQueryReport {
    /// Name as queried (an address for PTR queries).
    pub domain: String,

    pub record_type: RecordKind,

    /// Who answered: `system` or the DNS-over-HTTPS endpoint URL.
    pub server: String,

    pub records: Vec<DnsRecord>,

    pub failed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// RFC 3339 time at which the report was built.
    pub timestamp: String,
}

impl DnsQueryReport {
    pub fn new(
        domain: impl Into<String>,
        record_type: RecordKind,
        server: impl Into<String>,
        result: Result<Vec<DnsRecord>, String>,
    ) -> Self {
        let (records, error) = match result {
            Ok(records) => (records, None),
            Err(message) => (Vec::new(), Some(message)),
        };

        Self {
            domain: domain.into(),
            record_type,
            server: server.into(),
            failed: error.is_some(),
            records,
            error,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
