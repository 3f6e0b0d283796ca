//! Record queries against the resolvers configured on this host.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use tokio_util::sync::CancellationToken;

use super::record::{DnsRecord, RecordKind, reverse_name};
use super::report::DnsQueryReport;
use crate::domains::resolution::lookup::{map_resolve_error, system_resolver};
use crate::domains::resolution::{LookupErrorKind, ScopeExit, TimeoutScope};

/// Server label used in reports produced by [`LocalDnsClient`].
pub const SYSTEM_SERVER: &str = "system";

/// Something that can answer a typed record query.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Return the answer records in resolver order.
    ///
    /// An empty answer must be reported as [`LookupErrorKind::NotFound`].
    async fn query(&self, name: &str, kind: RecordKind)
    -> Result<Vec<DnsRecord>, LookupErrorKind>;
}

/// [`RecordLookup`] backed by the operating system's DNS configuration.
pub struct SystemRecordLookup {
    inner: TokioResolver,
}

impl SystemRecordLookup {
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: system_resolver(timeout),
        }
    }
}

#[async_trait]
impl RecordLookup for SystemRecordLookup {
    async fn query(
        &self,
        name: &str,
        kind: RecordKind,
    ) -> Result<Vec<DnsRecord>, LookupErrorKind> {
        let lookup = match reverse_name(name, kind) {
            Some(reverse) => self.inner.lookup(reverse, kind.record_type()).await,
            None => self.inner.lookup(name, kind.record_type()).await,
        }
        .map_err(map_resolve_error)?;

        let records: Vec<DnsRecord> = lookup
            .record_iter()
            .filter_map(DnsRecord::from_record)
            .collect();

        if records.is_empty() {
            return Err(LookupErrorKind::NotFound);
        }
        Ok(records)
    }
}

/// Runs record queries with a per-call deadline.
#[derive(Clone)]
pub struct LocalDnsClient {
    lookup: Arc<dyn RecordLookup>,
    timeout: Duration,
}

impl LocalDnsClient {
    pub fn new(lookup: Arc<dyn RecordLookup>, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    /// A client using the operating system's DNS configuration.
    pub fn system(timeout: Duration) -> Self {
        Self::new(Arc::new(SystemRecordLookup::new(timeout)), timeout)
    }

    /// Query `domain` for `kind` records. Failures end up in the report.
    pub async fn query(
        &self,
        domain: &str,
        kind: RecordKind,
        cancel: &CancellationToken,
    ) -> DnsQueryReport {
        let scope = TimeoutScope::new(cancel, self.timeout);
        let result = match scope.run(self.lookup.query(domain, kind)).await {
            Ok(result) => result,
            Err(ScopeExit::Cancelled) => Err(LookupErrorKind::Cancelled),
            Err(ScopeExit::DeadlineElapsed(d)) => Err(LookupErrorKind::TimedOut(d)),
        };

        let result = result.map_err(|err| match err {
            LookupErrorKind::NotFound => format!("no {kind} records found for {domain}"),
            other => format!("lookup {domain} ({kind}): {other}"),
        });

        DnsQueryReport::new(domain, kind, SYSTEM_SERVER, result)
    }
}
