//! The aggregator: runs one or two family lookups and builds the report.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::family::{AddressFamily, Selection};
use super::lookup::{AddressLookup, SystemResolver, lookup_family};
use super::report::{FamilyOutcome, ResolutionReport};
use super::request::ResolutionRequest;
use super::scope::TimeoutScope;

/// Resolves hostnames for one or both address families.
///
/// Holds no per-call state; a single instance is shared by every request.
#[derive(Clone)]
pub struct HostnameResolver {
    lookup: Arc<dyn AddressLookup>,
    timeout: Duration,
}

impl HostnameResolver {
    pub fn new(lookup: Arc<dyn AddressLookup>, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    /// A resolver using the operating system's DNS configuration.
    pub fn system(timeout: Duration) -> Self {
        Self::new(Arc::new(SystemResolver::new(timeout)), timeout)
    }

    /// Run the lookups selected by the request.
    ///
    /// Both lookups of a dual request run concurrently inside one scope and
    /// always run to completion, whatever the other one returns.
    pub async fn resolve_families(
        &self,
        request: &ResolutionRequest,
        cancel: &CancellationToken,
    ) -> Vec<FamilyOutcome> {
        let scope = TimeoutScope::new(cancel, self.timeout);
        let hostname = request.hostname.as_str();

        match request.ip_version.selection() {
            Selection::Single(family) => vec![self.outcome(&scope, hostname, family).await],
            Selection::Dual => {
                let (ipv4, ipv6) = tokio::join!(
                    self.outcome(&scope, hostname, AddressFamily::Ipv4),
                    self.outcome(&scope, hostname, AddressFamily::Ipv6),
                );
                vec![ipv4, ipv6]
            }
        }
    }

    /// Resolve the request and build its report.
    pub async fn resolve(
        &self,
        request: &ResolutionRequest,
        cancel: &CancellationToken,
    ) -> ResolutionReport {
        let outcomes = self.resolve_families(request, cancel).await;
        ResolutionReport::from_outcomes(request, &outcomes)
    }

    async fn outcome(
        &self,
        scope: &TimeoutScope,
        hostname: &str,
        family: AddressFamily,
    ) -> FamilyOutcome {
        let result = lookup_family(self.lookup.as_ref(), scope, hostname, family).await;
        FamilyOutcome::from_lookup(family, result)
    }
}

impl std::fmt::Debug for HostnameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostnameResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
