//! Single-family address lookups.
//!
//! [`AddressLookup`] is the seam between the aggregator and whatever answers
//! queries. [`SystemResolver`] is the production implementation. It reads
//! the host's resolver configuration (`/etc/resolv.conf`, hosts file) and
//! falls back to Hickory's default upstream set when that fails.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    ResolveError, TokioResolver, config::ResolverConfig, name_server::TokioConnectionProvider,
};
use tracing::warn;

use super::error::{LookupError, LookupErrorKind};
use super::family::AddressFamily;
use super::scope::{ScopeExit, TimeoutScope};

/// Something that can resolve a hostname restricted to one address family.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Return the addresses in resolver order.
    ///
    /// "No such host" must be reported as [`LookupErrorKind::NotFound`], not
    /// as an empty list.
    async fn lookup(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, LookupErrorKind>;
}

/// Resolver backed by the operating system's DNS configuration.
pub struct SystemResolver {
    inner: TokioResolver,
}

impl SystemResolver {
    /// Build a resolver whose per-query timeout is `timeout`.
    ///
    /// Results are never cached.
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: system_resolver(timeout),
        }
    }
}

/// Hickory resolver reading the host configuration, with caching disabled.
pub(crate) fn system_resolver(timeout: Duration) -> TokioResolver {
    let mut builder = match TokioResolver::builder_tokio() {
        Ok(builder) => builder,
        Err(e) => {
            warn!("Failed to load system DNS configuration, falling back to defaults: {e}");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        }
    };

    let opts = builder.options_mut();
    opts.timeout = timeout;
    opts.cache_size = 0;

    builder.build()
}

impl std::fmt::Debug for SystemResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemResolver").finish_non_exhaustive()
    }
}

#[async_trait]
impl AddressLookup for SystemResolver {
    async fn lookup(
        &self,
        hostname: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, LookupErrorKind> {
        let addresses = match family {
            AddressFamily::Ipv4 => self
                .inner
                .ipv4_lookup(hostname)
                .await
                .map(|lookup| lookup.iter().map(|a| IpAddr::V4(a.0)).collect()),
            AddressFamily::Ipv6 => self
                .inner
                .ipv6_lookup(hostname)
                .await
                .map(|lookup| lookup.iter().map(|aaaa| IpAddr::V6(aaaa.0)).collect()),
        };

        addresses.map_err(map_resolve_error)
    }
}

pub(crate) fn map_resolve_error(err: ResolveError) -> LookupErrorKind {
    if err.is_no_records_found() || err.is_nx_domain() {
        LookupErrorKind::NotFound
    } else {
        LookupErrorKind::Resolver(err)
    }
}

/// Look up one family inside `scope` and render the addresses as text.
pub async fn lookup_family(
    lookup: &dyn AddressLookup,
    scope: &TimeoutScope,
    hostname: &str,
    family: AddressFamily,
) -> Result<Vec<String>, LookupError> {
    let result = match scope.run(lookup.lookup(hostname, family)).await {
        Ok(result) => result,
        Err(ScopeExit::Cancelled) => Err(LookupErrorKind::Cancelled),
        Err(ScopeExit::DeadlineElapsed(d)) => Err(LookupErrorKind::TimedOut(d)),
    };

    result
        .map(|addrs| addrs.iter().map(IpAddr::to_string).collect())
        .map_err(|kind| LookupError::new(hostname, family, kind))
}
