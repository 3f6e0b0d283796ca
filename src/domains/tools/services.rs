//! Shared clients handed to every tool route.

use std::sync::Arc;

use crate::core::Config;
use crate::domains::dns::{DohClient, LocalDnsClient};
use crate::domains::resolution::HostnameResolver;
use crate::domains::whois::WhoisClient;

/// One instance of each domain client, built once per server.
#[derive(Clone)]
pub struct ToolServices {
    pub resolver: Arc<HostnameResolver>,
    pub local_dns: Arc<LocalDnsClient>,
    pub remote_dns: Arc<DohClient>,
    pub whois: Arc<WhoisClient>,
}

impl ToolServices {
    /// Build the production clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.resolution.timeout;
        Self {
            resolver: Arc::new(HostnameResolver::system(timeout)),
            local_dns: Arc::new(LocalDnsClient::system(timeout)),
            remote_dns: Arc::new(DohClient::new(
                config.resolution.doh_server.clone(),
                timeout,
            )),
            whois: Arc::new(WhoisClient::new(
                config.whois.server.clone(),
                config.whois.timeout,
            )),
        }
    }
}
