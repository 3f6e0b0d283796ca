//! WHOIS client.
//!
//! Each lookup starts at one server: the configured one, a known registry
//! server for the TLD, or IANA, whose answer refers on to the registry.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use whois_rust::{WhoIs, WhoIsLookupOptions};

use super::error::WhoisError;
use super::report::WhoisReport;
use crate::domains::resolution::{ScopeExit, TimeoutScope};

/// Starting point for TLDs missing from [`REGISTRY_SERVERS`].
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";

const REGISTRY_SERVERS: &[(&str, &str)] = &[
    ("com", "whois.verisign-grs.com"),
    ("net", "whois.verisign-grs.com"),
    ("org", "whois.pir.org"),
    ("info", "whois.nic.info"),
    ("io", "whois.nic.io"),
    ("dev", "whois.nic.google"),
    ("app", "whois.nic.google"),
    ("uk", "whois.nic.uk"),
    ("de", "whois.denic.de"),
    ("fr", "whois.nic.fr"),
];

/// Trim and check a domain the way every lookup expects it.
pub fn validate_domain(domain: &str) -> Result<String, WhoisError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(WhoisError::MissingDomain);
    }
    if domain.contains("..") || domain.starts_with('.') {
        return Err(WhoisError::InvalidDomain(domain.to_string()));
    }
    Ok(domain.to_string())
}

fn tld(domain: &str) -> &str {
    let domain = domain.trim_end_matches('.');
    domain.rsplit('.').next().unwrap_or(domain)
}

/// Looks up registration data, shared by every request.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    server: Option<String>,
    timeout: Duration,
}

impl WhoisClient {
    /// `server`, when set, is queried for every domain.
    pub fn new(server: Option<String>, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    /// The first server asked about `domain`.
    pub fn server_for(&self, domain: &str) -> String {
        if let Some(server) = &self.server {
            return server.clone();
        }

        let tld = tld(domain).to_ascii_lowercase();
        REGISTRY_SERVERS
            .iter()
            .find(|(known, _)| *known == tld)
            .map_or(IANA_WHOIS_SERVER, |(_, server)| *server)
            .to_string()
    }

    /// Server table handed to the whois client: the TLD and the catch-all
    /// entry both point at `server`. `_` is the table's address entry.
    fn server_table(domain: &str, server: &str) -> String {
        let tld = tld(domain).to_ascii_lowercase();
        serde_json::json!({
            tld: server,
            "": server,
            "_": { "ip": { "host": "whois.arin.net", "query": "n + $addr\r\n" } },
        })
        .to_string()
    }

    pub async fn lookup(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Result<WhoisReport, WhoisError> {
        let domain = validate_domain(domain)?;
        let server = self.server_for(&domain);
        debug!("WHOIS lookup for {} starting at {}", domain, server);

        let whois = WhoIs::from_string(Self::server_table(&domain, &server))
            .map_err(|e| WhoisError::Lookup(format!("failed to initialize client: {e}")))?;
        let options = WhoIsLookupOptions::from_string(domain.as_str())
            .map_err(|_| WhoisError::InvalidDomain(domain.clone()))?;

        let scope = TimeoutScope::new(cancel, self.timeout);
        let raw = match scope.run(whois.lookup_async(options)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("WHOIS lookup for {} failed: {}", domain, e);
                return Err(WhoisError::Lookup(e.to_string()));
            }
            Err(ScopeExit::Cancelled) => return Err(WhoisError::Cancelled),
            Err(ScopeExit::DeadlineElapsed(d)) => return Err(WhoisError::TimedOut(d)),
        };

        Ok(WhoisReport::new(domain, server, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain() {
        assert_eq!(validate_domain("  example.com ").unwrap(), "example.com");
        assert!(matches!(validate_domain("   "), Err(WhoisError::MissingDomain)));

        let err = validate_domain("example..com").unwrap_err();
        assert_eq!(err.to_string(), "invalid domain format: \"example..com\"");
        assert!(err.is_validation());
        assert!(matches!(validate_domain(".example.com"), Err(WhoisError::InvalidDomain(_))));
    }

    #[test]
    fn test_server_selection() {
        let client = WhoisClient::new(None, Duration::from_secs(30));
        assert_eq!(client.server_for("example.com"), "whois.verisign-grs.com");
        assert_eq!(client.server_for("Example.ORG."), "whois.pir.org");
        assert_eq!(client.server_for("example.co.uk"), "whois.nic.uk");
        assert_eq!(client.server_for("example.museum"), IANA_WHOIS_SERVER);
    }

    #[test]
    fn test_configured_server_wins() {
        let client = WhoisClient::new(Some("whois.example.net".to_string()), Duration::from_secs(30));
        assert_eq!(client.server_for("example.com"), "whois.example.net");
        assert_eq!(client.server_for("example.museum"), "whois.example.net");
    }

    #[test]
    fn test_server_table() {
        let table: serde_json::Value =
            serde_json::from_str(&WhoisClient::server_table("Example.IO", "whois.nic.io")).unwrap();
        assert_eq!(table["io"], "whois.nic.io");
        assert_eq!(table[""], "whois.nic.io");
    }

    #[tokio::test]
    async fn test_invalid_domain_rejected_before_lookup() {
        let client = WhoisClient::new(None, Duration::from_secs(30));
        let err = client
            .lookup("..example.com", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_cancelled_lookup() {
        let client = WhoisClient::new(Some("127.0.0.1".to_string()), Duration::from_secs(30));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client.lookup("example.com", &cancel).await.unwrap_err();
        assert!(matches!(err, WhoisError::Cancelled));
        assert_eq!(err.to_string(), "WHOIS query failed: request cancelled");
    }
}
