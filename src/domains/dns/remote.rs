//! Record queries over DNS-over-HTTPS, using the JSON API that Google and
//! Cloudflare both serve.

use std::time::Duration;

use hickory_resolver::proto::rr::RecordType;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::record::{DnsRecord, RecordKind, reverse_name};
use super::report::DnsQueryReport;
use crate::domains::resolution::{ScopeExit, TimeoutScope};

/// Public endpoints tried in order when no server is configured.
pub const DEFAULT_DOH_SERVERS: [&str; 2] = [
    "https://dns.google/resolve",
    "https://cloudflare-dns.com/dns-query",
];

const DNS_JSON: &str = "application/dns-json";

/// Answer body of the JSON API.
#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: u16,

    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    name: String,

    #[serde(rename = "type")]
    record_type: u16,

    #[serde(rename = "TTL", default)]
    ttl: u32,

    data: String,
}

impl DohResponse {
    fn into_records(self, domain: &str, kind: RecordKind) -> Result<Vec<DnsRecord>, String> {
        match self.status {
            0 => {}
            3 => return Err(format!("no such domain: {domain}")),
            code => return Err(format!("server answered {}", rcode_name(code))),
        }

        let records: Vec<DnsRecord> = self.answer.into_iter().map(DohAnswer::into_record).collect();
        if records.is_empty() {
            return Err(format!("no {kind} records found for {domain}"));
        }
        Ok(records)
    }
}

impl DohAnswer {
    fn into_record(self) -> DnsRecord {
        let record_type = RecordType::from(self.record_type);
        let data = self.data.trim();

        let (value, priority) = match record_type {
            RecordType::TXT => (data.trim_matches('"').to_string(), None),
            RecordType::MX | RecordType::SRV => match data.split_once(' ') {
                Some((first, rest)) => match first.parse::<u16>() {
                    Ok(priority) => (strip_name_dots(rest), Some(priority)),
                    Err(_) => (strip_name_dots(data), None),
                },
                None => (strip_name_dots(data), None),
            },
            _ => (strip_name_dots(data), None),
        };

        DnsRecord {
            name: self.name.trim_end_matches('.').to_string(),
            record_type: record_type.to_string(),
            ttl: self.ttl,
            value,
            priority,
        }
    }
}

/// Drop the root dot from every name in a presentation-format field list.
fn strip_name_dots(data: &str) -> String {
    data.split_whitespace()
        .map(|field| field.trim_end_matches('.'))
        .collect::<Vec<_>>()
        .join(" ")
}

fn rcode_name(code: u16) -> String {
    match code {
        1 => "FORMERR".to_string(),
        2 => "SERVFAIL".to_string(),
        4 => "NOTIMP".to_string(),
        5 => "REFUSED".to_string(),
        other => format!("response code {other}"),
    }
}

/// DNS-over-HTTPS client.
///
/// Servers are tried in order until one answers; the deadline covers the
/// whole sequence.
#[derive(Debug, Clone)]
pub struct DohClient {
    http: reqwest::Client,
    servers: Vec<String>,
    timeout: Duration,
}

impl DohClient {
    /// Use `server` alone when given, otherwise the public defaults.
    pub fn new(server: Option<String>, timeout: Duration) -> Self {
        let servers = match server {
            Some(server) => vec![server],
            None => DEFAULT_DOH_SERVERS.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            http: reqwest::Client::new(),
            servers,
            timeout,
        }
    }

    /// Query `domain` for `kind` records. Failures end up in the report.
    pub async fn query(
        &self,
        domain: &str,
        kind: RecordKind,
        cancel: &CancellationToken,
    ) -> DnsQueryReport {
        let scope = TimeoutScope::new(cancel, self.timeout);
        let name = reverse_name(domain, kind)
            .map(|name| name.to_string())
            .unwrap_or_else(|| domain.to_string());

        let mut errors = Vec::new();

        for server in &self.servers {
            match scope.run(self.fetch(server, &name, kind)).await {
                Ok(Ok(response)) => {
                    debug!("DoH answer for {} {} from {}", domain, kind, server);
                    let records = response.into_records(domain, kind);
                    return DnsQueryReport::new(domain, kind, server.as_str(), records);
                }
                Ok(Err(message)) => {
                    warn!("DoH query to {} failed: {}", server, message);
                    errors.push(format!("{server}: {message}"));
                }
                Err(ScopeExit::Cancelled) => {
                    errors.push("request cancelled".to_string());
                    break;
                }
                Err(ScopeExit::DeadlineElapsed(d)) => {
                    errors.push(format!("{server}: timed out after {d:?}"));
                    break;
                }
            }
        }

        DnsQueryReport::new(
            domain,
            kind,
            self.servers.join(", "),
            Err(errors.join("; ")),
        )
    }

    async fn fetch(&self, server: &str, name: &str, kind: RecordKind) -> Result<DohResponse, String> {
        let response = self
            .http
            .get(server)
            .query(&[("name", name), ("type", kind.as_str())])
            .header(ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    format!("connection failed: {e}")
                } else {
                    e.to_string()
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        response
            .json::<DohResponse>()
            .await
            .map_err(|e| format!("invalid response: {e}"))
    }
}
