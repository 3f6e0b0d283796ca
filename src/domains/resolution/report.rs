//! Per-family outcomes and the aggregated resolution report.

use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::Serialize;

use super::classify::{FailureClass, classify};
use super::error::{LookupError, ResolutionError};
use super::family::{AddressFamily, Selection};
use super::request::ResolutionRequest;

/// A failed family lookup, reduced to what the report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub class: FailureClass,
    pub message: String,
}

impl Failure {
    pub fn from_error(error: &LookupError) -> Self {
        Self {
            class: classify(Some(error)).unwrap_or(FailureClass::Hard),
            message: error.to_string(),
        }
    }
}

/// The outcome of one attempted family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyOutcome {
    pub family: AddressFamily,
    pub result: Result<Vec<String>, Failure>,
}

impl FamilyOutcome {
    pub fn from_lookup(family: AddressFamily, result: Result<Vec<String>, LookupError>) -> Self {
        Self {
            family,
            result: result.map_err(|e| Failure::from_error(&e)),
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.result.as_ref().err()
    }
}

/// The report returned for every processed resolution call.
///
/// A family never carries both an address list and an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ResolutionReport {
    /// The hostname that was resolved.
    hostname: String,
    /// The family selector, echoed as received.
    ip_version: String,
    /// RFC 3339 time at which the report was built.
    timestamp: String,
    /// True when resolution produced no usable addresses.
    failed: bool,
    /// Overall error message, present only when `failed` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv4_addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv4_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv6_addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv6_error: Option<String>,
}

impl ResolutionReport {
    /// Build the report for `request` from the outcomes of its lookups.
    ///
    /// Single-family requests put a failure in `error` and set `failed`.
    /// Dual-family requests keep failures per family and only set `failed`
    /// when every family failed.
    pub fn from_outcomes(request: &ResolutionRequest, outcomes: &[FamilyOutcome]) -> Self {
        let mut report = Self {
            hostname: request.hostname.clone(),
            ip_version: request.ip_version.as_str().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            failed: false,
            error: None,
            ipv4_addresses: None,
            ipv4_error: None,
            ipv6_addresses: None,
            ipv6_error: None,
        };

        let single = matches!(request.ip_version.selection(), Selection::Single(_));

        for outcome in outcomes {
            match &outcome.result {
                Ok(addresses) => *report.addresses_slot(outcome.family) = Some(addresses.clone()),
                Err(failure) if single => {
                    report.failed = true;
                    report.error = Some(failure.message.clone());
                }
                Err(failure) => *report.error_slot(outcome.family) = Some(failure.message.clone()),
            }
        }

        if !single && !outcomes.is_empty() && outcomes.iter().all(|o| o.result.is_err()) {
            let messages: Vec<String> = outcomes
                .iter()
                .filter_map(|o| o.failure().map(|f| format!("{}: {}", o.family, f.message)))
                .collect();
            report.failed = true;
            report.error = Some(messages.join("; "));
        }

        report
    }

    fn addresses_slot(&mut self, family: AddressFamily) -> &mut Option<Vec<String>> {
        match family {
            AddressFamily::Ipv4 => &mut self.ipv4_addresses,
            AddressFamily::Ipv6 => &mut self.ipv6_addresses,
        }
    }

    fn error_slot(&mut self, family: AddressFamily) -> &mut Option<String> {
        match family {
            AddressFamily::Ipv4 => &mut self.ipv4_error,
            AddressFamily::Ipv6 => &mut self.ipv6_error,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn ip_version(&self) -> &str {
        &self.ip_version
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn addresses(&self, family: AddressFamily) -> Option<&[String]> {
        match family {
            AddressFamily::Ipv4 => self.ipv4_addresses.as_deref(),
            AddressFamily::Ipv6 => self.ipv6_addresses.as_deref(),
        }
    }

    pub fn family_error(&self, family: AddressFamily) -> Option<&str> {
        match family {
            AddressFamily::Ipv4 => self.ipv4_error.as_deref(),
            AddressFamily::Ipv6 => self.ipv6_error.as_deref(),
        }
    }

    /// Encode the report as compact JSON text.
    pub fn to_json(&self) -> Result<String, ResolutionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, ResolutionError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resolution::error::LookupErrorKind;
    use crate::domains::resolution::family::IpVersion;

    fn resolved(family: AddressFamily, addrs: &[&str]) -> FamilyOutcome {
        FamilyOutcome::from_lookup(family, Ok(addrs.iter().map(|a| a.to_string()).collect()))
    }

    fn not_found(family: AddressFamily) -> FamilyOutcome {
        FamilyOutcome::from_lookup(
            family,
            Err(LookupError::new("example.invalid", family, LookupErrorKind::NotFound)),
        )
    }

    #[test]
    fn test_single_family_success() {
        let request = ResolutionRequest::new("example.com", IpVersion::Ipv4);
        let report = ResolutionReport::from_outcomes(
            &request,
            &[resolved(AddressFamily::Ipv4, &["93.184.216.34"])],
        );

        assert!(!report.failed());
        assert_eq!(report.error(), None);
        assert_eq!(
            report.addresses(AddressFamily::Ipv4),
            Some(&["93.184.216.34".to_string()][..])
        );
        assert_eq!(report.addresses(AddressFamily::Ipv6), None);
    }

    #[test]
    fn test_single_family_failure_is_embedded() {
        let request = ResolutionRequest::new("example.invalid", IpVersion::Ipv6);
        let report = ResolutionReport::from_outcomes(&request, &[not_found(AddressFamily::Ipv6)]);

        assert!(report.failed());
        assert!(report.error().is_some_and(|e| e.contains("no such host")));
        assert_eq!(report.addresses(AddressFamily::Ipv6), None);
        assert_eq!(report.family_error(AddressFamily::Ipv6), None);
    }

    #[test]
    fn test_dual_partial_success() {
        let request = ResolutionRequest::new("v4only.example", IpVersion::Both);
        let report = ResolutionReport::from_outcomes(
            &request,
            &[
                resolved(AddressFamily::Ipv4, &["192.0.2.1"]),
                not_found(AddressFamily::Ipv6),
            ],
        );

        assert!(!report.failed());
        assert_eq!(report.error(), None);
        assert!(report.addresses(AddressFamily::Ipv4).is_some());
        assert!(report.family_error(AddressFamily::Ipv6).is_some());
        assert_eq!(report.addresses(AddressFamily::Ipv6), None);
        assert_eq!(report.family_error(AddressFamily::Ipv4), None);
    }

    #[test]
    fn test_dual_total_failure() {
        let request = ResolutionRequest::new("example.invalid", IpVersion::Both);
        let report = ResolutionReport::from_outcomes(
            &request,
            &[not_found(AddressFamily::Ipv4), not_found(AddressFamily::Ipv6)],
        );

        assert!(report.failed());
        let error = report.error().unwrap();
        assert!(error.starts_with("ipv4: lookup example.invalid (ipv4)"));
        assert!(error.contains("; ipv6: lookup example.invalid (ipv6)"));
        assert!(report.family_error(AddressFamily::Ipv4).is_some());
        assert!(report.family_error(AddressFamily::Ipv6).is_some());
        assert_eq!(report.addresses(AddressFamily::Ipv4), None);
        assert_eq!(report.addresses(AddressFamily::Ipv6), None);
    }

    #[test]
    fn test_serialized_shape() {
        let request = ResolutionRequest::new("example.com", IpVersion::Both);
        let report = ResolutionReport::from_outcomes(
            &request,
            &[
                resolved(AddressFamily::Ipv4, &["192.0.2.1", "192.0.2.2"]),
                not_found(AddressFamily::Ipv6),
            ],
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["hostname"], "example.com");
        assert_eq!(json["ip_version"], "both");
        assert_eq!(json["failed"], false);
        assert_eq!(json["ipv4_addresses"], serde_json::json!(["192.0.2.1", "192.0.2.2"]));
        assert!(json["ipv6_error"].is_string());
        assert!(json.get("error").is_none());
        assert!(json.get("ipv6_addresses").is_none());
        assert!(json.get("ipv4_error").is_none());

        assert_eq!(json["timestamp"], report.timestamp());
        assert!(chrono::DateTime::parse_from_rfc3339(report.timestamp()).is_ok());
    }

    #[test]
    fn test_unrecognized_selector_is_echoed() {
        let request = ResolutionRequest::new("example.com", IpVersion::parse("dual"));
        let report = ResolutionReport::from_outcomes(
            &request,
            &[
                resolved(AddressFamily::Ipv4, &["192.0.2.1"]),
                resolved(AddressFamily::Ipv6, &["2001:db8::1"]),
            ],
        );

        assert_eq!(report.ip_version(), "dual");
        assert!(!report.failed());
        assert!(report.addresses(AddressFamily::Ipv6).is_some());
    }
}
