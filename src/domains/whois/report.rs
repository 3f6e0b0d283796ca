//! WHOIS answer and the fields extracted from it.

use std::sync::LazyLock;

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use schemars::JsonSchema;
use serde::Serialize;

static REGISTRAR: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)Registrar:[ \t]*(.+)",
        r"(?i)Registrar Name:[ \t]*(.+)",
        r"(?i)Sponsoring Registrar:[ \t]*(.+)",
    ])
});

static CREATED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)Creation Date:[ \t]*(.+)",
        r"(?i)Created Date:[ \t]*(.+)",
        r"(?i)Registration Date:[ \t]*(.+)",
        r"(?i)created:[ \t]*(.+)",
    ])
});

static EXPIRES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)Registry Expiry Date:[ \t]*(.+)",
        r"(?i)Expir(?:y|ation) Date:[ \t]*(.+)",
        r"(?i)paid-till:[ \t]*(.+)",
    ])
});

static NAME_SERVERS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"(?i)Name Server:[ \t]*(.+)", r"(?i)nserver:[ \t]*(.+)"]));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
}

/// Result of one WHOIS lookup.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WhoisReport {
    pub domain: String,

    /// First server queried; referrals may have been followed from there.
    pub server: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    pub name_servers: Vec<String>,

    /// Raw answer text.
    pub result: String,

    pub timestamp: String,
}

impl WhoisReport {
    pub fn new(domain: impl Into<String>, server: impl Into<String>, raw: String) -> Self {
        Self {
            domain: domain.into(),
            server: server.into(),
            registrar: first_match(&raw, &REGISTRAR),
            creation_date: first_match(&raw, &CREATED),
            expiration_date: first_match(&raw, &EXPIRES),
            name_servers: all_matches(&raw, &NAME_SERVERS),
            result: raw,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

fn first_match(text: &str, patterns: &[Regex]) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Every match across all patterns, lowercased and deduplicated.
fn all_matches(text: &str, patterns: &[Regex]) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for re in patterns {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim().to_lowercase();
                if !value.is_empty() && !values.contains(&value) {
                    values.push(value);
                }
            }
        }
    }
    values
}
