//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use std::time::Duration;

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Default bound for one resolution call.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default bound for one WHOIS exchange, referrals included.
pub const DEFAULT_WHOIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Hostname resolution and DNS query configuration.
    pub resolution: ResolutionConfig,

    /// WHOIS lookup configuration.
    pub whois: WhoisConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for hostname resolution and DNS queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Upper bound for one call, shared by both lookups of a dual request.
    pub timeout: Duration,

    /// DNS-over-HTTPS endpoint replacing the public Google/Cloudflare pair.
    pub doh_server: Option<String>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_RESOLVE_TIMEOUT,
            doh_server: None,
        }
    }
}

/// Configuration for WHOIS lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoisConfig {
    /// WHOIS server queried for every domain instead of the per-TLD table.
    pub server: Option<String>,

    /// Upper bound for one lookup.
    pub timeout: Duration,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            server: None,
            timeout: DEFAULT_WHOIS_TIMEOUT,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "netdiag-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            resolution: ResolutionConfig::default(),
            whois: WhoisConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_RESOLVE_TIMEOUT`,
    /// `MCP_DOH_SERVER`, `MCP_WHOIS_SERVER`, `MCP_WHOIS_TIMEOUT`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&timestamps, true);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(timeout) = std::env::var("MCP_RESOLVE_TIMEOUT") {
            config.resolution.timeout = parse_duration(&timeout)?;
        }

        config.resolution.doh_server = non_empty_var("MCP_DOH_SERVER");
        config.whois.server = non_empty_var("MCP_WHOIS_SERVER");

        if let Ok(timeout) = std::env::var("MCP_WHOIS_TIMEOUT") {
            config.whois.timeout = parse_duration(&timeout)?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a human-readable duration such as `5s`, `1500ms`, `1m30s` or `1.5s`.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let value = value.trim();
    let duration = humantime::parse_duration(value)
        .map_err(|e| Error::config(format!("invalid duration {value:?}: {e}")))?;

    if duration.is_zero() {
        return Err(Error::config("timeout must be greater than zero"));
    }

    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration(" 10s ").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_duration_compound_and_fractional() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("500us").unwrap(), Duration::from_micros(500));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("0s").is_err());
    }

    #[test]
    fn test_timeout_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_RESOLVE_TIMEOUT", "750ms");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.resolution.timeout, Duration::from_millis(750));
        unsafe {
            std::env::remove_var("MCP_RESOLVE_TIMEOUT");
        }
    }

    #[test]
    fn test_invalid_timeout_from_env_is_an_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_RESOLVE_TIMEOUT", "soon");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_RESOLVE_TIMEOUT");
        }
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_timeout_default_fallback() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_RESOLVE_TIMEOUT");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.resolution.timeout, DEFAULT_RESOLVE_TIMEOUT);
    }

    #[test]
    fn test_whois_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_WHOIS_SERVER", " whois.example.net ");
            std::env::set_var("MCP_WHOIS_TIMEOUT", "1m30s");
            std::env::set_var("MCP_DOH_SERVER", "");
        }
        let config = Config::from_env().unwrap();
        unsafe {
            std::env::remove_var("MCP_WHOIS_SERVER");
            std::env::remove_var("MCP_WHOIS_TIMEOUT");
            std::env::remove_var("MCP_DOH_SERVER");
        }
        assert_eq!(config.whois.server.as_deref(), Some("whois.example.net"));
        assert_eq!(config.whois.timeout, Duration::from_secs(90));
        assert_eq!(config.resolution.doh_server, None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE", false));
        assert!(!parse_flag("0", true));
        assert!(parse_flag("maybe", true));
    }
}
