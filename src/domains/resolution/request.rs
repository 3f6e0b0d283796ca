//! Parameter extraction for hostname resolution.

use serde_json::Value;

use super::error::ResolutionError;
use super::family::IpVersion;

/// A validated resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub hostname: String,
    pub ip_version: IpVersion,
}

impl ResolutionRequest {
    pub fn new(hostname: impl Into<String>, ip_version: IpVersion) -> Self {
        Self {
            hostname: hostname.into(),
            ip_version,
        }
    }

    /// Extract `hostname` and `ip_version` from an untyped argument payload.
    ///
    /// The hostname is trimmed and must be non-empty. A missing, `null` or
    /// empty `ip_version` defaults to `ipv4`; any other string is accepted
    /// as-is.
    pub fn from_arguments(arguments: &Value) -> Result<Self, ResolutionError> {
        let map = arguments
            .as_object()
            .ok_or(ResolutionError::MalformedArguments)?;

        let hostname = match optional_string(map.get("hostname"), "hostname")? {
            Some(h) => h.trim(),
            None => "",
        };
        if hostname.is_empty() {
            return Err(ResolutionError::MissingParameter("hostname"));
        }

        let ip_version = optional_string(map.get("ip_version"), "ip_version")?
            .map(IpVersion::parse)
            .unwrap_or_default();

        Ok(Self::new(hostname, ip_version))
    }
}

fn optional_string<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<Option<&'a str>, ResolutionError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ResolutionError::InvalidFieldType {
            field,
            expected: "string",
            actual: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
