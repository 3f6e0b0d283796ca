//! Address families and the family selector.

use std::fmt;

use serde::Serialize;

/// A single address family a lookup can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which families a request asks for.
///
/// Parsing never fails: a value other than `ipv4`, `ipv6` or `both` is kept
/// as [`IpVersion::Other`] and handled like `both`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IpVersion {
    #[default]
    Ipv4,
    Ipv6,
    Both,
    Other(String),
}

/// The lookup plan derived from an [`IpVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single(AddressFamily),
    Dual,
}

impl IpVersion {
    /// Parse a raw selector. Empty input yields the `ipv4` default.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "ipv4" => Self::Ipv4,
            "ipv6" => Self::Ipv6,
            "both" => Self::Both,
            other => Self::Other(other.to_string()),
        }
    }

    /// The selector as it is echoed back in reports.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Both => "both",
            Self::Other(raw) => raw,
        }
    }

    // Unrecognized selectors fall through to the dual-family path.
    pub fn selection(&self) -> Selection {
        match self {
            Self::Ipv4 => Selection::Single(AddressFamily::Ipv4),
            Self::Ipv6 => Selection::Single(AddressFamily::Ipv6),
            Self::Both | Self::Other(_) => Selection::Dual,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
