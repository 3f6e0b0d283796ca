//! Record types accepted by the query tools and their rendering.

use std::fmt;
use std::net::IpAddr;

use hickory_resolver::proto::rr::{Name, RData, Record, RecordType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Record types a DNS query tool can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Soa,
    Srv,
    Txt,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A => RecordType::A,
            Self::Aaaa => RecordType::AAAA,
            Self::Cname => RecordType::CNAME,
            Self::Mx => RecordType::MX,
            Self::Ns => RecordType::NS,
            Self::Ptr => RecordType::PTR,
            Self::Soa => RecordType::SOA,
            Self::Srv => RecordType::SRV,
            Self::Txt => RecordType::TXT,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answer record, flattened to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DnsRecord {
    /// Owner name without the trailing dot.
    pub name: String,

    /// Type of this record; a CNAME can appear in an A answer.
    #[serde(rename = "type")]
    pub record_type: String,

    pub ttl: u32,

    /// Record data. MX holds the exchange, SRV holds "weight port target",
    /// SOA holds "mname rname serial refresh retry expire minimum".
    pub value: String,

    /// MX preference or SRV priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecord {
    /// Flatten a resolver record. Returns `None` for data we do not render.
    pub fn from_record(record: &Record) -> Option<Self> {
        let (value, priority) = render_rdata(record.data())?;
        Some(Self {
            name: name_to_string(record.name()),
            record_type: record.record_type().to_string(),
            ttl: record.ttl(),
            value,
            priority,
        })
    }
}

/// Render record data as text plus its ordering field, if any.
pub fn render_rdata(data: &RData) -> Option<(String, Option<u16>)> {
    let rendered = match data {
        RData::A(a) => (a.0.to_string(), None),
        RData::AAAA(aaaa) => (aaaa.0.to_string(), None),
        RData::CNAME(cname) => (name_to_string(&cname.0), None),
        RData::NS(ns) => (name_to_string(&ns.0), None),
        RData::PTR(ptr) => (name_to_string(&ptr.0), None),
        RData::MX(mx) => (name_to_string(mx.exchange()), Some(mx.preference())),
        RData::SRV(srv) => (
            format!(
                "{} {} {}",
                srv.weight(),
                srv.port(),
                name_to_string(srv.target())
            ),
            Some(srv.priority()),
        ),
        RData::SOA(soa) => (
            format!(
                "{} {} {} {} {} {} {}",
                name_to_string(soa.mname()),
                name_to_string(soa.rname()),
                soa.serial(),
                soa.refresh(),
                soa.retry(),
                soa.expire(),
                soa.minimum()
            ),
            None,
        ),
        RData::TXT(txt) => (
            txt.iter()
                .map(|data| String::from_utf8_lossy(data).into_owned())
                .collect::<String>(),
            None,
        ),
        _ => return None,
    };

    Some(rendered)
}

pub(crate) fn name_to_string(name: &Name) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

/// PTR queries accept a plain address and ask for its `in-addr.arpa` /
/// `ip6.arpa` name.
pub(crate) fn reverse_name(name: &str, kind: RecordKind) -> Option<Name> {
    if kind != RecordKind::Ptr {
        return None;
    }
    name.parse::<IpAddr>().ok().map(Name::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::rr::rdata::{A, CNAME, MX, SOA, SRV, TXT};
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn name(value: &str) -> Name {
        Name::from_str(value).unwrap()
    }

    #[test]
    fn test_record_kind_wire_names() {
        let kind: RecordKind = serde_json::from_value(serde_json::json!("AAAA")).unwrap();
        assert_eq!(kind, RecordKind::Aaaa);
        assert_eq!(kind.record_type(), RecordType::AAAA);

        let kind: RecordKind = serde_json::from_value(serde_json::json!("CNAME")).unwrap();
        assert_eq!(kind.to_string(), "CNAME");

        assert!(serde_json::from_value::<RecordKind>(serde_json::json!("CAA")).is_err());
    }

    #[test]
    fn test_render_address_and_names() {
        let (value, priority) = render_rdata(&RData::A(A(Ipv4Addr::new(192, 0, 2, 1)))).unwrap();
        assert_eq!(value, "192.0.2.1");
        assert_eq!(priority, None);

        let (value, _) = render_rdata(&RData::CNAME(CNAME(name("www.example.com.")))).unwrap();
        assert_eq!(value, "www.example.com");
    }

    #[test]
    fn test_render_mx_and_srv_priority() {
        let mx = RData::MX(MX::new(10, name("mail.example.com.")));
        assert_eq!(
            render_rdata(&mx).unwrap(),
            ("mail.example.com".to_string(), Some(10))
        );

        let srv = RData::SRV(SRV::new(5, 20, 5060, name("sip.example.com.")));
        assert_eq!(
            render_rdata(&srv).unwrap(),
            ("20 5060 sip.example.com".to_string(), Some(5))
        );
    }

    #[test]
    fn test_render_soa_and_txt() {
        let soa = RData::SOA(SOA::new(
            name("ns1.example.com."),
            name("hostmaster.example.com."),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        ));
        let (value, _) = render_rdata(&soa).unwrap();
        assert_eq!(
            value,
            "ns1.example.com hostmaster.example.com 2024010101 7200 3600 1209600 300"
        );

        let txt = RData::TXT(TXT::new(vec!["v=spf1 ".to_string(), "-all".to_string()]));
        assert_eq!(render_rdata(&txt).unwrap().0, "v=spf1 -all");
    }

    #[test]
    fn test_from_record() {
        let record = Record::from_rdata(
            name("example.com."),
            300,
            RData::MX(MX::new(0, name("mx.example.com."))),
        );
        let flattened = DnsRecord::from_record(&record).unwrap();
        assert_eq!(flattened.name, "example.com");
        assert_eq!(flattened.record_type, "MX");
        assert_eq!(flattened.ttl, 300);
        assert_eq!(flattened.priority, Some(0));
    }
}
