pub mod local_query;
pub mod remote_query;
pub mod resolve_hostname;

pub use local_query::{DnsQueryParams, LocalDnsQueryTool};
pub use remote_query::RemoteDnsQueryTool;
pub use resolve_hostname::{IpVersionParam, ResolveHostnameParams, ResolveHostnameTool};
