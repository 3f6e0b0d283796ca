pub mod whois_query;

pub use whois_query::{WhoisQueryParams, WhoisQueryTool};
