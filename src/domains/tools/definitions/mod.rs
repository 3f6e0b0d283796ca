//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ToolError;

pub mod dns;
pub mod whois;

pub use dns::{
    DnsQueryParams, IpVersionParam, LocalDnsQueryTool, RemoteDnsQueryTool, ResolveHostnameParams,
    ResolveHostnameTool,
};
pub use whois::{WhoisQueryParams, WhoisQueryTool};

/// Deserialize tool arguments, reporting absent or blank `required` fields
/// by name first.
pub(crate) fn parse_params<T: DeserializeOwned>(
    arguments: &Value,
    required: &[&'static str],
) -> Result<T, ToolError> {
    for &field in required {
        match arguments.get(field) {
            None | Some(Value::Null) => return Err(ToolError::MissingParameter(field)),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(ToolError::MissingParameter(field));
            }
            _ => {}
        }
    }

    serde_json::from_value(arguments.clone()).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

/// Wrap a report as both text and structured content.
pub(crate) fn json_result<T: Serialize>(report: &T) -> Result<CallToolResult, ToolError> {
    let structured = serde_json::to_value(report)?;
    let text = serde_json::to_string_pretty(&structured)?;

    Ok(CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    })
}
