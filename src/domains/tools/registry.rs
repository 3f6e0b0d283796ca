//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;
#[cfg(feature = "http")]
use rmcp::ErrorData as McpError;

use super::definitions::{LocalDnsQueryTool, RemoteDnsQueryTool, ResolveHostnameTool, WhoisQueryTool};
use super::services::ToolServices;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub struct ToolRegistry {
    services: ToolServices,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(services: ToolServices) -> Self {
        Self { services }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            LocalDnsQueryTool::NAME,
            RemoteDnsQueryTool::NAME,
            ResolveHostnameTool::NAME,
            WhoisQueryTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            LocalDnsQueryTool::to_tool(),
            RemoteDnsQueryTool::to_tool(),
            ResolveHostnameTool::to_tool(),
            WhoisQueryTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError> {
        match name {
            LocalDnsQueryTool::NAME => {
                LocalDnsQueryTool::http_handler(arguments, &self.services.local_dns).await
            }
            RemoteDnsQueryTool::NAME => {
                RemoteDnsQueryTool::http_handler(arguments, &self.services.remote_dns).await
            }
            ResolveHostnameTool::NAME => {
                ResolveHostnameTool::http_handler(arguments, &self.services.resolver).await
            }
            WhoisQueryTool::NAME => {
                WhoisQueryTool::http_handler(arguments, &self.services.whois).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(super::ToolError::not_found(name).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::services::tests::stub_services;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(stub_services())
    }

    #[tokio::test]
    async fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(
            names,
            vec!["local_dns_query", "remote_dns_query", "resolve_hostname", "whois_query"]
        );
    }

    #[tokio::test]
    async fn test_get_all_tools_matches_names() {
        let tools = ToolRegistry::get_all_tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, test_registry().tool_names());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_resolve() {
        let result = test_registry()
            .call_tool("resolve_hostname", serde_json::json!({ "hostname": "example.com" }))
            .await
            .unwrap();
        assert_eq!(
            result["structuredContent"]["ipv4_addresses"],
            serde_json::json!(["192.0.2.1"])
        );
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_local_dns_query() {
        let result = test_registry()
            .call_tool(
                "local_dns_query",
                serde_json::json!({ "domain": "example.com", "record_type": "MX" }),
            )
            .await
            .unwrap();
        assert_eq!(result["structuredContent"]["records"][0]["priority"], 10);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_whois_validation() {
        let err = test_registry()
            .call_tool("whois_query", serde_json::json!({ "domain": "a..b" }))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let result = test_registry()
            .call_tool("unknown", serde_json::json!({}))
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Tool not found: unknown");
    }
}
