//! Hostname resolution tool definition.
//!
//! Resolves a hostname to its IPv4 and/or IPv6 addresses using the system
//! resolver. Resolution failures are returned as data (`failed: true`), so
//! a call only errors on invalid input or an encoding failure.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use tokio_util::sync::CancellationToken;
use tracing::{Span, info, instrument, warn};

use crate::domains::resolution::{
    FailureClass, HostnameResolver, ResolutionReport, ResolutionRequest,
};
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the resolve_hostname tool.
///
/// Only used to publish the input schema. Arguments are validated by
/// [`ResolutionRequest::from_arguments`] so type errors can name the field.
#[derive(Debug, Clone, JsonSchema)]
pub struct ResolveHostnameParams {
    /// The hostname to resolve (e.g., example.com).
    pub hostname: String,

    /// IP version to resolve (ipv4, ipv6, or both); defaults to ipv4.
    #[serde(default)]
    pub ip_version: Option<IpVersionParam>,
}

/// Accepted values for `ip_version`.
#[derive(Debug, Clone, Copy, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IpVersionParam {
    Ipv4,
    Ipv6,
    Both,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Resolve hostname tool - converts a hostname to IP addresses.
pub struct ResolveHostnameTool;

impl ResolveHostnameTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "resolve_hostname";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert a hostname to its corresponding IP addresses. \
        Use ip_version to choose ipv4 (default), ipv6, or both. Lookups that find no address \
        are reported with failed=true instead of an error.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(hostname = tracing::field::Empty))]
    pub async fn execute(
        arguments: &serde_json::Value,
        resolver: &HostnameResolver,
        cancel: &CancellationToken,
    ) -> Result<CallToolResult, ToolError> {
        let request = ResolutionRequest::from_arguments(arguments).inspect_err(|e| {
            warn!("Rejected resolve_hostname arguments: {}", e);
        })?;

        Span::current().record("hostname", request.hostname.as_str());
        info!(
            "Resolve tool called: '{}' ({})",
            request.hostname, request.ip_version
        );

        let outcomes = resolver.resolve_families(&request, cancel).await;

        for outcome in &outcomes {
            if let Some(failure) = outcome.failure() {
                match failure.class {
                    FailureClass::NotFound => info!("{}", failure.message),
                    FailureClass::Hard => warn!("{}", failure.message),
                }
            }
        }

        let report = ResolutionReport::from_outcomes(&request, &outcomes);
        let text = report.to_json()?;
        let structured = report.to_value()?;

        info!(
            "Resolved '{}' (failed: {})",
            report.hostname(),
            report.failed()
        );

        Ok(CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    ///
    /// The HTTP transport has no cancellation signal of its own; the call is
    /// abandoned when the request future is dropped.
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        resolver: &HostnameResolver,
    ) -> Result<serde_json::Value, McpError> {
        let cancel = CancellationToken::new();
        let result = Self::execute(&arguments, resolver, &cancel).await?;

        serde_json::to_value(&result).map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ResolveHostnameParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ResolutionReport>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(resolver: Arc<HostnameResolver>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let cancel = ctx.request_context.ct.clone();
            let resolver = resolver.clone();
            async move {
                let arguments = serde_json::Value::Object(args);
                Self::execute(&arguments, &resolver, &cancel)
                    .await
                    .map_err(McpError::from)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::resolution::resolver::tests::{Answer, StubLookup};
    use rmcp::model::RawContent;
    use serde_json::json;
    use std::time::Duration;

    fn stub_resolver(ipv4: Answer, ipv6: Answer) -> HostnameResolver {
        HostnameResolver::new(Arc::new(StubLookup::new(ipv4, ipv6)), Duration::from_secs(5))
    }

    fn text_payload(result: &CallToolResult) -> serde_json::Value {
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        serde_json::from_str(text).expect("payload should be JSON")
    }

    #[tokio::test]
    async fn test_default_ip_version() {
        let resolver = stub_resolver(Answer::Addresses(vec!["127.0.0.1"]), Answer::NotFound);
        let result = ResolveHostnameTool::execute(
            &json!({ "hostname": "localhost" }),
            &resolver,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(result.content.len(), 1);
        let payload = text_payload(&result);
        assert_eq!(payload["hostname"], "localhost");
        assert_eq!(payload["ip_version"], "ipv4");
        assert_eq!(payload["failed"], false);
        assert_eq!(payload["ipv4_addresses"], json!(["127.0.0.1"]));
        assert!(payload.get("error").is_none());
    }

    #[tokio::test]
    async fn test_nonexistent_domain_is_not_an_error() {
        let resolver = stub_resolver(Answer::NotFound, Answer::NotFound);
        let result = ResolveHostnameTool::execute(
            &json!({
                "hostname": "this-domain-definitely-does-not-exist-12345.invalid",
                "ip_version": "ipv4"
            }),
            &resolver,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(result.is_error, Some(false));
        let payload = text_payload(&result);
        assert_eq!(payload["failed"], true);
        assert!(payload["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(payload.get("ipv4_addresses").is_none());
    }

    #[tokio::test]
    async fn test_both_versions_partial_success() {
        let resolver = stub_resolver(Answer::Addresses(vec!["192.0.2.1"]), Answer::NotFound);
        let result = ResolveHostnameTool::execute(
            &json!({ "hostname": "v4only.example", "ip_version": "both" }),
            &resolver,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        let payload = text_payload(&result);
        assert_eq!(payload["ip_version"], "both");
        assert_eq!(payload["failed"], false);
        assert!(payload["ipv4_addresses"].is_array());
        assert!(payload["ipv6_error"].is_string());
    }

    #[tokio::test]
    async fn test_structured_content_matches_text() {
        let resolver = stub_resolver(
            Answer::Addresses(vec!["192.0.2.1"]),
            Answer::Addresses(vec!["2001:db8::1"]),
        );
        let result = ResolveHostnameTool::execute(
            &json!({ "hostname": "example.com", "ip_version": "both" }),
            &resolver,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        let structured = result
            .structured_content
            .clone()
            .expect("structured_content should exist");
        assert_eq!(structured, text_payload(&result));
    }

    #[tokio::test]
    async fn test_validation_errors_abort() {
        let stub = Arc::new(StubLookup::new(Answer::NotFound, Answer::NotFound));
        let resolver = HostnameResolver::new(stub.clone(), Duration::from_secs(5));
        let cancel = CancellationToken::new();

        for arguments in [
            json!({ "ip_version": "ipv4" }),
            json!({ "hostname": "", "ip_version": "ipv4" }),
            json!({ "hostname": 12345 }),
        ] {
            let err = ResolveHostnameTool::execute(&arguments, &resolver, &cancel)
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::Resolution(ref e) if e.is_validation()));
        }

        let err = ResolveHostnameTool::execute(&json!({ "hostname": 12345 }), &resolver, &cancel)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse tool input"));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_tool_metadata() {
        let tool = ResolveHostnameTool::to_tool();
        assert_eq!(tool.name, "resolve_hostname");
        assert!(tool.output_schema.is_some());

        let properties = tool.input_schema["properties"]
            .as_object()
            .expect("input schema should list properties");
        assert!(properties.contains_key("hostname"));
        assert!(properties.contains_key("ip_version"));

        let required = tool.input_schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "hostname"));
        assert!(!required.iter().any(|v| v == "ip_version"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_handler() {
        let resolver = stub_resolver(Answer::Addresses(vec!["192.0.2.1"]), Answer::NotFound);
        let result = ResolveHostnameTool::http_handler(json!({ "hostname": "example.com" }), &resolver)
            .await
            .unwrap();

        assert!(result.get("structuredContent").is_some());
        assert_eq!(result["isError"], false);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_handler_missing_param() {
        let resolver = stub_resolver(Answer::NotFound, Answer::NotFound);
        let err = ResolveHostnameTool::http_handler(json!({}), &resolver)
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("parameter \"hostname\" is required"));
    }
}
