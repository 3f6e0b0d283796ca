//! Local DNS query tool definition.
//!
//! Queries one record type through the resolvers configured on this host.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{Span, info, instrument, warn};

use crate::domains::dns::{DnsQueryReport, LocalDnsClient, RecordKind};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::{json_result, parse_params};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters shared by the DNS query tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DnsQueryParams {
    /// The domain to query (e.g., example.com). PTR queries also accept an IP address.
    pub domain: String,

    /// DNS record type to query.
    pub record_type: RecordKind,
}

impl DnsQueryParams {
    pub fn from_arguments(arguments: &serde_json::Value) -> Result<Self, ToolError> {
        let mut params: Self = parse_params(arguments, &["domain", "record_type"])?;
        params.domain = params.domain.trim().to_string();
        Ok(params)
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Local DNS query tool - record lookups through the host's resolvers.
pub struct LocalDnsQueryTool;

impl LocalDnsQueryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "local_dns_query";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Perform DNS queries using local OS-defined DNS servers. \
        Supports A, AAAA, CNAME, MX, NS, PTR, SOA, SRV and TXT records. Queries that find \
        nothing are reported with failed=true instead of an error.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(domain = tracing::field::Empty))]
    pub async fn execute(
        arguments: &serde_json::Value,
        client: &LocalDnsClient,
        cancel: &CancellationToken,
    ) -> Result<CallToolResult, ToolError> {
        let params = DnsQueryParams::from_arguments(arguments).inspect_err(|e| {
            warn!("Rejected local_dns_query arguments: {}", e);
        })?;

        Span::current().record("domain", params.domain.as_str());
        info!(
            "Local DNS query: '{}' ({})",
            params.domain, params.record_type
        );

        let report = client.query(&params.domain, params.record_type, cancel).await;
        match &report.error {
            Some(error) => info!("{}", error),
            None => info!("Found {} record(s)", report.records.len()),
        }

        json_result(&report)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &LocalDnsClient,
    ) -> Result<serde_json::Value, McpError> {
        let cancel = CancellationToken::new();
        let result = Self::execute(&arguments, client, &cancel).await?;

        serde_json::to_value(&result).map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DnsQueryParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DnsQueryReport>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: Arc<LocalDnsClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let cancel = ctx.request_context.ct.clone();
            let client = client.clone();
            async move {
                let arguments = serde_json::Value::Object(args);
                Self::execute(&arguments, &client, &cancel)
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
