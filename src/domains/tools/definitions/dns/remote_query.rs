//! Remote DNS query tool definition.
//!
//! Same queries as `local_dns_query`, sent to DNS-over-HTTPS servers
//! instead of the host's resolvers.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use tokio_util::sync::CancellationToken;
use tracing::{Span, info, instrument, warn};

use super::local_query::DnsQueryParams;
use crate::domains::dns::{DnsQueryReport, DohClient};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::json_result;

/// Remote DNS query tool - record lookups over DNS-over-HTTPS.
pub struct RemoteDnsQueryTool;

impl RemoteDnsQueryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "remote_dns_query";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Perform DNS queries using remote DNS-over-HTTPS \
        servers (Google and Cloudflare, or the configured server). Supports A, AAAA, CNAME, \
        MX, NS, PTR, SOA, SRV and TXT records. Failed queries are reported with failed=true.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(domain = tracing::field::Empty))]
    pub async fn execute(
        arguments: &serde_json::Value,
        client: &DohClient,
        cancel: &CancellationToken,
    ) -> Result<CallToolResult, ToolError> {
        let params = DnsQueryParams::from_arguments(arguments).inspect_err(|e| {
            warn!("Rejected remote_dns_query arguments: {}", e);
        })?;

        Span::current().record("domain", params.domain.as_str());
        info!(
            "Remote DNS query: '{}' ({})",
            params.domain, params.record_type
        );

        let report = client.query(&params.domain, params.record_type, cancel).await;
        info!(
            "Remote DNS query answered by {} (failed: {})",
            report.server, report.failed
        );

        json_result(&report)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &DohClient,
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
    pub fn create_route<S>(client: Arc<DohClient>) -> ToolRoute<S>
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
