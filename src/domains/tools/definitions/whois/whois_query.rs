//! WHOIS query tool definition.

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

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::{json_result, parse_params};
use crate::domains::whois::{WhoisClient, WhoisReport};

/// Parameters for the whois_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WhoisQueryParams {
    /// The domain to look up (e.g., example.com).
    pub domain: String,
}

/// WHOIS query tool - domain registration lookups.
pub struct WhoisQueryTool;

impl WhoisQueryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "whois_query";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Perform WHOIS lookups to get domain registration information.";

    /// Execute the tool logic.
    ///
    /// Unlike the DNS tools, a failed lookup is an error: there is no
    /// partial answer to report.
    #[instrument(skip_all, fields(domain = tracing::field::Empty))]
    pub async fn execute(
        arguments: &serde_json::Value,
        client: &WhoisClient,
        cancel: &CancellationToken,
    ) -> Result<CallToolResult, ToolError> {
        let params: WhoisQueryParams = parse_params(arguments, &["domain"]).inspect_err(|e| {
            warn!("Rejected whois_query arguments: {}", e);
        })?;

        Span::current().record("domain", params.domain.trim());
        info!("WHOIS query: '{}'", params.domain.trim());

        let report = client.lookup(&params.domain, cancel).await?;
        info!(
            "WHOIS answer for '{}' from {} ({} bytes)",
            report.domain,
            report.server,
            report.result.len()
        );

        json_result(&report)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: &WhoisClient,
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
            input_schema: schema_for_type::<WhoisQueryParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<WhoisReport>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: Arc<WhoisClient>) -> ToolRoute<S>
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
