//! Tool Router - builds the rmcp ToolRouter from registry.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{LocalDnsQueryTool, RemoteDnsQueryTool, ResolveHostnameTool, WhoisQueryTool};
use super::services::ToolServices;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(services: &ToolServices) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(LocalDnsQueryTool::create_route(services.local_dns.clone()))
        .with_route(RemoteDnsQueryTool::create_route(services.remote_dns.clone()))
        .with_route(ResolveHostnameTool::create_route(services.resolver.clone()))
        .with_route(WhoisQueryTool::create_route(services.whois.clone()))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::super::services::tests::stub_services;
    use super::*;

    struct TestServer {}

    #[tokio::test]
    async fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(&stub_services());
        let tools = router.list_all();
        assert_eq!(tools.len(), 4);
        assert!(tools.iter().any(|t| t.name == "resolve_hostname"));
        assert!(tools.iter().any(|t| t.name == "local_dns_query"));
    }

    #[tokio::test]
    async fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let services = stub_services();
        let registry = ToolRegistry::new(services.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(&services);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
