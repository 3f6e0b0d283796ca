//! Network Diagnostics MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing network
//! diagnostic tools: hostname resolution, DNS record queries (local and
//! DNS-over-HTTPS) and WHOIS lookups.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, transports and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **resolution**: Hostname-to-address resolution with per-family failure reporting
//!   - **dns**: Typed record queries through local resolvers or DNS-over-HTTPS
//!   - **whois**: Domain registration lookups
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use netdiag_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::dns::{DnsQueryReport, DohClient, LocalDnsClient, RecordKind};
pub use domains::resolution::{HostnameResolver, ResolutionReport, ResolutionRequest};
pub use domains::whois::{WhoisClient, WhoisReport};
