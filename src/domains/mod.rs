//! Domains module containing business logic organized by bounded contexts.
//!
//! - **resolution**: hostname resolution and partial-failure aggregation
//! - **dns**: typed record queries, local or over DNS-over-HTTPS
//! - **whois**: domain registration lookups
//! - **tools**: MCP tools exposing the domains to clients

pub mod dns;
pub mod resolution;
pub mod tools;
pub mod whois;
