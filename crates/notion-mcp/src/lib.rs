//! Notion MCP Server library.
//!
//! Provides the [`server::NotionMcpServer`] MCP server handler and tool parameter/response types.
//! Used by the `notion-mcp` binary and available for integration testing.

pub mod logging;
pub mod server;
pub mod tools;
