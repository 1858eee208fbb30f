//! Transport layer for the MCP server.
//!
//! The server talks to its host over standard input/output only; the
//! transport is fixed at process start and every message is handed to the
//! `McpServer` handler by rmcp.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
