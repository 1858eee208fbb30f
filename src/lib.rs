//! EAN-Search MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that exposes the
//! ean-search.org barcode database as two tools:
//!
//! - `lookup_product`: product name for an EAN, GTIN, ISBN or UPC barcode
//! - `find_products`: products matching a set of keywords
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server handler and the stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the two tools and the ean-search.org client they share
//!
//! # Example
//!
//! ```rust,no_run
//! use eansearch_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
