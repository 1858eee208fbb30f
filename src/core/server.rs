//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol. Tool calls are dispatched through the `ToolRouter` built in
//! `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::domains::tools::build_tool_router;
use crate::domains::tools::definitions::{EanSearchApi, EanSearchClient};

/// The main MCP server handler.
///
/// Holds the configuration and the API client for the whole process
/// lifetime; both are read-only and shared by every tool call.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to ean-search.org.
    pub fn new(config: Config) -> super::Result<Self> {
        let token = config.credentials.api_token().unwrap_or_default().to_string();
        let client = EanSearchClient::new(&config.api, token)?;
        info!("ean-search.org client ready ({})", config.api.base_url);
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a server backed by any implementation of the remote API.
    pub fn with_api(config: Config, api: Arc<dyn EanSearchApi>) -> Self {
        let config = Arc::new(config);
        Self {
            tool_router: build_tool_router::<Self>(config.clone(), api),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Metadata of every registered tool.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Looks up products by EAN, GTIN, ISBN or UPC barcode and searches products \
                 by keywords using the ean-search.org database."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::LookupResult;
    use crate::domains::tools::definitions::ean::mock::MockApi;

    fn test_server() -> McpServer {
        McpServer::with_api(
            Config::with_api_token("test-token"),
            Arc::new(MockApi::returning(LookupResult::NotFound)),
        )
    }

    #[test]
    fn test_server_lists_both_tools() {
        let names: Vec<String> = test_server()
            .tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"lookup_product".to_string()));
        assert!(names.contains(&"find_products".to_string()));
    }

    #[test]
    fn test_server_info_enables_tools_only() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.unwrap().contains("ean-search.org"));
    }

    #[test]
    fn test_server_identity_from_config() {
        let server = test_server();
        assert_eq!(server.name(), "eansearch");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
        assert!(server.config().credentials.api_token().is_some());
    }

    #[test]
    fn test_new_builds_without_token() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.tools().len(), 2);
    }
}
