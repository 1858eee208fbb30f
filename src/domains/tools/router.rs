//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only wires the
//! shared configuration and API client into them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{EanSearchApi, FindProductsTool, LookupProductTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>, api: Arc<dyn EanSearchApi>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(LookupProductTool::create_route(config.clone(), api.clone()))
        .with_route(FindProductsTool::create_route(config, api))
}
