//! Keyword product search tool.
//!
//! Passes the keywords unchanged to the ean-search.org product search and
//! flattens the first page of results into one line of text.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::api::{EanSearchApi, EanSearchError, LookupResult, ProductRecord};
use super::common::{NO_PRODUCTS_FOUND, UNKNOWN_CATEGORY, check_credentials, success_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

/// Parameters for the product search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindProductsParams {
    #[schemars(description = "keywords to search for")]
    pub keywords: String,
}

/// Product search tool implementation.
#[derive(Debug, Clone)]
pub struct FindProductsTool;

impl FindProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "find_products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Find products matching all the keywords including their EAN barcode.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(keywords = %params.keywords))]
    pub async fn execute(
        params: &FindProductsParams,
        config: &Config,
        api: &dyn EanSearchApi,
    ) -> Result<String, EanSearchError> {
        if let Some(message) = check_credentials(config) {
            return Ok(message);
        }

        info!("Searching products");
        let result = api
            .product_search(&params.keywords)
            .await
            .inspect_err(|e| error!("Product search failed: {}", e))?;

        if let LookupResult::RecordList(records) = &result {
            debug!(count = records.len(), "Formatting search results");
        }

        Ok(Self::format(&result))
    }

    /// Render search results in the order the API returned them.
    pub fn format(result: &LookupResult) -> String {
        match result {
            LookupResult::RecordList(records) if !records.is_empty() => records
                .iter()
                .map(Self::describe)
                .collect::<Vec<_>>()
                .join(", "),
            _ => NO_PRODUCTS_FOUND.to_string(),
        }
    }

    /// `EAN <ean> is <name>`, plus the category when it is known.
    fn describe(record: &ProductRecord) -> String {
        let mut fragment = format!("EAN {} is {}", record.ean, record.name);
        let category = record
            .category_name
            .as_deref()
            .filter(|c| !c.is_empty() && *c != UNKNOWN_CATEGORY);
        if let Some(category) = category {
            fragment.push_str(" from the category ");
            fragment.push_str(category);
        }
        fragment
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FindProductsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(config: Arc<Config>, api: Arc<dyn EanSearchApi>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            let api = api.clone();
            async move {
                let params: FindProductsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

                let text = Self::execute(&params, &config, api.as_ref())
                    .await
                    .map_err(ToolError::from)?;

                Ok::<_, McpError>(success_result(text))
            }
            .boxed()
        })
    }
}
