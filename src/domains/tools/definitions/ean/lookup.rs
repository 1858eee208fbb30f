//! Barcode lookup tool.
//!
//! Resolves an EAN, GTIN, UPC or ISBN-10 to a product name using
//! ean-search.org. Ten-character inputs (after normalization) are sent to the
//! ISBN lookup, everything else to the generic barcode lookup.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::api::{EanSearchApi, EanSearchError, LookupResult};
use super::common::{
    LookupKind, NO_PRODUCT_FOUND, check_credentials, normalize_barcode, success_result,
};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

/// Parameters for the barcode lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LookupProductParams {
    #[schemars(description = "the barcode (EAN, GTIN, ISBN or UPC)")]
    pub barcode: String,
}

/// Barcode lookup tool implementation.
#[derive(Debug, Clone)]
pub struct LookupProductTool;

impl LookupProductTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "lookup_product";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Lookup the product for an EAN, GTIN, ISBN or UPC barcode.";

    /// Execute the tool logic.
    ///
    /// Remote failures are returned as errors; "no such product" is a normal
    /// answer.
    #[instrument(skip_all, fields(barcode = %params.barcode))]
    pub async fn execute(
        params: &LookupProductParams,
        config: &Config,
        api: &dyn EanSearchApi,
    ) -> Result<String, EanSearchError> {
        if let Some(message) = check_credentials(config) {
            return Ok(message);
        }

        let barcode = normalize_barcode(&params.barcode);
        let kind = LookupKind::classify(&barcode);
        info!(normalized = %barcode, ?kind, "Looking up product");

        let result = match kind {
            LookupKind::Isbn => api.isbn_lookup(&barcode).await,
            LookupKind::GenericBarcode => api.barcode_lookup(&barcode).await,
        }
        .inspect_err(|e| error!("Product lookup failed: {}", e))?;

        Ok(Self::format(&kind.display_barcode(&barcode), &result))
    }

    /// Render a lookup result for the given display barcode.
    pub fn format(display_barcode: &str, result: &LookupResult) -> String {
        match result {
            LookupResult::SingleDescription(data) if !data.is_empty() => {
                format!("{display_barcode} is product {data}")
            }
            // Record lists only answer searches.
            _ => NO_PRODUCT_FOUND.to_string(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<LookupProductParams>(),
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
                let params: LookupProductParams =
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::ean::api::ProductRecord;
    use crate::domains::tools::definitions::ean::common::MISSING_TOKEN_MESSAGE;
    use crate::domains::tools::definitions::ean::mock::{MockApi, Operation};
    use tokio_test::{assert_err, assert_ok};

    fn params(barcode: &str) -> LookupProductParams {
        LookupProductParams {
            barcode: barcode.to_string(),
        }
    }

    fn config() -> Config {
        Config::with_api_token("test-token")
    }

    #[test]
    fn test_params_deserialization() {
        let json = r#"{"barcode": "4006381333931"}"#;
        let params: LookupProductParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.barcode, "4006381333931");
    }

    #[test]
    fn test_params_missing_barcode() {
        let result = serde_json::from_str::<LookupProductParams>("{}");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_generic_barcode_lookup() {
        let api = MockApi::returning(LookupResult::description("Widget X"));
        let text = LookupProductTool::execute(&params("4006381333931"), &config(), &api)
            .await
            .unwrap();

        assert_eq!(text, "4006381333931 is product Widget X");
        assert_eq!(
            api.calls(),
            vec![(Operation::BarcodeLookup, "4006381333931".to_string())]
        );
    }

    #[tokio::test]
    async fn test_isbn_lookup_gets_prefix() {
        let api = MockApi::returning(LookupResult::description("Foo"));
        let text = LookupProductTool::execute(&params("0136091814"), &config(), &api)
            .await
            .unwrap();

        assert_eq!(text, "ISBN 0136091814 is product Foo");
        assert_eq!(
            api.calls(),
            vec![(Operation::IsbnLookup, "0136091814".to_string())]
        );
    }

    #[tokio::test]
    async fn test_separators_are_stripped_before_dispatch() {
        let api = MockApi::returning(LookupResult::description("Some Book"));
        let text = LookupProductTool::execute(&params("0-8044-2957-X"), &config(), &api)
            .await
            .unwrap();

        assert_eq!(text, "ISBN 080442957X is product Some Book");
        assert_eq!(
            api.calls(),
            vec![(Operation::IsbnLookup, "080442957X".to_string())]
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        for input in ["4006381333931", "0136091814", "", "no digits"] {
            let api = MockApi::returning(LookupResult::NotFound);
            let text = LookupProductTool::execute(&params(input), &config(), &api)
                .await
                .unwrap();
            assert_eq!(text, "No product found.");
            assert_eq!(api.call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_remote_call() {
        let api = MockApi::returning(LookupResult::description("Widget X"));
        let text = LookupProductTool::execute(&params("4006381333931"), &Config::default(), &api)
            .await
            .unwrap();

        assert_eq!(text, MISSING_TOKEN_MESSAGE);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let api = MockApi::failing();
        let result = LookupProductTool::execute(&params("4006381333931"), &config(), &api).await;

        let err = assert_err!(result);
        assert!(matches!(err, EanSearchError::Status(_)));
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_fallback_between_operations() {
        let api = MockApi::returning(LookupResult::NotFound);
        assert_ok!(LookupProductTool::execute(&params("0136091814"), &config(), &api).await);
        assert_eq!(api.calls().len(), 1);
        assert_eq!(api.calls()[0].0, Operation::IsbnLookup);
    }

    #[test]
    fn test_format_record_list_is_not_a_lookup_answer() {
        let result = LookupResult::records(vec![ProductRecord::new(
            "4006381333931",
            "Stabilo Boss",
            "Office",
        )]);
        assert_eq!(
            LookupProductTool::format("4006381333931", &result),
            "No product found."
        );
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = LookupProductTool::to_tool();
        assert_eq!(tool.name, "lookup_product");
        assert!(tool.input_schema.contains_key("properties"));
    }
}
