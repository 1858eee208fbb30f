//! Common utilities shared across the ean-search tools.
//!
//! This module provides the credential guard, barcode normalization,
//! and response helpers used by both tools.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use crate::core::config::Config;

/// Returned by every tool while no API token is configured.
///
/// Worded "You need to put your API token", without the stray "set" that
/// earlier releases of this message carried.
pub const MISSING_TOKEN_MESSAGE: &str = "You need to put your API token into the environment variable EAN_SEARCH_API_TOKEN. Get your API token from https://www.ean-search.org/ean-database-api.html";

pub const NO_PRODUCT_FOUND: &str = "No product found.";
pub const NO_PRODUCTS_FOUND: &str = "No products found.";

/// Category name the API uses when it has no category for a product.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Length of an ISBN-10, check character included.
const ISBN10_LENGTH: usize = 10;

/// Whether the configured token can be used for remote calls.
pub fn credentials_usable(config: &Config) -> bool {
    config.credentials.api_token().is_some()
}

/// Short-circuit a tool call when no token is configured.
///
/// Returns the message the tool must answer with, or `None` to proceed.
pub fn check_credentials(config: &Config) -> Option<String> {
    if credentials_usable(config) {
        None
    } else {
        warn!("Tool called without EAN_SEARCH_API_TOKEN configured");
        Some(MISSING_TOKEN_MESSAGE.to_string())
    }
}

/// Strip everything except ASCII digits and the ISBN check character.
///
/// Order and case of the kept characters are preserved. Length and checksum
/// are not validated.
pub fn normalize_barcode(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'X' | 'x'))
        .collect()
}

/// Which remote operation a normalized barcode is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Isbn,
    GenericBarcode,
}

impl LookupKind {
    /// Classify a normalized barcode by length alone.
    pub fn classify(normalized: &str) -> Self {
        if normalized.len() == ISBN10_LENGTH {
            Self::Isbn
        } else {
            Self::GenericBarcode
        }
    }

    /// How the barcode is shown in the tool's answer.
    pub fn display_barcode(self, normalized: &str) -> String {
        match self {
            Self::Isbn => format!("ISBN {normalized}"),
            Self::GenericBarcode => normalized.to_string(),
        }
    }
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}
