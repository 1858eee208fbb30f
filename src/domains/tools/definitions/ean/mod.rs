//! ean-search.org tools module.
//!
//! This module provides the two product tools backed by the ean-search.org API:
//! - `lookup`: Resolve an EAN, GTIN, UPC or ISBN barcode to a product
//! - `search`: Find products by keywords
//!
//! `api` holds the remote client both tools share, `common` the credential
//! guard and barcode normalization.

pub mod api;
pub mod common;
pub mod lookup;
pub mod search;

#[cfg(test)]
pub(crate) mod mock;

pub use api::{EanSearchApi, EanSearchClient, EanSearchError, LookupResult, ProductRecord};
pub use lookup::{LookupProductParams, LookupProductTool};
pub use search::{FindProductsParams, FindProductsTool};
