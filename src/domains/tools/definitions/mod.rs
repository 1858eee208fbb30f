//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod ean;

pub use ean::{
    EanSearchApi, EanSearchClient, EanSearchError, FindProductsParams, FindProductsTool,
    LookupProductParams, LookupProductTool, LookupResult, ProductRecord,
};
