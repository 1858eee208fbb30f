//! In-memory `EanSearchApi` for tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;

use super::api::{EanSearchApi, EanSearchError, LookupResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    IsbnLookup,
    BarcodeLookup,
    ProductSearch,
}

/// Answers every operation with the same canned result and records calls.
pub struct MockApi {
    result: Option<LookupResult>,
    calls: Mutex<Vec<(Operation, String)>>,
}

impl MockApi {
    pub fn returning(result: LookupResult) -> Self {
        Self {
            result: Some(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with an upstream HTTP 502.
    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Operation, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn answer(&self, op: Operation, input: &str) -> Result<LookupResult, EanSearchError> {
        self.calls.lock().unwrap().push((op, input.to_string()));
        self.result
            .clone()
            .ok_or(EanSearchError::Status(StatusCode::BAD_GATEWAY))
    }
}

#[async_trait]
impl EanSearchApi for MockApi {
    async fn isbn_lookup(&self, isbn: &str) -> Result<LookupResult, EanSearchError> {
        self.answer(Operation::IsbnLookup, isbn)
    }

    async fn barcode_lookup(&self, ean: &str) -> Result<LookupResult, EanSearchError> {
        self.answer(Operation::BarcodeLookup, ean)
    }

    async fn product_search(&self, keywords: &str) -> Result<LookupResult, EanSearchError> {
        self.answer(Operation::ProductSearch, keywords)
    }
}
