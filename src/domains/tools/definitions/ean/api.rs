//! ean-search.org API client.
//!
//! The tools only ever talk to the [`EanSearchApi`] trait; [`EanSearchClient`]
//! is the production implementation backed by `reqwest`. Every call is a
//! single `GET` against the configured endpoint with no retries.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::ApiConfig;

// ============================================================================
// Result Types
// ============================================================================

/// A product returned by a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductRecord {
    pub ean: String,
    pub name: String,
    #[serde(rename = "categoryName", default)]
    pub category_name: Option<String>,
}

impl ProductRecord {
    pub fn new(
        ean: impl Into<String>,
        name: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            ean: ean.into(),
            name: name.into(),
            category_name: Some(category_name.into()),
        }
    }
}

/// What a remote operation came back with.
///
/// An empty description or an empty record list is never represented; the
/// constructors fold both into [`LookupResult::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    NotFound,
    SingleDescription(String),
    RecordList(Vec<ProductRecord>),
}

impl LookupResult {
    /// Wrap a product description, treating an empty string as absent.
    pub fn description(data: impl Into<String>) -> Self {
        let data = data.into();
        if data.is_empty() {
            Self::NotFound
        } else {
            Self::SingleDescription(data)
        }
    }

    /// Wrap search results, treating an empty list as absent.
    pub fn records(records: Vec<ProductRecord>) -> Self {
        if records.is_empty() {
            Self::NotFound
        } else {
            Self::RecordList(records)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<Option<String>> for LookupResult {
    fn from(data: Option<String>) -> Self {
        data.map_or(Self::NotFound, Self::description)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failures talking to ean-search.org.
///
/// None of these are "product not found"; that outcome is a
/// [`LookupResult::NotFound`] value, not an error.
#[derive(Debug, thiserror::Error)]
pub enum EanSearchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to ean-search.org failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("ean-search.org responded with HTTP {0}")]
    Status(StatusCode),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("ean-search.org reported an error: {0}")]
    Api(String),
}

// ============================================================================
// Remote Operations
// ============================================================================

/// The three remote operations the tools depend on.
#[async_trait]
pub trait EanSearchApi: Send + Sync {
    /// Look up a 10-character ISBN.
    async fn isbn_lookup(&self, isbn: &str) -> Result<LookupResult, EanSearchError>;

    /// Look up an EAN, GTIN or UPC barcode.
    async fn barcode_lookup(&self, ean: &str) -> Result<LookupResult, EanSearchError>;

    /// Search products whose names match all keywords (first page only).
    async fn product_search(&self, keywords: &str) -> Result<LookupResult, EanSearchError>;
}

// ============================================================================
// API Response Structures
// ============================================================================

/// One element of the array returned by `barcode-lookup`.
#[derive(Debug, Deserialize)]
struct LookupEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Body of a `product-search` answer.
///
/// A page must carry `productlist`; an object without it is malformed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Errors(Vec<LookupEntry>),
    Page { productlist: Vec<ProductRecord> },
}

impl LookupEntry {
    fn first_result(entries: Vec<LookupEntry>) -> LookupResult {
        match entries.into_iter().next() {
            Some(LookupEntry {
                error: Some(message),
                ..
            }) => {
                debug!("Lookup answered with error entry: {}", message);
                LookupResult::NotFound
            }
            Some(entry) => entry.name.into(),
            None => LookupResult::NotFound,
        }
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// `reqwest`-backed client for the ean-search.org JSON API.
#[derive(Clone)]
pub struct EanSearchClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    language: String,
}

impl std::fmt::Debug for EanSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EanSearchClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("language", &self.language)
            .finish()
    }
}

impl EanSearchClient {
    /// Build a client for the given endpoint settings and token.
    pub fn new(api: &ApiConfig, token: impl Into<String>) -> Result<Self, EanSearchError> {
        Self::with_builder(api, token, reqwest::Client::builder())
    }

    fn with_builder(
        api: &ApiConfig,
        token: impl Into<String>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, EanSearchError> {
        let http = builder
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(EanSearchError::Client)?;

        Ok(Self {
            http,
            base_url: api.base_url.clone(),
            token: token.into(),
            language: api.language.to_string(),
        })
    }

    /// Send one operation and decode the JSON body.
    ///
    /// The request URL carries the token, so it is never logged.
    async fn request<T: DeserializeOwned>(
        &self,
        op: &str,
        params: &[(&str, &str)],
    ) -> Result<T, EanSearchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("token", self.token.as_str()),
                ("format", "json"),
                ("op", op),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(EanSearchError::Status(status));
        }

        let body = response.bytes().await.map_err(without_url)?;
        debug!(op, bytes = body.len(), "API response received");

        serde_json::from_slice(&body)
            .map_err(|e| EanSearchError::InvalidResponse(format!("JSON parse error: {e}")))
    }
}

/// Strip the request URL (and with it the token) from a reqwest error.
fn without_url(err: reqwest::Error) -> EanSearchError {
    EanSearchError::Http(err.without_url())
}

#[async_trait]
impl EanSearchApi for EanSearchClient {
    #[instrument(skip(self))]
    async fn isbn_lookup(&self, isbn: &str) -> Result<LookupResult, EanSearchError> {
        let entries: Vec<LookupEntry> = self
            .request("barcode-lookup", &[("isbn", isbn)])
            .await?;
        Ok(LookupEntry::first_result(entries))
    }

    #[instrument(skip(self))]
    async fn barcode_lookup(&self, ean: &str) -> Result<LookupResult, EanSearchError> {
        let entries: Vec<LookupEntry> = self.request("barcode-lookup", &[("ean", ean)]).await?;
        Ok(LookupEntry::first_result(entries))
    }

    #[instrument(skip(self))]
    async fn product_search(&self, keywords: &str) -> Result<LookupResult, EanSearchError> {
        let response: SearchResponse = self
            .request("product-search", &[("name", keywords), ("page", "0")])
            .await?;

        match response {
            SearchResponse::Page { productlist } => {
                debug!(count = productlist.len(), "Product search returned");
                Ok(LookupResult::records(productlist))
            }
            SearchResponse::Errors(entries) => match entries.into_iter().find_map(|e| e.error) {
                Some(message) => Err(EanSearchError::Api(message)),
                None => Ok(LookupResult::NotFound),
            },
        }
    }
}
