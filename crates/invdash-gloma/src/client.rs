//! HTTP client for the Gloma ERP REST API.
//!
//! Wraps `reqwest` with Gloma-specific error handling, API key management,
//! and typed response deserialization. Every call hits the live upstream:
//! requests carry `Cache-Control: no-store` and nothing is cached or
//! retried on this side.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;

use crate::error::GlomaError;
use crate::types::{Datos, ProductRecord, StockRecord};

const DEFAULT_BASE_URL: &str = "https://apigloma.xentra.com.mx";

/// Client for the Gloma ERP REST API.
///
/// Manages the HTTP client, API key, and base URL. Use [`GlomaClient::new`]
/// for production or [`GlomaClient::with_base_url`] to point at a mock
/// server in tests. The API key is injected once at construction and sent
/// as the raw `Authorization` header value (the upstream does not use a
/// `Bearer` prefix).
pub struct GlomaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GlomaClient {
    /// Creates a new client pointed at the production Gloma API.
    ///
    /// # Errors
    ///
    /// Returns [`GlomaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GlomaError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GlomaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GlomaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("invdash/0.1 (inventory-dashboard)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches the flat product catalog from `GET /productos`.
    ///
    /// # Errors
    ///
    /// - [`GlomaError::UpstreamStatus`] on a non-2xx upstream status, with
    ///   the upstream body text attached verbatim.
    /// - [`GlomaError::Http`] on network failure.
    /// - [`GlomaError::Deserialize`] if the response does not match the
    ///   expected `{"datos": [...]}` shape.
    pub async fn fetch_products(&self) -> Result<Vec<ProductRecord>, GlomaError> {
        let payload: Datos<ProductRecord> = self.request_json("/productos").await?;
        Ok(payload.datos)
    }

    /// Fetches products with per-warehouse stock from
    /// `GET /productos_almacenes`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`GlomaClient::fetch_products`]. Note that a single
    /// record missing its `almacenes` array fails deserialization of the
    /// whole payload.
    pub async fn fetch_warehouse_stocks(&self) -> Result<Vec<StockRecord>, GlomaError> {
        let payload: Datos<StockRecord> = self.request_json("/productos_almacenes").await?;
        Ok(payload.datos)
    }

    /// Sends a GET request and parses the response body as JSON.
    ///
    /// Non-success statuses are read as text and surfaced as
    /// [`GlomaError::UpstreamStatus`] so the caller can pass the upstream's
    /// own status and message through unchanged.
    async fn request_json<T>(&self, path: &str) -> Result<T, GlomaError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "requesting gloma upstream");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!(status = status.as_u16(), "gloma upstream returned error");
            return Err(GlomaError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GlomaError::Deserialize {
            context: url,
            source: e,
        })
    }
}
