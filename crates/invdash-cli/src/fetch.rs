//! HTTP access to the invdash proxy endpoints.

use std::collections::BTreeMap;
use std::time::Duration;

use invdash_gloma::reshape::{ProductEntry, StockEntry};

/// Client for the dashboard's own proxy API.
pub struct DashboardApi {
    client: reqwest::Client,
    base_url: String,
}

impl DashboardApi {
    /// Builds a client for the proxy server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("invdash-cli/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches the reshaped product catalog mapping.
    ///
    /// # Errors
    ///
    /// Any fetch or parse failure is a single terminal error; there is no
    /// per-row recovery.
    pub async fn fetch_productos(&self) -> anyhow::Result<BTreeMap<String, ProductEntry>> {
        self.get_json("/api/productos").await
    }

    /// Fetches the reshaped stock/price mapping.
    ///
    /// # Errors
    ///
    /// Same failure mode as [`DashboardApi::fetch_productos`].
    pub async fn fetch_stocksprecios(&self) -> anyhow::Result<BTreeMap<String, StockEntry>> {
        self.get_json("/api/stocksprecios").await
    }

    async fn get_json<T>(&self, path: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            anyhow::bail!("Error al obtener los datos ({status}): {body}");
        }
        Ok(response.json::<T>().await?)
    }
}
