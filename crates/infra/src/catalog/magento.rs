//! Magento 2 catalog client
//!
//! Reads and writes the stock sub-resource of a product through the Magento
//! REST API, authenticated with an integration access token.
//!
//! # Endpoints
//!
//! - `GET  {base}/rest/V1/stockItems/{sku}`
//! - `PUT  {base}/rest/V1/products/{sku}/stockItems/{item_id}`
//! - `GET  {base}/rest/V1/store/storeConfigs` (connection test)
//!
//! SKUs are percent-encoded in full, so `a/b` travels as `a%2Fb`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use stocksync_core::CatalogClient;
use stocksync_domain::{Result, SyncConfig, SyncError, TransportKind};
use tracing::{debug, info, instrument};
use url::Url;

use crate::errors::{status_error, InfraError};
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("stocksync/", env!("CARGO_PKG_VERSION"));

/// Stock item as returned by `GET /stockItems/{sku}`.
#[derive(Debug, Clone, Deserialize)]
struct StockItem {
    #[serde(default)]
    item_id: Option<u64>,
    #[serde(default)]
    qty: Option<f64>,
}

#[derive(Debug, Serialize)]
struct StockItemUpdate {
    #[serde(rename = "stockItem")]
    stock_item: StockItemFields,
}

#[derive(Debug, Serialize)]
struct StockItemFields {
    qty: f64,
    is_in_stock: bool,
}

impl StockItemUpdate {
    fn new(quantity: f64) -> Self {
        Self { stock_item: StockItemFields { qty: quantity, is_in_stock: quantity > 0.0 } }
    }
}

/// Magento REST catalog client
pub struct MagentoCatalogClient {
    http: HttpClient,
    api_base: String,
    access_token: String,
}

impl MagentoCatalogClient {
    /// Create a client for `base_url` (e.g. `https://shop.example.com`).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is not absolute http(s) or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(base).map_err(|err| {
            SyncError::configuration(format!("invalid Magento URL '{base}': {err}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SyncError::configuration(format!(
                "Magento URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let http =
            HttpClient::builder().timeout(timeout).user_agent(USER_AGENT).json_headers().build()?;
        let api_base = format!("{base}/rest/V1");
        debug!(%api_base, timeout_ms = http.timeout().as_millis() as u64, "Created Magento client");

        Ok(Self { http, api_base, access_token: access_token.trim().to_string() })
    }

    /// Create a client from a configuration snapshot.
    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        config.ensure_configured()?;
        Self::new(&config.base_url, &config.access_token, config.timeout())
    }

    fn stock_item_url(&self, sku: &str) -> String {
        format!("{}/stockItems/{}", self.api_base, urlencoding::encode(sku))
    }

    fn product_stock_item_url(&self, sku: &str, item_id: u64) -> String {
        format!("{}/products/{}/stockItems/{item_id}", self.api_base, urlencoding::encode(sku))
    }

    fn store_configs_url(&self) -> String {
        format!("{}/store/storeConfigs", self.api_base)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.access_token)
    }

    /// Send and translate the status: 404 becomes "SKU not in catalog",
    /// any other non-2xx becomes a transport error.
    async fn send_for_sku(&self, builder: RequestBuilder, sku: &str) -> Result<Response> {
        let response = self.http.send(builder).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SyncError::SkuNotFoundInCatalog(sku.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(response)
    }

    async fn fetch_stock_item(&self, sku: &str) -> Result<StockItem> {
        let url = self.stock_item_url(sku);
        let response = self.send_for_sku(self.request(Method::GET, &url), sku).await?;

        response.json::<StockItem>().await.map_err(|err| {
            let mapped: SyncError = InfraError::from(err).into();
            match mapped {
                SyncError::Transport { kind: TransportKind::Timeout, .. } => mapped,
                _ => SyncError::transport(
                    TransportKind::Decode,
                    format!("unreadable stock item for SKU '{sku}'"),
                ),
            }
        })
    }
}

#[async_trait]
impl CatalogClient for MagentoCatalogClient {
    #[instrument(skip(self))]
    async fn get_quantity(&self, sku: &str) -> Result<f64> {
        let item = self.fetch_stock_item(sku).await?;
        let quantity = item.qty.unwrap_or(0.0);
        debug!(sku, quantity, item_id = ?item.item_id, "Fetched Magento stock item");
        Ok(quantity)
    }

    #[instrument(skip(self))]
    async fn set_quantity(&self, sku: &str, quantity: f64) -> Result<()> {
        let item = self.fetch_stock_item(sku).await?;
        let item_id = item.item_id.ok_or_else(|| {
            SyncError::transport(
                TransportKind::Decode,
                format!("stock item for SKU '{sku}' has no item_id"),
            )
        })?;

        let url = self.product_stock_item_url(sku, item_id);
        let builder = self.request(Method::PUT, &url).json(&StockItemUpdate::new(quantity));
        self.send_for_sku(builder, sku).await?;

        debug!(sku, quantity, item_id, "Updated Magento stock item");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn test_connection(&self) -> Result<()> {
        let url = self.store_configs_url();
        let response = self.http.send(self.request(Method::GET, &url)).await?;
        let status = response.status();

        if status.is_success() {
            info!(url = %url, "Magento connection OK");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, &body))
        }
    }
}
