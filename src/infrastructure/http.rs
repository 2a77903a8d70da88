//! Adapters for the storefront backend's HTTP API.
//!
//! - `GET {base}/products/{code}` resolves a product.
//! - `POST {base}/transactions` records one purchase line.

use crate::domain::ports::{CatalogLookup, TransactionSink};
use crate::domain::product::{CatalogRecord, Product, ProductCode};
use crate::domain::transaction::PurchaseRecord;
use crate::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base address, e.g. `"http://localhost:8000"`.
    pub base_url: Url,
    /// Upper bound for one request, connect to last body byte.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PosError::Invalid(format!("API base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PosError::Invalid(format!(
                "API base URL {base_url} cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends `segments` to the base path, percent-encoding each one so a
    /// code like `a/b` stays a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always editable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| PosError::Invalid(format!("HTTP client: {e}")))
    }
}

/// Catalog lookups over HTTP.
///
/// A 404 or a record without a product name both mean "not registered";
/// every other failure is reported as unavailable or malformed.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    config: ApiConfig,
    http: Client,
}

impl HttpCatalog {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = config.client()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalog {
    async fn lookup(&self, code: &ProductCode) -> Result<Product> {
        let url = self.config.endpoint(&["products", code.as_str()]);
        debug!(%url, "catalog lookup");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PosError::CatalogUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PosError::NotFound(code.to_string()));
        }
        if !status.is_success() {
            return Err(PosError::CatalogUnavailable(format!(
                "lookup for {code} failed with status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PosError::CatalogUnavailable(e.to_string()))?;
        let record: Option<CatalogRecord> = serde_json::from_slice(&body)
            .map_err(|e| PosError::MalformedResponse(e.to_string()))?;

        match record {
            Some(record) => record.into_product(code),
            None => Err(PosError::NotFound(code.to_string())),
        }
    }
}

/// Posts purchase records to the backend, one request per record.
///
/// A backend that does not answer within the configured timeout counts as
/// unavailable.
#[derive(Debug, Clone)]
pub struct HttpTransactionSink {
    config: ApiConfig,
    http: Client,
}

impl HttpTransactionSink {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = config.client()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl TransactionSink for HttpTransactionSink {
    async fn submit(&self, record: &PurchaseRecord) -> Result<()> {
        let url = self.config.endpoint(&["transactions"]);
        debug!(%url, code = %record.product_code, quantity = record.quantity, "posting transaction");

        let response = self
            .http
            .post(url)
            .json(record)
            .send()
            .await
            .map_err(|e| PosError::SinkUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PosError::SinkRejected {
                product_code: record.product_code.clone(),
                reason: format!("status {status}: {text}"),
            });
        }

        Ok(())
    }
}
