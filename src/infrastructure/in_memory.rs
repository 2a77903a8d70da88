use crate::domain::ports::{CatalogLookup, TransactionSink};
use crate::domain::product::{Product, ProductCode};
use crate::domain::transaction::PurchaseRecord;
use crate::error::{PosError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory product catalog.
///
/// Uses `Arc<RwLock<HashMap<String, Product>>>` so clones share the same
/// products. Backs offline mode and tests.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryCatalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.product_code.clone(), p))
            .collect();
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Inserts or replaces a product.
    pub async fn insert(&self, product: Product) {
        let mut products = self.products.write().await;
        products.insert(product.product_code.clone(), product);
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn lookup(&self, code: &ProductCode) -> Result<Product> {
        let products = self.products.read().await;
        products
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| PosError::NotFound(code.to_string()))
    }
}

/// A transaction sink that keeps accepted records in memory.
///
/// Can be told to reject specific product codes, or everything after a given
/// number of accepted records, to exercise checkout failures.
#[derive(Default, Clone)]
pub struct InMemoryTransactionSink {
    accepted: Arc<RwLock<Vec<PurchaseRecord>>>,
    rejected_codes: HashSet<String>,
    accept_limit: Option<usize>,
}

impl InMemoryTransactionSink {
    /// Creates a sink that accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every record for `code`.
    pub fn reject_code(mut self, code: impl Into<String>) -> Self {
        self.rejected_codes.insert(code.into());
        self
    }

    /// Accepts `limit` records, then rejects everything after.
    pub fn reject_after(mut self, limit: usize) -> Self {
        self.accept_limit = Some(limit);
        self
    }

    /// Records accepted so far, in arrival order.
    pub async fn records(&self) -> Vec<PurchaseRecord> {
        self.accepted.read().await.clone()
    }
}

#[async_trait]
impl TransactionSink for InMemoryTransactionSink {
    async fn submit(&self, record: &PurchaseRecord) -> Result<()> {
        let mut accepted = self.accepted.write().await;

        if self.rejected_codes.contains(&record.product_code) {
            return Err(PosError::SinkRejected {
                product_code: record.product_code.clone(),
                reason: "product rejected".to_string(),
            });
        }
        if self.accept_limit.is_some_and(|limit| accepted.len() >= limit) {
            return Err(PosError::SinkRejected {
                product_code: record.product_code.clone(),
                reason: "sink limit reached".to_string(),
            });
        }

        accepted.push(record.clone());
        Ok(())
    }
}
