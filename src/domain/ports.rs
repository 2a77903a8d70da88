use super::product::{Product, ProductCode};
use super::transaction::PurchaseRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Read-only product-by-code resolution.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolves `code`, failing with `PosError::NotFound` when the catalog has
    /// no such product.
    async fn lookup(&self, code: &ProductCode) -> Result<Product>;
}

/// Accepts finalized purchase lines, one record per call.
#[async_trait]
pub trait TransactionSink: Send + Sync {
    async fn submit(&self, record: &PurchaseRecord) -> Result<()>;
}

pub type CatalogLookupBox = Box<dyn CatalogLookup>;
pub type TransactionSinkBox = Box<dyn TransactionSink>;
