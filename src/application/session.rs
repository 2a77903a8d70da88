use super::engine::CartEngine;
use crate::domain::cart::{CheckoutTotals, LineItem};
use crate::domain::ports::{CatalogLookup, TransactionSink};
use crate::domain::product::{Product, ProductCode};
use crate::error::{PosError, Result};
use tracing::{info, warn};

/// Caller-owned state of one register session: the cart engine plus the
/// product most recently resolved by a search, waiting to be added.
#[derive(Debug, Default)]
pub struct RegisterSession {
    engine: CartEngine,
    pending: Option<Product>,
}

impl RegisterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `input` against the catalog and keeps the result pending.
    ///
    /// Any failure clears a previously pending product.
    pub async fn search(&mut self, catalog: &dyn CatalogLookup, input: &str) -> Result<&Product> {
        self.pending = None;
        let code = ProductCode::parse(input)?;

        match catalog.lookup(&code).await {
            Ok(product) => {
                info!(code = %code, name = %product.product_name, "product found");
                Ok(self.pending.insert(product))
            }
            Err(e) => {
                warn!(code = %code, error = %e, "lookup failed");
                Err(e)
            }
        }
    }

    /// Moves the pending product into the cart.
    pub fn add_pending(&mut self) -> Result<&LineItem> {
        let product = self
            .pending
            .take()
            .ok_or_else(|| PosError::Invalid("No product selected".to_string()))?;
        Ok(self.engine.add_product(&product))
    }

    /// Checks the cart out. On success the pending product is dropped as well.
    pub async fn purchase(&mut self, sink: &dyn TransactionSink) -> Result<CheckoutTotals> {
        let totals = self.engine.checkout(sink).await?;
        self.pending = None;
        Ok(totals)
    }

    pub fn pending(&self) -> Option<&Product> {
        self.pending.as_ref()
    }

    pub fn engine(&self) -> &CartEngine {
        &self.engine
    }
}
