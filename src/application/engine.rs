use crate::domain::cart::{Cart, CheckoutTotals, LineItem};
use crate::domain::money::Price;
use crate::domain::ports::TransactionSink;
use crate::domain::product::Product;
use crate::domain::transaction::PurchaseRecord;
use crate::error::{PosError, Result};
use tracing::{debug, info, warn};

/// Owns the cart of the current session and drains it into a transaction
/// sink at checkout.
///
/// Every operation runs on the caller's task. `checkout` submits records one
/// at a time and in cart order, so the sink sees them in the order they were
/// added.
#[derive(Debug, Default)]
pub struct CartEngine {
    cart: Cart,
}

impl CartEngine {
    /// Creates an engine with an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product. Repeat adds of the same code increase the
    /// quantity and keep the name and price recorded by the first add.
    pub fn add(&mut self, code: &str, name: &str, price: Price) -> &LineItem {
        let item = self.cart.add(code, name, price);
        debug!(code, quantity = item.quantity, "added to cart");
        item
    }

    pub fn add_product(&mut self, product: &Product) -> &LineItem {
        let item = self.cart.add_product(product);
        debug!(code = %item.code, quantity = item.quantity, "added to cart");
        item
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    pub fn tax(subtotal: Price) -> Price {
        Cart::tax(subtotal)
    }

    pub fn total(&self) -> Price {
        self.cart.total()
    }

    pub fn totals(&self) -> CheckoutTotals {
        self.cart.totals()
    }

    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Submits one record per line item and clears the cart once all of them
    /// were accepted.
    ///
    /// Returns the totals in effect before clearing. Stops at the first
    /// failed record and leaves the cart untouched; records the sink already
    /// accepted are not compensated.
    pub async fn checkout(&mut self, sink: &dyn TransactionSink) -> Result<CheckoutTotals> {
        if self.cart.is_empty() {
            return Err(PosError::Invalid("Cart is empty".to_string()));
        }

        let totals = self.cart.totals();
        info!(
            lines = self.cart.len(),
            total = totals.total.value(),
            "starting checkout"
        );

        for (index, item) in self.cart.items().iter().enumerate() {
            let record = PurchaseRecord::for_line(item);
            if let Err(e) = sink.submit(&record).await {
                warn!(line = index + 1, code = %item.code, error = %e, "checkout aborted");
                return Err(PosError::CheckoutFailed {
                    line: index + 1,
                    source: Box::new(e),
                });
            }
            debug!(line = index + 1, code = %item.code, "transaction accepted");
        }

        self.cart.clear();
        info!(total = totals.total.value(), "checkout complete");
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryTransactionSink;

    fn sample_engine() -> CartEngine {
        let mut engine = CartEngine::new();
        engine.add("A", "Apple", Price::new(1000));
        engine.add("B", "Bread", Price::new(500));
        engine.add("A", "Apple", Price::new(1000));
        engine
    }

    #[tokio::test]
    async fn test_checkout_clears_and_returns_totals() {
        let mut engine = sample_engine();
        let sink = InMemoryTransactionSink::new();

        let totals = engine.checkout(&sink).await.unwrap();

        assert_eq!(totals.subtotal, Price::new(2500));
        assert_eq!(totals.tax, Price::new(250));
        assert_eq!(totals.total, Price::new(2750));
        assert!(engine.is_empty());
        assert_eq!(engine.total(), Price::ZERO);
    }

    #[tokio::test]
    async fn test_checkout_records_in_cart_order() {
        let mut engine = sample_engine();
        let sink = InMemoryTransactionSink::new();

        engine.checkout(&sink).await.unwrap();

        let records = sink.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_code, "A");
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[1].product_code, "B");
        assert_eq!(records[1].quantity, 1);
    }

    #[tokio::test]
    async fn test_rejection_leaves_cart_intact() {
        let mut engine = sample_engine();
        let before = engine.items().to_vec();
        let sink = InMemoryTransactionSink::new().reject_after(1);

        let result = engine.checkout(&sink).await;

        assert!(matches!(
            result,
            Err(PosError::CheckoutFailed { line: 2, .. })
        ));
        assert_eq!(engine.items(), before.as_slice());
        // The first record stays applied at the sink.
        assert_eq!(sink.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_first_failure_stops_emission() {
        let mut engine = sample_engine();
        engine.add("C", "Cheese", Price::new(800));
        let sink = InMemoryTransactionSink::new().reject_code("B");

        assert!(engine.checkout(&sink).await.is_err());

        let codes: Vec<String> = sink
            .records()
            .await
            .into_iter()
            .map(|r| r.product_code)
            .collect();
        assert_eq!(codes, ["A"]);
        assert_eq!(engine.items().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_checkout_never_reaches_sink() {
        let mut engine = CartEngine::new();
        let sink = InMemoryTransactionSink::new();

        let result = engine.checkout(&sink).await;

        assert!(matches!(result, Err(PosError::Invalid(_))));
        assert!(sink.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        let mut engine = sample_engine();
        let failing = InMemoryTransactionSink::new().reject_after(0);
        assert!(engine.checkout(&failing).await.is_err());

        let healthy = InMemoryTransactionSink::new();
        let totals = engine.checkout(&healthy).await.unwrap();
        assert_eq!(totals.total, Price::new(2750));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_totals_are_idempotent() {
        let engine = sample_engine();
        assert_eq!(engine.subtotal(), engine.subtotal());
        assert_eq!(engine.total(), engine.total());
        assert_eq!(engine.total(), engine.subtotal() + CartEngine::tax(engine.subtotal()));
    }
}
