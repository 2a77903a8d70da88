use crate::domain::cart::{CheckoutTotals, LineItem};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ReceiptLine<'a> {
    product_code: &'a str,
    product_name: &'a str,
    unit_price: u64,
    quantity: u32,
    line_total: u64,
}

/// Writes a checkout receipt as CSV: the purchased lines, then a
/// `subtotal,tax,total` section.
pub struct ReceiptWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReceiptWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_receipt(&mut self, items: &[LineItem], totals: &CheckoutTotals) -> Result<()> {
        self.writer.write_record([
            "product_code",
            "product_name",
            "unit_price",
            "quantity",
            "line_total",
        ])?;
        for item in items {
            self.writer.serialize(ReceiptLine {
                product_code: &item.code,
                product_name: &item.name,
                unit_price: item.unit_price.value(),
                quantity: item.quantity,
                line_total: item.line_total().value(),
            })?;
        }

        self.writer.write_record(["subtotal", "tax", "total"])?;
        self.writer.serialize((
            totals.subtotal.value(),
            totals.tax.value(),
            totals.total.value(),
        ))?;
        self.writer.flush()?;
        Ok(())
    }
}
