use crate::domain::product::Product;
use crate::error::{PosError, Result};
use std::io::Read;

/// Reads catalog products from a CSV source.
///
/// Expects the header `product_code,product_name,product_price`. Whitespace
/// around fields is trimmed.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one product per row; a bad row fails alone without ending the stream.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PosError::from))
    }
}
