use crate::error::{PosError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ScanRow {
    product_code: String,
}

/// Reads scanned product codes, one per row under a `product_code` header.
///
/// Codes are returned as written; validation happens at lookup time so a
/// blank row is reported like a blank entry at the register.
pub struct ScanReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScanReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn codes(self) -> impl Iterator<Item = Result<String>> {
        self.reader
            .into_deserialize::<ScanRow>()
            .map(|result| result.map(|row| row.product_code).map_err(PosError::from))
    }
}
