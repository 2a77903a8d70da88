use thiserror::Error;

/// Coarse classification of [`PosError`] for callers that only need to know
/// how to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The catalog has no product for the requested code.
    NotFound,
    /// The caller supplied empty or malformed input.
    Invalid,
    /// The catalog could not be reached or answered with garbage.
    Unavailable,
    /// A transaction record was rejected or could not be delivered.
    SinkFailure,
    /// Local file or CSV failure.
    Io,
}

#[derive(Error, Debug)]
pub enum PosError {
    #[error("Product {0} is not registered in the catalog")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("Malformed catalog response: {0}")]
    MalformedResponse(String),
    #[error("Transaction for product {product_code} rejected: {reason}")]
    SinkRejected {
        product_code: String,
        reason: String,
    },
    #[error("Transaction sink unavailable: {0}")]
    SinkUnavailable(String),
    #[error("Checkout failed at line {line}")]
    CheckoutFailed {
        line: usize,
        #[source]
        source: Box<PosError>,
    },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PosError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PosError::NotFound(_) => ErrorKind::NotFound,
            PosError::Invalid(_) => ErrorKind::Invalid,
            PosError::CatalogUnavailable(_) | PosError::MalformedResponse(_) => {
                ErrorKind::Unavailable
            }
            PosError::SinkRejected { .. }
            | PosError::SinkUnavailable(_)
            | PosError::CheckoutFailed { .. } => ErrorKind::SinkFailure,
            PosError::CsvError(_) | PosError::IoError(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, PosError>;
