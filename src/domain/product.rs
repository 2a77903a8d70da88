use super::money::Price;
use crate::error::{PosError, Result};
use serde::Deserialize;
use std::fmt;

/// A product code as typed or scanned at the register.
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn parse(input: &str) -> Result<Self> {
        let code = input.trim();
        if code.is_empty() {
            return Err(PosError::Invalid("Enter a product code".to_string()));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product resolved by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub product_code: String,
    pub product_name: String,
    pub product_price: Price,
}

impl Product {
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: u64) -> Self {
        Self {
            product_code: code.into(),
            product_name: name.into(),
            product_price: Price::new(price),
        }
    }
}

/// The raw payload returned by a catalog lookup.
///
/// The backend signals "not registered" through content rather than status:
/// a record with a missing or empty `product_name`.
#[derive(Debug, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_price: Option<u64>,
}

impl CatalogRecord {
    /// Interprets the payload for `requested`.
    ///
    /// A missing code in the payload falls back to the requested code.
    pub fn into_product(self, requested: &ProductCode) -> Result<Product> {
        let name = match self.product_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(PosError::NotFound(requested.to_string())),
        };
        let Some(price) = self.product_price else {
            return Err(PosError::MalformedResponse(format!(
                "product {requested} has a name but no price"
            )));
        };
        let code = self
            .product_code
            .filter(|code| !code.trim().is_empty())
            .unwrap_or_else(|| requested.to_string());

        Ok(Product::new(code, name, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    #[test]
    fn test_product_code_is_trimmed() {
        assert_eq!(code("  4901  ").as_str(), "4901");
    }

    #[test]
    fn test_blank_product_code_is_invalid() {
        assert!(matches!(ProductCode::parse(""), Err(PosError::Invalid(_))));
        assert!(matches!(
            ProductCode::parse(" \t "),
            Err(PosError::Invalid(_))
        ));
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{"product_code":"4901","product_name":"Green Tea","product_price":150}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        let product = record.into_product(&code("4901")).unwrap();

        assert_eq!(product, Product::new("4901", "Green Tea", 150));
    }

    #[test]
    fn test_empty_name_means_not_found() {
        let json = r#"{"product_code":"4901","product_name":"","product_price":0}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();

        assert!(matches!(
            record.into_product(&code("4901")),
            Err(PosError::NotFound(c)) if c == "4901"
        ));
    }

    #[test]
    fn test_blank_but_present_name_is_a_product() {
        let json = r#"{"product_code":"4901","product_name":" ","product_price":150}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();

        let product = record.into_product(&code("4901")).unwrap();
        assert_eq!(product.product_name, " ");
    }

    #[test]
    fn test_missing_name_means_not_found() {
        let record: CatalogRecord = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            record.into_product(&code("X")),
            Err(PosError::NotFound(_))
        ));
    }

    #[test]
    fn test_name_without_price_is_malformed() {
        let json = r#"{"product_code":"4901","product_name":"Green Tea"}"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();

        assert!(matches!(
            record.into_product(&code("4901")),
            Err(PosError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_negative_price_fails_to_decode() {
        let json = r#"{"product_code":"4901","product_name":"Green Tea","product_price":-1}"#;
        assert!(serde_json::from_str::<CatalogRecord>(json).is_err());
    }
}
