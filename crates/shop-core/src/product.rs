//! # Product Types
//!
//! Catalog product and checkout currency types.
//! Products are seeded from `config/store.toml` and are read-only to the handlers.

use serde::{Deserialize, Serialize};

/// Supported checkout currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Returns the lowercase ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
            Currency::CHF => "chf",
            Currency::MXN => "mxn",
        }
    }

    /// Parse a currency code, case-insensitive
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "usd" => Some(Currency::USD),
            "eur" => Some(Currency::EUR),
            "gbp" => Some(Currency::GBP),
            "jpy" => Some(Currency::JPY),
            "cad" => Some(Currency::CAD),
            "aud" => Some(Currency::AUD),
            "chf" => Some(Currency::CHF),
            "mxn" => Some(Currency::MXN),
            _ => None,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Price in the smallest unit of the checkout currency
    pub price: i64,

    /// Optional image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            image_url: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse() {
        assert_eq!(Currency::parse("USD"), Some(Currency::USD));
        assert_eq!(Currency::parse(" eur "), Some(Currency::EUR));
        assert_eq!(Currency::parse("btc"), None);
        assert_eq!(Currency::JPY.to_string(), "JPY");
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("book-1", "A Book", 1299)
            .with_description("Paperback");

        assert_eq!(product.id, "book-1");
        assert_eq!(product.description, "Paperback");
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_product_from_toml_defaults() {
        let product: Product = toml::from_str(
            r#"
            id = "mug"
            title = "Mug"
            price = 850
            "#,
        )
        .unwrap();

        assert_eq!(product.description, "");
        assert!(product.image_url.is_none());
    }
}
