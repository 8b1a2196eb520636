//! # Payment Strategy Trait
//!
//! Core Strategy pattern trait for payment session providers.
//! The application constructs one implementation at startup and injects it
//! into the handler state as a `BoxedPaymentStrategy`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentStrategy (trait)                  │
//! │  ├── create_checkout()                                      │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │StripeCheckout     │
//!                  │   Strategy        │
//!                  └───────────────────┘
//! ```

use crate::cart::CartLine;
use crate::error::ShopResult;
use crate::product::Currency;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One line item passed to the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    pub description: String,
    /// Unit amount in the smallest currency unit
    pub unit_amount: i64,
    pub currency: Currency,
    pub quantity: u32,
}

/// Everything the provider needs to open a payment session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub line_items: Vec<CheckoutLineItem>,

    /// Customer email (optional, for prefill)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Custom metadata
    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub metadata: std::collections::HashMap<String, String>,
}

impl CheckoutRequest {
    /// One line item per resolved cart line, all in `currency`
    pub fn from_cart_lines(lines: &[CartLine], currency: Currency) -> Self {
        Self {
            line_items: lines
                .iter()
                .map(|line| CheckoutLineItem {
                    name: line.product.title.clone(),
                    description: line.product.description.clone(),
                    unit_amount: line.product.price,
                    currency,
                    quantity: line.quantity,
                })
                .collect(),
            customer_email: None,
            metadata: std::collections::HashMap::new(),
        }
    }

    /// Set customer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.line_items
            .iter()
            .map(|item| item.unit_amount * i64::from(item.quantity))
            .sum()
    }
}

/// A payment session opened by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// URL to redirect customer to for payment
    pub checkout_url: String,

    /// When the session expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(
        session_id: impl Into<String>,
        provider: impl Into<String>,
        checkout_url: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            provider: provider.into(),
            checkout_url: checkout_url.into(),
            expires_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Open a payment session for the request.
    ///
    /// # Arguments
    /// * `request` - Line items to charge
    /// * `success_url` - URL to redirect after successful payment
    /// * `cancel_url` - URL to redirect if customer cancels
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
        success_url: &str,
        cancel_url: &str,
    ) -> ShopResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;

    /// Public key the checkout page uses to redirect into the provider's
    /// hosted flow. `None` when the provider needs no client-side key.
    fn publishable_key(&self) -> Option<&str> {
        None
    }
}

/// Type alias for a boxed payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

/// Callback URLs handed to the payment provider
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the application (e.g., "https://shop.example.com")
    pub base_url: String,
    /// Success page path (e.g., "/checkout/success")
    pub success_path: String,
    /// Cancel page path (e.g., "/checkout/cancel")
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            success_path: "/checkout/success".to_string(),
            cancel_path: "/checkout/cancel".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

    #[test]
    fn test_checkout_urls() {
        let urls = CheckoutUrls::new("https://shop.example.com/");

        assert_eq!(urls.success_url(), "https://shop.example.com/checkout/success");
        assert_eq!(urls.cancel_url(), "https://shop.example.com/checkout/cancel");
    }

    #[test]
    fn test_request_from_cart_lines() {
        let lines = vec![
            CartLine {
                product: Product::new("p1", "Pen", 150).with_description("Blue ink"),
                quantity: 4,
            },
            CartLine {
                product: Product::new("p2", "Pad", 300),
                quantity: 1,
            },
        ];

        let request = CheckoutRequest::from_cart_lines(&lines, Currency::EUR);

        assert_eq!(request.line_items.len(), 2);
        assert_eq!(request.line_items[0].name, "Pen");
        assert_eq!(request.line_items[0].description, "Blue ink");
        assert_eq!(request.line_items[0].unit_amount, 150);
        assert_eq!(request.line_items[0].quantity, 4);
        assert_eq!(request.line_items[1].currency, Currency::EUR);
        assert_eq!(request.total(), 900);
    }
}
