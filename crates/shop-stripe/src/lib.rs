//! # shop-stripe
//!
//! Stripe payment strategy for the storefront.
//!
//! `StripeCheckoutStrategy` opens Stripe Checkout Sessions with dynamic
//! line items built from the shopper's cart.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeCheckoutStrategy;
//! use shop_core::{CheckoutRequest, Currency, PaymentStrategy};
//!
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! let request = CheckoutRequest::from_cart_lines(&lines, Currency::USD);
//! let session = strategy.create_checkout(
//!     &request,
//!     "https://shop.example.com/checkout/success",
//!     "https://shop.example.com/checkout/cancel",
//! ).await?;
//!
//! // Hand session.session_id to the checkout view
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
