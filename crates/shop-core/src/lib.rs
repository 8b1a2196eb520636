//! # shop-core
//!
//! Core types and traits for the storefront.
//!
//! This crate provides:
//! - `Product`, `Cart`, `Order` and `User` domain types
//! - `PageRequest` / `Pagination` for catalog paging
//! - `CatalogStore`, `UserStore` and `OrderStore` traits plus `MemoryStore`
//! - `PaymentStrategy` trait for payment session providers
//! - `InvoiceDocument` for rendering order invoices as PDF
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{Cart, CheckoutRequest, Currency, Order};
//!
//! let lines = user.cart.populate(catalog.as_ref()).await?;
//! let request = CheckoutRequest::from_cart_lines(&lines, Currency::USD);
//! let session = strategy
//!     .create_checkout(&request, &urls.success_url(), &urls.cancel_url())
//!     .await?;
//!
//! let order = Order::place(&user, &lines);
//! orders.insert_order(&order).await?;
//! ```

pub mod cart;
pub mod error;
pub mod invoice;
pub mod memory;
pub mod order;
pub mod pagination;
pub mod product;
pub mod store;
pub mod strategy;
pub mod user;

// Re-exports for convenience
pub use cart::{cart_total, Cart, CartItem, CartLine};
pub use error::{ShopError, ShopResult};
pub use invoice::{InvoiceDocument, InvoiceLine};
pub use memory::{MemoryStore, StoreSeed};
pub use order::{invoice_name, Order, OrderLine, OrderUser};
pub use pagination::{PageRequest, Pagination, DEFAULT_PAGE_SIZE};
pub use product::{Currency, Product};
pub use store::{
    CatalogStore, OrderStore, SharedCatalogStore, SharedOrderStore, SharedUserStore, UserStore,
};
pub use strategy::{
    BoxedPaymentStrategy, CheckoutLineItem, CheckoutRequest, CheckoutSession, CheckoutUrls,
    PaymentStrategy,
};
pub use user::User;
