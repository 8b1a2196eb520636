//! # shop-api
//!
//! HTTP layer for the storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Catalog, cart, checkout and order handlers
//! - Invoice PDFs streamed to the client and cached on disk
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/` | Shop landing page |
//! | GET | `/products` | Product listing |
//! | GET | `/products/{id}` | Product detail |
//! | GET | `/cart` | Cart contents |
//! | POST | `/cart` | Add to cart |
//! | POST | `/cart-delete-item` | Remove from cart |
//! | GET | `/checkout` | Start checkout |
//! | GET | `/checkout/success` | Place order after payment |
//! | GET | `/checkout/cancel` | Back to checkout |
//! | POST | `/create-order` | Place order |
//! | GET | `/orders` | Order history |
//! | GET | `/orders/{id}` | Invoice PDF |

pub mod auth;
pub mod error;
pub mod handlers;
pub mod invoice;
pub mod routes;
pub mod state;
pub mod views;

pub use auth::{CurrentUser, USER_ID_HEADER};
pub use error::{ApiError, ApiResult};
pub use invoice::InvoiceWriter;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
