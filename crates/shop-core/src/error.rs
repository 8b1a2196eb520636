//! # Storefront Error Types
//!
//! Typed error handling for the storefront.
//! All store, payment and invoice operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for all storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No authenticated user on the request
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// Authenticated user does not own the requested resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Order not found in the order store
    #[error("No order found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Persistence store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invoice rendering or persistence failed
    #[error("Invoice error: {0}")]
    Invoice(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::Unauthenticated(_) => 401,
            ShopError::Forbidden(_) => 403,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::OrderNotFound { .. } => 404,
            ShopError::Store(_) => 500,
            ShopError::ProviderError { .. } => 502,
            ShopError::NetworkError(_) => 503,
            ShopError::Invoice(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }

    /// True for failures the client caused (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::Invoice(err.to_string())
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
