//! # Routes
//!
//! Axum router configuration for the storefront.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  / - Shop landing page (`?page=`)
///   - GET  /products - Product listing (`?page=`)
///   - GET  /products/{product_id} - Product detail
///
/// - Cart (requires `x-user-id`):
///   - GET  /cart - Cart contents
///   - POST /cart - Add a product
///   - POST /cart-delete-item - Remove a product
///
/// - Checkout & orders (requires `x-user-id`):
///   - GET  /checkout - Open a payment session
///   - GET  /checkout/success - Payment provider return; places the order
///   - GET  /checkout/cancel - Payment provider return; back to checkout
///   - POST /create-order - Place the order directly
///   - GET  /orders - Order history
///   - GET  /orders/{order_id} - Invoice PDF
pub fn create_router(state: AppState) -> Router {
    let catalog_routes: Router<AppState> = Router::new()
        .route("/", get(handlers::get_index))
        .route("/products", get(handlers::get_products))
        .route("/products/{product_id}", get(handlers::get_product));

    let cart_routes: Router<AppState> = Router::new()
        .route("/cart", get(handlers::get_cart).post(handlers::post_cart))
        .route("/cart-delete-item", post(handlers::post_cart_delete_product));

    let checkout_routes: Router<AppState> = Router::new()
        .route("/checkout", get(handlers::get_checkout))
        .route("/checkout/success", get(handlers::post_order))
        .route("/checkout/cancel", get(handlers::get_checkout));

    let order_routes: Router<AppState> = Router::new()
        .route("/create-order", post(handlers::post_order))
        .route("/orders", get(handlers::get_orders))
        .route("/orders/{order_id}", get(handlers::get_invoice));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(catalog_routes)
        .merge(cart_routes)
        .merge(checkout_routes)
        .merge(order_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
