//! # Request Handlers
//!
//! Axum request handlers for the storefront: catalog pages, cart, checkout,
//! orders and invoices. Each handler is a straight sequence of awaited store
//! or payment calls; the first failure returns an `ApiError`.

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::views::{CartView, CheckoutView, OrdersView, Page, ProductDetailView, ProductListView};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use shop_core::{
    cart_total, CheckoutRequest, CheckoutUrls, Order, PageRequest, ShopError, ShopResult,
};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request Types
// =============================================================================

/// `?page=` on catalog listings
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

/// Cart form body
#[derive(Debug, Deserialize)]
pub struct CartForm {
    #[serde(alias = "productId")]
    pub product_id: String,
    /// Defaults to 1
    #[serde(default)]
    pub quantity: Option<u32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn product_page(state: &AppState, query: &PageQuery) -> ShopResult<ProductListView> {
    let request = PageRequest::parse(query.page.as_deref(), state.page_size());
    let total = state.catalog.count_products().await?;
    let prods = state
        .catalog
        .find_products(request.offset(), request.limit())
        .await?;

    Ok(ProductListView {
        prods,
        pagination: request.paginate(total),
    })
}

/// Shop landing page
#[instrument(skip(state))]
pub async fn get_index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<ProductListView>> {
    let view = product_page(&state, &query).await?;
    Ok(Page::new("shop/index", "Shop", "/", view))
}

/// Paged product listing
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<ProductListView>> {
    let view = product_page(&state, &query).await?;
    Ok(Page::new("shop/product-list", "All Products", "/products", view))
}

/// Product detail. An unknown id renders the page with no product.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Page<ProductDetailView>> {
    let product = state.catalog.find_product(&product_id).await?;

    let title = match &product {
        Some(product) => product.title.clone(),
        None => {
            warn!("Product not found: {}", product_id);
            "Product not found".to_string()
        }
    };

    Ok(Page::new(
        "shop/product-detail",
        title,
        "/products",
        ProductDetailView { product },
    ))
}

/// Cart with every line resolved to its product
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_cart(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Page<CartView>> {
    let products = user.cart.populate(state.catalog.as_ref()).await?;
    Ok(Page::new("shop/cart", "Your Cart", "/cart", CartView { products }))
}

/// Add a product to the cart, merging with an existing line
#[instrument(skip(state, user, form), fields(user_id = %user.id, product_id = %form.product_id))]
pub async fn post_cart(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
    Form(form): Form<CartForm>,
) -> ApiResult<Redirect> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(ShopError::InvalidRequest("quantity must be at least 1".to_string()).into());
    }

    let product = state
        .catalog
        .find_product(&form.product_id)
        .await?
        .ok_or_else(|| ShopError::ProductNotFound {
            product_id: form.product_id.clone(),
        })?;

    user.cart.add_product(&product.id, quantity);
    state.users.save_cart(&user.id, &user.cart).await?;

    info!(
        "Added to cart: product={}, quantity now {}",
        product.id,
        user.cart.quantity_of(&product.id)
    );

    Ok(Redirect::to("/cart"))
}

/// Remove a product's line from the cart; absent products are ignored
#[instrument(skip(state, user, form), fields(user_id = %user.id, product_id = %form.product_id))]
pub async fn post_cart_delete_product(
    State(state): State<AppState>,
    CurrentUser(mut user): CurrentUser,
    Form(form): Form<CartForm>,
) -> ApiResult<Redirect> {
    if user.cart.remove_product(&form.product_id) {
        state.users.save_cart(&user.id, &user.cart).await?;
        info!("Removed from cart: product={}", form.product_id);
    }

    Ok(Redirect::to("/cart"))
}

/// Open a payment session for the cart and render the checkout page
#[instrument(skip(state, user, headers), fields(user_id = %user.id))]
pub async fn get_checkout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> ApiResult<Page<CheckoutView>> {
    let products = user.cart.populate(state.catalog.as_ref()).await?;
    let total_price = cart_total(&products);

    let urls = CheckoutUrls::new(request_base_url(&headers, &state.config.base_url));
    let request = CheckoutRequest::from_cart_lines(&products, state.config.currency)
        .with_email(&user.email)
        .with_metadata("user_id", &user.id);

    info!(
        "Creating checkout: {} lines, total={} {}, success_url={}",
        products.len(),
        total_price,
        state.config.currency,
        urls.success_url()
    );

    let session = state
        .payments
        .create_checkout(&request, &urls.success_url(), &urls.cancel_url())
        .await
        .map_err(|e| {
            error!("Failed to create checkout via {}: {}", state.payments.provider_name(), e);
            e
        })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Page::new(
        "shop/checkout",
        "Checkout",
        "/checkout",
        CheckoutView {
            products,
            total_price,
            session_id: session.session_id,
            checkout_url: session.checkout_url,
            publishable_key: state.payments.publishable_key().map(str::to_string),
        },
    ))
}

/// Place an order from the cart, then clear the cart.
///
/// The two writes are not atomic: when clearing the cart fails the order
/// stays saved and the cart keeps its lines, so a retry places a second order.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn post_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Redirect> {
    let lines = user.cart.populate(state.catalog.as_ref()).await?;
    if lines.is_empty() {
        return Err(ShopError::InvalidRequest("cart is empty".to_string()).into());
    }

    let order = Order::place(&user, &lines);
    state.orders.insert_order(&order).await?;
    info!(
        "Order placed: id={}, items={}, total={}",
        order.id,
        order.item_count(),
        order.total()
    );

    state.users.clear_cart(&user.id).await.map_err(|e| {
        error!("Order {} saved but cart was not cleared: {}", order.id, e);
        e
    })?;

    Ok(Redirect::to("/orders"))
}

/// The current user's orders, oldest first
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Page<OrdersView>> {
    let orders = state.orders.find_orders_for_user(&user.id).await?;
    Ok(Page::new("shop/orders", "Your Orders", "/orders", OrdersView { orders }))
}

/// Stream an order's invoice PDF, caching it to disk in the same pass
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_invoice(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
) -> ApiResult<Response> {
    let order = state
        .orders
        .find_order(&order_id)
        .await?
        .ok_or_else(|| ShopError::OrderNotFound {
            order_id: order_id.clone(),
        })?;

    if !order.is_owned_by(&user.id) {
        return Err(
            ShopError::Forbidden(format!("order {} belongs to another user", order.id)).into(),
        );
    }

    let body = state.invoices.generate(&order).await?;
    let disposition = format!("inline; filename=\"{}\"", order.invoice_name());

    info!("Serving invoice: order={}, bytes={}", order.id, body.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `<scheme>://<host>` of the current request, or `fallback` without a Host header
fn request_base_url(headers: &HeaderMap, fallback: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty());

    match host {
        Some(host) => {
            let scheme = headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .and_then(|p| p.split(',').next())
                .map(str::trim)
                .filter(|p| *p == "http" || *p == "https")
                .unwrap_or("http");
            format!("{}://{}", scheme, host)
        }
        None => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_base_url_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("shop.test:3000"));

        assert_eq!(request_base_url(&headers, "http://fallback"), "http://shop.test:3000");
    }

    #[test]
    fn test_base_url_honours_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("shop.test"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));

        assert_eq!(request_base_url(&headers, "http://fallback"), "https://shop.test");
    }

    #[test]
    fn test_base_url_fallback() {
        let headers = HeaderMap::new();
        assert_eq!(request_base_url(&headers, "http://fallback"), "http://fallback");
    }

    #[test]
    fn test_cart_form_accepts_camel_case() {
        let form: CartForm = serde_json::from_value(serde_json::json!({
            "productId": "p1"
        }))
        .unwrap();

        assert_eq!(form.product_id, "p1");
        assert!(form.quantity.is_none());
    }
}
