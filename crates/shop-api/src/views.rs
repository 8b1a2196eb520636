//! # Views
//!
//! Page models handed to the templating layer. Each page names its template,
//! title and nav path; the view-specific data is flattened alongside.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shop_core::{CartLine, Order, Pagination, Product};

/// A rendered page: template name plus plain data
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub view: &'static str,
    pub page_title: String,
    pub path: &'static str,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Page<T> {
    pub fn new(
        view: &'static str,
        page_title: impl Into<String>,
        path: &'static str,
        data: T,
    ) -> Self {
        Self {
            view,
            page_title: page_title.into(),
            path,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `shop/index` and `shop/product-list`
#[derive(Debug, Serialize)]
pub struct ProductListView {
    pub prods: Vec<Product>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// `shop/product-detail`. `product` is null when the id matched nothing.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: Option<Product>,
}

/// `shop/cart`
#[derive(Debug, Serialize)]
pub struct CartView {
    pub products: Vec<CartLine>,
}

/// `shop/checkout`
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub products: Vec<CartLine>,
    pub total_price: i64,
    pub session_id: String,
    pub checkout_url: String,
    /// Provider key for the client-side redirect into `session_id`
    pub publishable_key: Option<String>,
}

/// `shop/orders`
#[derive(Debug, Serialize)]
pub struct OrdersView {
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::PageRequest;

    #[test]
    fn test_page_flattens_data() {
        let page = Page::new(
            "shop/product-list",
            "All Products",
            "/products",
            ProductListView {
                prods: vec![Product::new("p1", "One", 10)],
                pagination: PageRequest::new(1, 2).paginate(5),
            },
        );

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["view"], "shop/product-list");
        assert_eq!(json["page_title"], "All Products");
        assert_eq!(json["prods"][0]["id"], "p1");
        assert_eq!(json["has_next_page"], true);
        assert_eq!(json["last_page"], 3);
    }

    #[test]
    fn test_missing_product_is_null() {
        let page = Page::new(
            "shop/product-detail",
            "Product not found",
            "/products",
            ProductDetailView { product: None },
        );

        let json = serde_json::to_value(&page).unwrap();
        assert!(json["product"].is_null());
    }
}
