//! # Store Traits
//!
//! Persistence seams used by the request handlers. The application injects
//! implementations as trait objects; `MemoryStore` implements all three.

use crate::cart::Cart;
use crate::error::ShopResult;
use crate::order::Order;
use crate::product::Product;
use crate::user::User;
use async_trait::async_trait;
use std::sync::Arc;

/// Paged, read-only product lookup
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Total number of products
    async fn count_products(&self) -> ShopResult<u64>;

    /// Products in catalog order, skipping `offset` and returning at most `limit`
    async fn find_products(&self, offset: u64, limit: u64) -> ShopResult<Vec<Product>>;

    /// Look up a single product
    async fn find_product(&self, product_id: &str) -> ShopResult<Option<Product>>;
}

/// User records and their embedded carts
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, user_id: &str) -> ShopResult<Option<User>>;

    /// Replace the user's cart. Concurrent writers are last-write-wins.
    async fn save_cart(&self, user_id: &str, cart: &Cart) -> ShopResult<()>;

    async fn clear_cart(&self, user_id: &str) -> ShopResult<()> {
        self.save_cart(user_id, &Cart::default()).await
    }
}

/// Append-only order records
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: &Order) -> ShopResult<()>;

    async fn find_order(&self, order_id: &str) -> ShopResult<Option<Order>>;

    /// All orders owned by a user, oldest first
    async fn find_orders_for_user(&self, user_id: &str) -> ShopResult<Vec<Order>>;
}

pub type SharedCatalogStore = Arc<dyn CatalogStore>;
pub type SharedUserStore = Arc<dyn UserStore>;
pub type SharedOrderStore = Arc<dyn OrderStore>;
