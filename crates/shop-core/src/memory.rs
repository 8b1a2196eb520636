//! # In-Memory Store
//!
//! `MemoryStore` backs all three store traits with `RwLock`-guarded
//! collections. It can be seeded from a TOML document:
//!
//! ```toml
//! [[products]]
//! id = "notebook"
//! title = "Notebook"
//! description = "A5, dotted"
//! price = 1200
//!
//! [[users]]
//! id = "u1"
//! email = "shopper@example.com"
//! ```

use crate::cart::Cart;
use crate::error::{ShopError, ShopResult};
use crate::order::Order;
use crate::product::Product;
use crate::store::{CatalogStore, OrderStore, UserStore};
use crate::user::User;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Seed document for `MemoryStore`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSeed {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl StoreSeed {
    /// Load seed data from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    users: RwLock<HashMap<String, User>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        Self {
            products: RwLock::new(seed.products),
            users: RwLock::new(seed.users.into_iter().map(|u| (u.id.clone(), u)).collect()),
            orders: RwLock::new(Vec::new()),
        }
    }

    /// Insert a product, or replace the one with the same id in place
    pub async fn upsert_product(&self, product: Product) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
    }

    pub async fn remove_product(&self, product_id: &str) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != product_id);
        products.len() != before
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn count_products(&self) -> ShopResult<u64> {
        Ok(self.products.read().await.len() as u64)
    }

    async fn find_products(&self, offset: u64, limit: u64) -> ShopResult<Vec<Product>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .products
            .read()
            .await
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_product(&self, product_id: &str) -> ShopResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == product_id)
            .cloned())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, user_id: &str) -> ShopResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn save_cart(&self, user_id: &str, cart: &Cart) -> ShopResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(user_id)
            .ok_or_else(|| ShopError::Store(format!("User not found: {}", user_id)))?;
        user.cart = cart.clone();
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: &Order) -> ShopResult<()> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(ShopError::Store(format!("Duplicate order id: {}", order.id)));
        }
        orders.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, order_id: &str) -> ShopResult<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|o| o.id == order_id)
            .cloned())
    }

    async fn find_orders_for_user(&self, user_id: &str) -> ShopResult<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|o| o.is_owned_by(user_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::pagination::PageRequest;

    async fn five_products() -> MemoryStore {
        let store = MemoryStore::new();
        for i in 1..=5 {
            store
                .upsert_product(Product::new(format!("p{}", i), format!("Product {}", i), i * 10))
                .await;
        }
        store
    }

    #[tokio::test]
    async fn test_paging_five_products() {
        let store = five_products().await;
        let total = store.count_products().await.unwrap();

        let first = PageRequest::new(1, 2);
        let page = store.find_products(first.offset(), first.limit()).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "p1");

        let third = PageRequest::new(3, 2);
        let page = store.find_products(third.offset(), third.limit()).await.unwrap();
        assert_eq!(page.len(), 1);
        assert!(!third.paginate(total).has_next_page);

        let tenth = PageRequest::new(10, 2);
        let page = store.find_products(tenth.offset(), tenth.limit()).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let store = five_products().await;
        store.upsert_product(Product::new("p2", "Renamed", 99)).await;

        let product = store.find_product("p2").await.unwrap().unwrap();
        assert_eq!(product.title, "Renamed");
        assert_eq!(store.count_products().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_save_cart_unknown_user() {
        let store = MemoryStore::new();
        let result = store.save_cart("nobody", &Cart::default()).await;
        assert!(matches!(result, Err(ShopError::Store(_))));
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let store = MemoryStore::new();
        let mut user = User::new("u1", "u1@example.com");
        user.cart.add_product("p1", 3);
        store.insert_user(user).await;

        store.clear_cart("u1").await.unwrap();
        let user = store.find_user("u1").await.unwrap().unwrap();
        assert!(user.cart.is_empty());
    }

    #[tokio::test]
    async fn test_orders_by_owner() {
        let store = MemoryStore::new();
        let alice = User::new("alice", "alice@example.com");
        let bob = User::new("bob", "bob@example.com");
        let lines = vec![CartLine {
            product: Product::new("p1", "One", 10),
            quantity: 1,
        }];

        let first = Order::place(&alice, &lines);
        let second = Order::place(&bob, &lines);
        let third = Order::place(&alice, &lines);
        for order in [&first, &second, &third] {
            store.insert_order(order).await.unwrap();
        }

        let orders = store.find_orders_for_user("alice").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first.id);
        assert_eq!(orders[1].id, third.id);
        assert!(store.insert_order(&first).await.is_err());
    }

    #[test]
    fn test_seed_from_toml() {
        let seed = StoreSeed::from_toml(
            r#"
            [[products]]
            id = "notebook"
            title = "Notebook"
            price = 1200

            [[users]]
            id = "u1"
            email = "shopper@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(seed.products.len(), 1);
        assert_eq!(seed.users[0].email, "shopper@example.com");
        assert!(seed.users[0].cart.is_empty());
    }
}
