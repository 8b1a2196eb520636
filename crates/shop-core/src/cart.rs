//! # Cart Types
//!
//! The cart is a sub-document of the user: a list of product references with
//! quantities. Resolving it against the catalog yields `CartLine`s carrying
//! full product data.

use crate::error::ShopResult;
use crate::product::Product;
use crate::store::CatalogStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A product reference with a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A user's cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add `quantity` of a product, merging into an existing line if present
    pub fn add_product(&mut self, product_id: &str, quantity: u32) {
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
    }

    /// Remove the line for a product. Returns false if it was not in the cart.
    pub fn remove_product(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// Resolve each line's product reference against the catalog.
    ///
    /// Lines whose product no longer exists are dropped from the result.
    pub async fn populate(&self, catalog: &dyn CatalogStore) -> ShopResult<Vec<CartLine>> {
        let mut lines = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match catalog.find_product(&item.product_id).await? {
                Some(product) => lines.push(CartLine {
                    product,
                    quantity: item.quantity,
                }),
                None => warn!(
                    product_id = %item.product_id,
                    "Cart references a product that no longer exists"
                ),
            }
        }
        Ok(lines)
    }
}

/// A cart line resolved to full product data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// Sum of price × quantity over resolved lines
pub fn cart_total(lines: &[CartLine]) -> i64 {
    lines.iter().map(CartLine::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_add_twice_merges() {
        let mut cart = Cart::default();
        cart.add_product("p1", 1);
        cart.add_product("p1", 1);

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
    }

    #[test]
    fn test_add_distinct_products_appends() {
        let mut cart = Cart::default();
        cart.add_product("p1", 1);
        cart.add_product("p2", 3);

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[1].product_id, "p2");
        assert_eq!(cart.quantity_of("p2"), 3);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::default();
        cart.add_product("p1", 2);
        let before = cart.clone();

        assert!(!cart.remove_product("missing"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_present() {
        let mut cart = Cart::default();
        cart.add_product("p1", 2);
        cart.add_product("p2", 1);

        assert!(cart.remove_product("p1"));
        assert_eq!(cart.quantity_of("p1"), 0);
        assert_eq!(cart.items.len(), 1);
    }

    #[tokio::test]
    async fn test_populate_and_total() {
        let store = MemoryStore::new();
        store.upsert_product(Product::new("p1", "One", 10)).await;
        store.upsert_product(Product::new("p2", "Two", 25)).await;

        let mut cart = Cart::default();
        cart.add_product("p1", 2);
        cart.add_product("p2", 1);
        cart.add_product("gone", 4);

        let lines = cart.populate(&store).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product.title, "One");
        assert_eq!(cart_total(&lines), 45);
    }
}
