//! # Order Types
//!
//! Orders are append-only. Each line holds a value copy of the product taken
//! when the order was placed, so later catalog edits never reach it.

use crate::cart::CartLine;
use crate::product::Product;
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner of an order: user id plus the email at order time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUser {
    pub user_id: String,
    pub email: String,
}

/// A line in an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: u32,
    /// Product snapshot
    pub product: Product,
}

impl OrderLine {
    pub fn total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID (generated)
    pub id: String,

    pub user: OrderUser,

    pub products: Vec<OrderLine>,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a new order for `user` from resolved cart lines
    pub fn place(user: &User, lines: &[CartLine]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: OrderUser {
                user_id: user.id.clone(),
                email: user.email.clone(),
            },
            products: lines
                .iter()
                .map(|line| OrderLine {
                    quantity: line.quantity,
                    product: line.product.clone(),
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user.user_id == user_id
    }

    /// Calculate order total
    pub fn total(&self) -> i64 {
        self.products.iter().map(OrderLine::total).sum()
    }

    /// Get item count
    pub fn item_count(&self) -> u32 {
        self.products.iter().map(|l| l.quantity).sum()
    }

    /// File name of this order's invoice
    pub fn invoice_name(&self) -> String {
        invoice_name(&self.id)
    }
}

/// `invoice-<orderId>.pdf`
pub fn invoice_name(order_id: &str) -> String {
    format!("invoice-{}.pdf", order_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine {
                product: Product::new("p1", "Product 1", 1000),
                quantity: 2,
            },
            CartLine {
                product: Product::new("p2", "Product 2", 2500),
                quantity: 1,
            },
        ]
    }

    #[test]
    fn test_place_order() {
        let user = User::new("u1", "u1@example.com");
        let order = Order::place(&user, &lines());

        assert_eq!(order.user.user_id, "u1");
        assert_eq!(order.user.email, "u1@example.com");
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.total(), 4500);
        assert_eq!(order.item_count(), 3);
        assert!(order.is_owned_by("u1"));
        assert!(!order.is_owned_by("u2"));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let user = User::new("u1", "u1@example.com");
        let mut source = lines();
        let order = Order::place(&user, &source);

        source[0].product.price = 1;
        source[0].product.title = "Renamed".to_string();

        assert_eq!(order.products[0].product.price, 1000);
        assert_eq!(order.products[0].product.title, "Product 1");
    }

    #[test]
    fn test_invoice_name() {
        assert_eq!(invoice_name("abc"), "invoice-abc.pdf");
    }

    #[test]
    fn test_order_serializes_snapshot() {
        let user = User::new("u1", "u1@example.com");
        let order = Order::place(&user, &lines());
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["products"][0]["product"]["price"], 1000);
        assert_eq!(json["user"]["email"], "u1@example.com");
    }
}
