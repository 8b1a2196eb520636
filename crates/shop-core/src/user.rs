//! # User Types

use crate::cart::Cart;
use serde::{Deserialize, Serialize};

/// A shopper, owner of exactly one cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub cart: Cart,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            cart: Cart::default(),
        }
    }
}
