//! Cart Model
//!
//! Serialized as `{"items": [...], "totalPrice": n}`, the same shape the
//! local store and the `/api/cart` endpoint use.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cart line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Shopping cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(rename = "totalPrice", default)]
    pub total_price: Decimal,
}

impl Cart {
    /// Merge by `product_id`; an existing line accumulates quantity.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
        self.recompute();
    }

    /// Remove the line at `index`, returning it
    pub fn remove_at(&mut self, index: usize) -> Option<CartItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.recompute();
        Some(removed)
    }

    /// Remove the line for `product_id`, returning it
    pub fn remove_product(&mut self, product_id: i64) -> Option<CartItem> {
        let index = self.items.iter().position(|l| l.product_id == product_id)?;
        self.remove_at(index)
    }

    /// Set an absolute quantity; 0 removes the line. Returns false if absent.
    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_product(product_id).is_some();
        }
        let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) else {
            return false;
        };
        line.quantity = quantity;
        self.recompute();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units
    pub fn count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Sum of `price * quantity`
    pub fn recompute(&mut self) {
        self.total_price = self
            .items
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum();
    }
}
