//! Shopping cart for kits. Payment is cash on delivery.

use crate::models::Kit;
use serde::{Deserialize, Serialize};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub kit_id: String,
    pub name: String,
    pub price: u32,
    pub image: String,
}

impl From<&Kit> for CartItem {
    fn from(kit: &Kit) -> Self {
        Self {
            kit_id: kit.id.clone(),
            name: kit.name.clone(),
            price: kit.price,
            image: kit.image.clone(),
        }
    }
}

/// Kits picked in the shop; the same kit may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kit: &Kit) {
        self.items.push(CartItem::from(kit));
    }

    /// Remove the line at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of prices, in rupees.
    pub fn total(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.price)).sum()
    }
}
