//! Client-side shopping cart.
//!
//! This mirrors the cart the storefront keeps in browser local storage under
//! the `"cart"` key. The server never sees it and never validates it against
//! live stock; availability is only checked when an order is submitted.
//! Last write wins across tabs, there is no merging.

use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "cart";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i32,
    pub name: String,
    pub price: f32,
    pub image_url: String,
    pub slug: String,
    pub quantity: u32,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds one unit of a product/variant. An existing line with the same
    /// product and variant selection gets its quantity bumped instead of a
    /// new line. No stock limit is enforced here.
    pub fn add_item(&mut self, new_item: CartItem) {
        let found = self.items.iter_mut().find(|item| {
            item.product_id == new_item.product_id
                && item.selected_color == new_item.selected_color
                && item.selected_size == new_item.selected_size
        });

        match found {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem {
                quantity: 1,
                ..new_item
            }),
        }
    }

    pub fn remove_item(&mut self, product_id: i32) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Sets the quantity of every line for `product_id`; zero removes them.
    pub fn update_quantity(&mut self, product_id: i32, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        for item in &mut self.items {
            if item.product_id == product_id {
                item.quantity = quantity;
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> f32 {
        self.items
            .iter()
            .map(|item| item.price * item.quantity as f32)
            .sum()
    }

    /// Parses the serialized form read from the local-storage key; a missing
    /// or corrupt value yields an empty cart, matching the storefront.
    pub fn from_storage(raw: Option<&str>) -> Self {
        raw.and_then(|value| serde_json::from_str(value).ok())
            .unwrap_or_default()
    }

    pub fn to_storage(&self) -> String {
        serde_json::to_string(self).expect("cart serialization cannot fail")
    }
}
