//! Cart type.

use serde::{Deserialize, Serialize};

use crate::cart::{LineItem, LineItemCollection};
use crate::error::CartError;

/// A shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart name (e.g., the sales channel's cart namespace).
    pub name: String,
    /// Checkout token identifying the order context.
    pub token: String,
    /// Items in the cart.
    #[serde(default)]
    line_items: LineItemCollection,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            line_items: LineItemCollection::new(),
        }
    }

    /// Items in the cart.
    pub fn line_items(&self) -> &LineItemCollection {
        &self.line_items
    }

    /// Add a single line item.
    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), CartError> {
        self.line_items.add(item)
    }

    /// Add every item of a collection.
    ///
    /// Nothing is added if merging any item fails.
    pub fn add_line_items(&mut self, items: LineItemCollection) -> Result<(), CartError> {
        self.line_items.add_all(Vec::from(items))
    }

    /// Remove a line item by key.
    pub fn remove_line_item(&mut self, key: &str) -> Option<LineItem> {
        self.line_items.remove(key)
    }

    /// Change the quantity of a line item.
    ///
    /// Returns `Ok(false)` if no item has the key.
    pub fn update_quantity(&mut self, key: &str, quantity: i64) -> Result<bool, CartError> {
        match self.line_items.get_mut(key) {
            Some(item) => {
                item.set_quantity(quantity)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.line_items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{DeliveryDate, DeliveryInformation, MAX_QUANTITY_PER_ITEM};
    use chrono::{Duration, Utc};

    fn delivery(free: bool) -> DeliveryInformation {
        let now = Utc::now();
        let window = DeliveryDate::new(now - Duration::hours(6), now + Duration::weeks(3)).unwrap();
        DeliveryInformation::new(9999, 50.0, window, window, free)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new("test", "token-123");
        assert!(cart.is_empty());
        assert_eq!(cart.name, "test");
        assert_eq!(cart.token, "token-123");
    }

    #[test]
    fn test_add_line_items() {
        let mut items = LineItemCollection::new();
        items
            .add(LineItem::product("a", 3).unwrap().with_delivery_information(delivery(false)))
            .unwrap();
        items
            .add(LineItem::product("b", 3).unwrap().with_delivery_information(delivery(true)))
            .unwrap();

        let mut cart = Cart::new("test", "token-123");
        cart.add_line_items(items).unwrap();

        assert_eq!(cart.line_items().len(), 2);
        assert!(cart.line_items().get("b").unwrap().delivery_information().unwrap().free_delivery());
    }

    #[test]
    fn test_failed_add_line_items_leaves_cart_unchanged() {
        let mut cart = Cart::new("test", "token-123");
        cart.add_line_item(LineItem::product("a", MAX_QUANTITY_PER_ITEM).unwrap())
            .unwrap();
        let before = cart.clone();

        let mut items = LineItemCollection::new();
        items.add(LineItem::product("b", 1).unwrap()).unwrap();
        items.add(LineItem::product("a", 1).unwrap()).unwrap();

        assert!(cart.add_line_items(items).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new("test", "token-123");
        cart.add_line_item(LineItem::product("a", 1).unwrap()).unwrap();

        assert!(cart.update_quantity("a", 5).unwrap());
        assert!(!cart.update_quantity("missing", 5).unwrap());
        assert!(cart.update_quantity("a", 0).is_err());
        assert_eq!(cart.line_items().total_quantity(), 5);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new("test", "token-123");
        cart.add_line_item(LineItem::product("a", 1).unwrap()).unwrap();
        cart.add_line_item(LineItem::product("b", 1).unwrap()).unwrap();

        assert!(cart.remove_line_item("a").is_some());
        assert_eq!(cart.line_items().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_json_round_trip_keeps_delivery_flag() {
        let mut cart = Cart::new("test", "token-123");
        cart.add_line_item(LineItem::product("a", 2).unwrap().with_delivery_information(delivery(true)))
            .unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
