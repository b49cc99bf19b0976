//! Line items and keyed line item collections.

use serde::{Deserialize, Serialize};

use crate::cart::DeliveryInformation;
use crate::error::CartError;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Line item type for products.
pub const PRODUCT_LINE_ITEM_TYPE: &str = "product";

/// A single cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineItemData")]
pub struct LineItem {
    key: String,
    #[serde(rename = "type")]
    item_type: String,
    quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_information: Option<DeliveryInformation>,
}

#[derive(Deserialize)]
struct LineItemData {
    key: String,
    #[serde(rename = "type")]
    item_type: String,
    quantity: i64,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    delivery_information: Option<DeliveryInformation>,
}

impl TryFrom<LineItemData> for LineItem {
    type Error = CartError;

    fn try_from(data: LineItemData) -> Result<Self, Self::Error> {
        let mut item = Self::new(data.key, data.item_type, data.quantity)?;
        item.label = data.label;
        item.delivery_information = data.delivery_information;
        Ok(item)
    }
}

impl LineItem {
    /// Create a new line item.
    ///
    /// Returns an error if the key is empty or the quantity is not in
    /// `1..=MAX_QUANTITY_PER_ITEM`.
    pub fn new(
        key: impl Into<String>,
        item_type: impl Into<String>,
        quantity: i64,
    ) -> Result<Self, CartError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CartError::EmptyKey);
        }
        validate_quantity(&key, quantity)?;

        Ok(Self {
            key,
            item_type: item_type.into(),
            quantity,
            label: None,
            delivery_information: None,
        })
    }

    /// Create a new product line item.
    pub fn product(key: impl Into<String>, quantity: i64) -> Result<Self, CartError> {
        Self::new(key, PRODUCT_LINE_ITEM_TYPE, quantity)
    }

    /// Attach delivery information.
    pub fn with_delivery_information(mut self, information: DeliveryInformation) -> Self {
        self.delivery_information = Some(information);
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Unique key within the cart.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Type tag (e.g., `"product"`).
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Quantity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Attached delivery information, if any.
    pub fn delivery_information(&self) -> Option<&DeliveryInformation> {
        self.delivery_information.as_ref()
    }

    /// Change the quantity.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), CartError> {
        validate_quantity(&self.key, quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Replace or remove the delivery information.
    pub fn set_delivery_information(&mut self, information: Option<DeliveryInformation>) {
        self.delivery_information = information;
    }
}

fn validate_quantity(key: &str, quantity: i64) -> Result<(), CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity {
            key: key.to_string(),
            quantity,
        });
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CartError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// Line items keyed by their key, in insertion order.
///
/// Adding an item whose key is already present increases the quantity of
/// the existing item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct LineItemCollection {
    items: Vec<LineItem>,
}

impl TryFrom<Vec<LineItem>> for LineItemCollection {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut collection = Self::new();
        collection.add_all(items)?;
        Ok(collection)
    }
}

impl From<LineItemCollection> for Vec<LineItem> {
    fn from(collection: LineItemCollection) -> Self {
        collection.items
    }
}

impl LineItemCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging quantities on key collision.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.key == item.key) {
            let quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartError::Overflow)?;
            return existing.set_quantity(quantity);
        }

        self.items.push(item);
        Ok(())
    }

    /// Add several items.
    ///
    /// Either every item is added or, if one fails, the collection is left
    /// unchanged.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = LineItem>) -> Result<(), CartError> {
        let mut merged = self.clone();
        for item in items {
            merged.add(item)?;
        }
        *self = merged;
        Ok(())
    }

    /// Get an item by key.
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.key == key)
    }

    /// Get a mutable item by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.key == key)
    }

    /// Check if an item with the key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an item by key.
    pub fn remove(&mut self, key: &str) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.key == key)?;
        Some(self.items.remove(index))
    }

    /// Iterate over items of one type.
    pub fn filter_type<'a>(&'a self, item_type: &'a str) -> impl Iterator<Item = &'a LineItem> {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }

    /// Iterate over all items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Keys of all items.
    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.key.as_str()).collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a LineItemCollection {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
