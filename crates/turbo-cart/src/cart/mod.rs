//! Shopping cart module.
//!
//! Contains types for the cart, its line items, and delivery information.

mod cart;
mod delivery;
mod line_item;

pub use cart::Cart;
pub use delivery::{DeliveryDate, DeliveryInformation};
pub use line_item::{LineItem, LineItemCollection, MAX_QUANTITY_PER_ITEM, PRODUCT_LINE_ITEM_TYPE};
