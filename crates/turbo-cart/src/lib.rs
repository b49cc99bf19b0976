//! Cart domain types for TurboRules.
//!
//! - **Cart**: a named cart identified by its checkout token
//! - **LineItem**: one keyed cart entry with quantity and optional delivery information
//! - **Delivery**: delivery windows and free-delivery flags attached to line items
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use turbo_cart::prelude::*;
//!
//! let now = Utc::now();
//! let window = DeliveryDate::new(now, now + Duration::weeks(3)).unwrap();
//! let info = DeliveryInformation::new(9999, 50.0, window, window, true);
//!
//! let mut cart = Cart::new("storefront", "token-1");
//! cart.add_line_item(
//!     LineItem::new("sku-1", "product", 3)
//!         .unwrap()
//!         .with_delivery_information(info),
//! )
//! .unwrap();
//!
//! assert_eq!(cart.line_items().total_quantity(), 3);
//! ```

pub mod error;

pub mod cart;

pub use cart::{
    Cart, DeliveryDate, DeliveryInformation, LineItem, LineItemCollection, MAX_QUANTITY_PER_ITEM,
    PRODUCT_LINE_ITEM_TYPE,
};
pub use error::CartError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        Cart, DeliveryDate, DeliveryInformation, LineItem, LineItemCollection,
        MAX_QUANTITY_PER_ITEM,
    };
    pub use crate::error::CartError;
}
