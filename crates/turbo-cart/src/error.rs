//! Cart error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when building or changing a cart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    /// Line item key is empty.
    #[error("Line item key must not be empty")]
    EmptyKey,

    /// Invalid quantity.
    #[error("Invalid quantity for line item {key}: {quantity}")]
    InvalidQuantity { key: String, quantity: i64 },

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in quantity calculation")]
    Overflow,

    /// Delivery window ends before it starts.
    #[error("Invalid delivery window: earliest {earliest} is after latest {latest}")]
    InvalidDeliveryWindow {
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },
}
