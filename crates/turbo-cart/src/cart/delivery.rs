//! Delivery windows and delivery information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// A delivery window between two points in time.
///
/// Invariant: `earliest <= latest`. The invariant is checked on construction
/// and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DeliveryDateData")]
pub struct DeliveryDate {
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
}

#[derive(Deserialize)]
struct DeliveryDateData {
    earliest: DateTime<Utc>,
    latest: DateTime<Utc>,
}

impl TryFrom<DeliveryDateData> for DeliveryDate {
    type Error = CartError;

    fn try_from(data: DeliveryDateData) -> Result<Self, Self::Error> {
        Self::new(data.earliest, data.latest)
    }
}

impl DeliveryDate {
    /// Create a new delivery window.
    pub fn new(earliest: DateTime<Utc>, latest: DateTime<Utc>) -> Result<Self, CartError> {
        if earliest > latest {
            return Err(CartError::InvalidDeliveryWindow { earliest, latest });
        }
        Ok(Self { earliest, latest })
    }

    /// Earliest delivery time.
    pub fn earliest(&self) -> DateTime<Utc> {
        self.earliest
    }

    /// Latest delivery time.
    pub fn latest(&self) -> DateTime<Utc> {
        self.latest
    }
}

/// Fulfillment metadata attached to a line item.
///
/// Immutable once built; replace it on the line item to change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryInformation {
    stock: i64,
    weight: f64,
    in_stock_delivery_date: DeliveryDate,
    out_of_stock_delivery_date: DeliveryDate,
    free_delivery: bool,
}

impl DeliveryInformation {
    /// Create delivery information.
    pub fn new(
        stock: i64,
        weight: f64,
        in_stock_delivery_date: DeliveryDate,
        out_of_stock_delivery_date: DeliveryDate,
        free_delivery: bool,
    ) -> Self {
        Self {
            stock,
            weight,
            in_stock_delivery_date,
            out_of_stock_delivery_date,
            free_delivery,
        }
    }

    /// Available stock.
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Weight of a single unit.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Delivery window when the item is in stock.
    pub fn in_stock_delivery_date(&self) -> DeliveryDate {
        self.in_stock_delivery_date
    }

    /// Delivery window when the item must be restocked first.
    pub fn out_of_stock_delivery_date(&self) -> DeliveryDate {
        self.out_of_stock_delivery_date
    }

    /// Whether the item ships without delivery cost.
    pub fn free_delivery(&self) -> bool {
        self.free_delivery
    }
}
