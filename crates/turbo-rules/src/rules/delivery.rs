//! Free delivery item rule.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use turbo_cart::{DeliveryInformation, LineItem};

use crate::error::RuleError;
use crate::rule::{MatchResult, Rule};
use crate::rules::parse_options;
use crate::scope::CartRuleScope;

/// Matches when the cart contains at least one line item whose delivery
/// information is flagged as free delivery.
///
/// Line items without delivery information are skipped. With
/// `allowed = false` the rule matches carts without such an item instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartHasDeliveryFreeItemRule {
    allowed: bool,
}

impl Default for CartHasDeliveryFreeItemRule {
    fn default() -> Self {
        Self { allowed: true }
    }
}

impl CartHasDeliveryFreeItemRule {
    /// Persisted condition type.
    pub const NAME: &'static str = "cartHasDeliveryFreeItem";

    /// Create the rule matching carts with a free delivery item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the rule with an explicit expectation.
    pub fn with_allowed(allowed: bool) -> Self {
        Self { allowed }
    }

    /// Whether a free delivery item is expected to be present.
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// Build the rule from a persisted condition value.
    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        parse_options(Self::NAME, value)
    }
}

impl Rule for CartHasDeliveryFreeItemRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, scope: &CartRuleScope<'_>) -> MatchResult {
        let has_free_delivery_item = scope
            .cart()
            .line_items()
            .iter()
            .filter_map(LineItem::delivery_information)
            .any(DeliveryInformation::free_delivery);

        if has_free_delivery_item == self.allowed {
            MatchResult::matched()
        } else if self.allowed {
            MatchResult::no_match("Cart has no free delivery item")
        } else {
            MatchResult::no_match("Cart has a free delivery item")
        }
    }
}
