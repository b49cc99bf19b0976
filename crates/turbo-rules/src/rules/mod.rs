//! Built-in rules.

mod always_valid;
mod container;
mod delivery;

pub use always_valid::AlwaysValidRule;
pub use container::{AndRule, NotRule, OrRule};
pub use delivery::CartHasDeliveryFreeItemRule;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RuleError;

/// Options of rules that take none.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct NoOptions {}

/// Parse a condition value into rule options; `null` yields the defaults.
pub(crate) fn parse_options<T>(condition_type: &str, value: &Value) -> Result<T, RuleError>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value.clone()).map_err(|e| RuleError::InvalidConditionValue {
        condition_type: condition_type.to_string(),
        message: e.to_string(),
    })
}
