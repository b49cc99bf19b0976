//! Rule that matches every cart.

use serde_json::Value;

use crate::error::RuleError;
use crate::rule::{MatchResult, Rule};
use crate::rules::{parse_options, NoOptions};
use crate::scope::CartRuleScope;

/// A rule that matches every scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysValidRule;

impl AlwaysValidRule {
    /// Persisted condition type.
    pub const NAME: &'static str = "alwaysValid";

    /// Build the rule from a persisted condition value.
    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        parse_options::<NoOptions>(Self::NAME, value)?;
        Ok(Self)
    }
}

impl Rule for AlwaysValidRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, _scope: &CartRuleScope<'_>) -> MatchResult {
        MatchResult::matched()
    }
}
