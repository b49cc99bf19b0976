//! The rule capability and its evaluation result.

use std::fmt;

use serde::Serialize;

use crate::error::RuleError;
use crate::scope::CartRuleScope;

/// Outcome of evaluating a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    matches: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<String>,
}

impl MatchResult {
    /// Create a result with explanatory messages.
    pub fn new(matches: bool, messages: Vec<String>) -> Self {
        Self { matches, messages }
    }

    /// A positive result.
    pub fn matched() -> Self {
        Self::new(true, Vec::new())
    }

    /// A negative result with a reason.
    pub fn no_match(message: impl Into<String>) -> Self {
        Self::new(false, vec![message.into()])
    }

    /// Whether the rule matched.
    pub fn matches(&self) -> bool {
        self.matches
    }

    /// Messages explaining the outcome.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consume and return the messages.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl From<bool> for MatchResult {
    fn from(matches: bool) -> Self {
        Self::new(matches, Vec::new())
    }
}

/// A predicate over a cart scope.
///
/// `name` is the stable identifier persisted as a condition's `type`;
/// it must be unique across registered rules. Evaluation must be pure:
/// rules are shared across threads and called repeatedly.
pub trait Rule: fmt::Debug + Send + Sync {
    /// Stable type name.
    fn name(&self) -> &'static str;

    /// Evaluate the rule.
    fn evaluate(&self, scope: &CartRuleScope<'_>) -> MatchResult;

    /// Access the rule as a container, if it can hold child rules.
    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }
}

/// A rule that combines child rules.
pub trait Container: Rule {
    /// Append a child rule.
    fn add_rule(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError>;

    /// Child rules in evaluation order.
    fn rules(&self) -> &[Box<dyn Rule>];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_constructors() {
        assert!(MatchResult::matched().matches());
        assert!(MatchResult::matched().messages().is_empty());

        let result = MatchResult::no_match("nope");
        assert!(!result.matches());
        assert_eq!(result.messages(), ["nope".to_string()]);
    }

    #[test]
    fn test_match_result_from_bool() {
        assert_eq!(MatchResult::from(true), MatchResult::matched());
        assert!(!MatchResult::from(false).matches());
    }

    #[test]
    fn test_match_result_serializes_without_empty_messages() {
        let json = serde_json::to_string(&MatchResult::matched()).unwrap();
        assert_eq!(json, r#"{"matches":true}"#);
    }
}
