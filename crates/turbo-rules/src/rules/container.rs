//! Container rules combining child rules.

use serde_json::Value;

use crate::error::RuleError;
use crate::rule::{Container, MatchResult, Rule};
use crate::rules::{parse_options, NoOptions};
use crate::scope::CartRuleScope;

/// Matches when every child matches. An empty `AndRule` matches.
///
/// Stops at the first child that does not match.
#[derive(Debug, Default)]
pub struct AndRule {
    rules: Vec<Box<dyn Rule>>,
}

impl AndRule {
    /// Persisted condition type.
    pub const NAME: &'static str = "andContainer";

    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding the given rules.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Build the rule from a persisted condition value.
    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        parse_options::<NoOptions>(Self::NAME, value)?;
        Ok(Self::new())
    }
}

impl Rule for AndRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, scope: &CartRuleScope<'_>) -> MatchResult {
        for rule in &self.rules {
            let result = rule.evaluate(scope);
            if !result.matches() {
                return MatchResult::new(false, result.into_messages());
            }
        }
        MatchResult::matched()
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for AndRule {
    fn add_rule(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError> {
        self.rules.push(rule);
        Ok(())
    }

    fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

/// Matches when at least one child matches. An empty `OrRule` does not match.
///
/// Stops at the first child that matches.
#[derive(Debug, Default)]
pub struct OrRule {
    rules: Vec<Box<dyn Rule>>,
}

impl OrRule {
    /// Persisted condition type.
    pub const NAME: &'static str = "orContainer";

    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding the given rules.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Build the rule from a persisted condition value.
    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        parse_options::<NoOptions>(Self::NAME, value)?;
        Ok(Self::new())
    }
}

impl Rule for OrRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, scope: &CartRuleScope<'_>) -> MatchResult {
        let mut messages = Vec::new();
        for rule in &self.rules {
            let result = rule.evaluate(scope);
            if result.matches() {
                return MatchResult::matched();
            }
            messages.extend(result.into_messages());
        }
        MatchResult::new(false, messages)
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for OrRule {
    fn add_rule(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError> {
        self.rules.push(rule);
        Ok(())
    }

    fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

/// Negates its single child. Without a child it does not match.
#[derive(Debug, Default)]
pub struct NotRule {
    rules: Vec<Box<dyn Rule>>,
}

impl NotRule {
    /// Persisted condition type.
    pub const NAME: &'static str = "notContainer";

    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container negating `rule`.
    pub fn wrap(rule: Box<dyn Rule>) -> Self {
        Self { rules: vec![rule] }
    }

    /// Build the rule from a persisted condition value.
    pub fn from_value(value: &Value) -> Result<Self, RuleError> {
        parse_options::<NoOptions>(Self::NAME, value)?;
        Ok(Self::new())
    }
}

impl Rule for NotRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn evaluate(&self, scope: &CartRuleScope<'_>) -> MatchResult {
        match self.rules.first() {
            Some(rule) if rule.evaluate(scope).matches() => {
                MatchResult::no_match(format!("Negated rule {} matched", rule.name()))
            }
            Some(_) => MatchResult::matched(),
            None => MatchResult::no_match("notContainer has no rule to negate"),
        }
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        Some(self)
    }
}

impl Container for NotRule {
    fn add_rule(&mut self, rule: Box<dyn Rule>) -> Result<(), RuleError> {
        if !self.rules.is_empty() {
            return Err(RuleError::ContainerFull(Self::NAME));
        }
        self.rules.push(rule);
        Ok(())
    }

    fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}
