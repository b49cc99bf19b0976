//! Registry of rule types by persisted condition type.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::RuleEngineConfig;
use crate::error::RuleError;
use crate::rule::Rule;
use crate::rules::{AlwaysValidRule, AndRule, CartHasDeliveryFreeItemRule, NotRule, OrRule};

/// Builds a rule from a persisted condition value.
pub type RuleFactory = fn(&Value) -> Result<Box<dyn Rule>, RuleError>;

/// Maps condition types to rule factories.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    factories: BTreeMap<&'static str, RuleFactory>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in rule.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(CartHasDeliveryFreeItemRule::NAME, |value| {
            Ok(Box::new(CartHasDeliveryFreeItemRule::from_value(value)?))
        });
        registry.register(AndRule::NAME, |value| Ok(Box::new(AndRule::from_value(value)?)));
        registry.register(OrRule::NAME, |value| Ok(Box::new(OrRule::from_value(value)?)));
        registry.register(NotRule::NAME, |value| Ok(Box::new(NotRule::from_value(value)?)));
        registry.register(AlwaysValidRule::NAME, |value| {
            Ok(Box::new(AlwaysValidRule::from_value(value)?))
        });
        registry
    }

    /// Create the default registry minus the types disabled in `config`.
    pub fn from_config(config: &RuleEngineConfig) -> Self {
        let mut registry = Self::with_defaults();
        for name in &config.disabled_types {
            if !registry.unregister(name) {
                warn!(condition_type = %name, "disabled rule type is not registered");
            }
        }
        registry
    }

    /// Register a factory under a condition type.
    ///
    /// An existing factory for the same type is replaced.
    pub fn register(&mut self, name: &'static str, factory: RuleFactory) {
        if self.factories.insert(name, factory).is_some() {
            warn!(condition_type = name, "replaced existing rule factory");
        } else {
            debug!(condition_type = name, "registered rule type");
        }
    }

    /// Remove a condition type, returning whether it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Check whether a condition type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered condition types, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Build a rule for a condition type and value.
    pub fn create(&self, condition_type: &str, value: &Value) -> Result<Box<dyn Rule>, RuleError> {
        let factory = self
            .factories
            .get(condition_type)
            .ok_or_else(|| RuleError::UnknownConditionType(condition_type.to_string()))?;
        factory(value)
    }
}
