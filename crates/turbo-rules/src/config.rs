//! Rule engine configuration.

use serde::{Deserialize, Serialize};

/// Rule engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEngineConfig {
    /// Reject unknown condition types when persisting or loading rules.
    ///
    /// When disabled, unknown conditions (and their children) are skipped
    /// while loading.
    pub strict_conditions: bool,

    /// Built-in rule types to leave out of the registry.
    pub disabled_types: Vec<String>,
}

impl Default for RuleEngineConfig {
    fn default() -> Self {
        Self {
            strict_conditions: true,
            disabled_types: Vec::new(),
        }
    }
}
