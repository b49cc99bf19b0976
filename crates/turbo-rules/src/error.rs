//! Rule error types.

use thiserror::Error;
use turbo_store::StoreError;

/// Errors raised while registering, persisting or loading rules.
///
/// Rule evaluation itself never fails.
#[derive(Error, Debug)]
pub enum RuleError {
    /// No rule is registered under the condition type.
    #[error("Unknown condition type: {0}")]
    UnknownConditionType(String),

    /// The condition value does not fit the rule's options.
    #[error("Invalid value for condition type {condition_type}: {message}")]
    InvalidConditionValue {
        condition_type: String,
        message: String,
    },

    /// A condition has children but its rule cannot hold any.
    #[error("Condition type {0} is not a container")]
    NotAContainer(String),

    /// A container that holds a single rule already has one.
    #[error("Container {0} already holds its only rule")]
    ContainerFull(&'static str),

    /// A condition points at a parent outside its rule, or at itself.
    #[error("Condition {condition_id} has an unreachable parent {parent_id}")]
    OrphanedCondition {
        condition_id: String,
        parent_id: String,
    },

    /// A condition belongs to another rule than the one being persisted.
    #[error("Condition {condition_id} belongs to rule {actual}, expected {expected}")]
    ConditionRuleMismatch {
        condition_id: String,
        expected: String,
        actual: String,
    },

    /// Rule not found.
    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
