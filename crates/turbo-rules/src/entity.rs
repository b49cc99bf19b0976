//! Persisted rule and condition records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use turbo_store::{define_id, Entity};

define_id!(
    /// Identifier of a persisted rule.
    RuleId
);
define_id!(
    /// Identifier of a persisted rule condition.
    RuleConditionId
);

/// A named rule definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntity {
    /// Unique rule identifier.
    pub id: RuleId,
    /// Display name.
    pub name: String,
    /// Higher priorities are evaluated first.
    #[serde(default)]
    pub priority: i32,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl RuleEntity {
    /// Create a new rule with a generated id.
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            id: RuleId::generate(),
            name: name.into(),
            priority,
            description: None,
            created_at: Utc::now(),
        }
    }

    /// Use a specific id.
    pub fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Entity for RuleEntity {
    const ENTITY_NAME: &'static str = "rule";

    fn id(&self) -> &str {
        self.id.as_str()
    }
}

/// A condition of a rule; its `type` names a registered rule.
///
/// Conditions form a tree through `parent_id`; siblings are ordered by
/// `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConditionEntity {
    /// Unique condition identifier.
    pub id: RuleConditionId,
    /// Registered rule name.
    #[serde(rename = "type")]
    pub condition_type: String,
    /// Owning rule.
    pub rule_id: RuleId,
    /// Parent container condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<RuleConditionId>,
    /// Rule options.
    #[serde(default)]
    pub value: Value,
    /// Position among siblings.
    #[serde(default)]
    pub position: i32,
}

impl RuleConditionEntity {
    /// Create a new root condition with a generated id.
    pub fn new(rule_id: RuleId, condition_type: impl Into<String>) -> Self {
        Self {
            id: RuleConditionId::generate(),
            condition_type: condition_type.into(),
            rule_id,
            parent_id: None,
            value: Value::Null,
            position: 0,
        }
    }

    /// Use a specific id.
    pub fn with_id(mut self, id: RuleConditionId) -> Self {
        self.id = id;
        self
    }

    /// Nest the condition under a container condition.
    pub fn with_parent(mut self, parent_id: RuleConditionId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the rule options.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Set the position among siblings.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }
}

impl Entity for RuleConditionEntity {
    const ENTITY_NAME: &'static str = "rule_condition";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "rule_id" => Some(Value::from(self.rule_id.as_str())),
            "parent_id" => Some(
                self.parent_id
                    .as_ref()
                    .map_or(Value::Null, |p| Value::from(p.as_str())),
            ),
            "type" => Some(Value::from(self.condition_type.as_str())),
            _ => None,
        }
    }
}
