//! Persisting rule definitions and loading them as evaluable rule trees.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};
use turbo_store::{Criteria, Entity, EntityRepository, InMemoryRepository, StoreError};

use crate::config::RuleEngineConfig;
use crate::entity::{RuleConditionEntity, RuleEntity, RuleId};
use crate::error::RuleError;
use crate::registry::RuleRegistry;
use crate::rule::{Container, MatchResult, Rule};
use crate::rules::AndRule;
use crate::scope::CartRuleScope;

/// A persisted rule with its condition tree ready for evaluation.
#[derive(Debug)]
pub struct LoadedRule {
    /// The rule definition.
    pub entity: RuleEntity,
    root: AndRule,
}

impl LoadedRule {
    /// Evaluate the rule's conditions against a scope.
    pub fn evaluate(&self, scope: &CartRuleScope<'_>) -> MatchResult {
        let result = self.root.evaluate(scope);
        debug!(
            rule_id = %self.entity.id,
            matches = result.matches(),
            "evaluated rule"
        );
        result
    }

    /// Root conditions of the rule.
    pub fn conditions(&self) -> &[Box<dyn Rule>] {
        self.root.rules()
    }
}

/// Ids of the rules that match the scope, in the given order.
pub fn matching_rule_ids(rules: &[LoadedRule], scope: &CartRuleScope<'_>) -> Vec<RuleId> {
    rules
        .iter()
        .filter(|rule| rule.evaluate(scope).matches())
        .map(|rule| rule.entity.id.clone())
        .collect()
}

/// Persists rule definitions and loads them through the registry.
pub struct RuleLoader {
    registry: RuleRegistry,
    rules: Arc<dyn EntityRepository<RuleEntity>>,
    conditions: Arc<dyn EntityRepository<RuleConditionEntity>>,
    strict: bool,
}

impl RuleLoader {
    /// Create a loader over the given repositories.
    pub fn new(
        registry: RuleRegistry,
        rules: Arc<dyn EntityRepository<RuleEntity>>,
        conditions: Arc<dyn EntityRepository<RuleConditionEntity>>,
        config: &RuleEngineConfig,
    ) -> Self {
        Self {
            registry,
            rules,
            conditions,
            strict: config.strict_conditions,
        }
    }

    /// Create a loader backed by fresh in-memory repositories.
    pub fn in_memory(config: &RuleEngineConfig) -> Self {
        Self::new(
            RuleRegistry::from_config(config),
            Arc::new(InMemoryRepository::new()),
            Arc::new(InMemoryRepository::new()),
            config,
        )
    }

    /// The registry used to build rules.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Store a rule and its conditions.
    ///
    /// Conditions must belong to the rule and form a tree rooted at the
    /// rule. In strict mode the whole tree must also build through the
    /// registry. Nothing is written if validation fails.
    pub fn persist(
        &self,
        rule: RuleEntity,
        conditions: Vec<RuleConditionEntity>,
    ) -> Result<(), RuleError> {
        if let Some(condition) = conditions.iter().find(|c| c.rule_id != rule.id) {
            return Err(RuleError::ConditionRuleMismatch {
                condition_id: condition.id.to_string(),
                expected: rule.id.to_string(),
                actual: condition.rule_id.to_string(),
            });
        }
        if self.strict {
            self.build(rule.clone(), conditions.clone())?;
        } else {
            validate_tree(&conditions)?;
        }

        self.ensure_unused(&rule, &conditions)?;

        let rule_id = rule.id.clone();
        let condition_ids: Vec<String> = conditions.iter().map(|c| c.id.to_string()).collect();
        self.conditions.create(conditions)?;
        if let Err(e) = self.rules.create(vec![rule]) {
            let ids: Vec<&str> = condition_ids.iter().map(String::as_str).collect();
            self.conditions.delete(&ids)?;
            return Err(e.into());
        }

        info!(
            rule_id = %rule_id,
            conditions = condition_ids.len(),
            "persisted rule"
        );
        Ok(())
    }

    /// Reject a rule or condition id that is already stored.
    fn ensure_unused(
        &self,
        rule: &RuleEntity,
        conditions: &[RuleConditionEntity],
    ) -> Result<(), RuleError> {
        if !self
            .rules
            .search(&Criteria::with_ids([rule.id.as_str()]))?
            .is_empty()
        {
            return Err(duplicate::<RuleEntity>(rule.id.as_str()));
        }

        if conditions.is_empty() {
            return Ok(());
        }
        let stored = self
            .conditions
            .search(&Criteria::with_ids(conditions.iter().map(|c| c.id.as_str())))?;
        match stored.first() {
            Some(existing) => Err(duplicate::<RuleConditionEntity>(existing.id.as_str())),
            None => Ok(()),
        }
    }

    /// Load a rule and build its condition tree.
    pub fn load(&self, rule_id: &RuleId) -> Result<LoadedRule, RuleError> {
        let entity = self
            .rules
            .search(&Criteria::with_ids([rule_id.as_str()]))?
            .into_iter()
            .next()
            .ok_or_else(|| RuleError::RuleNotFound(rule_id.to_string()))?;

        let conditions = self
            .conditions
            .search(&Criteria::new().with_filter("rule_id", rule_id.as_str()))?
            .into_vec();

        self.build(entity, conditions)
    }

    /// Load every rule, highest priority first.
    pub fn load_all(&self) -> Result<Vec<LoadedRule>, RuleError> {
        let mut entities = self.rules.search(&Criteria::new())?.into_vec();
        entities.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));

        let mut by_rule: HashMap<RuleId, Vec<RuleConditionEntity>> = HashMap::new();
        for condition in self.conditions.search(&Criteria::new())? {
            by_rule
                .entry(condition.rule_id.clone())
                .or_default()
                .push(condition);
        }

        entities
            .into_iter()
            .map(|entity| {
                let conditions = by_rule.remove(&entity.id).unwrap_or_default();
                self.build(entity, conditions)
            })
            .collect()
    }

    fn build(
        &self,
        entity: RuleEntity,
        conditions: Vec<RuleConditionEntity>,
    ) -> Result<LoadedRule, RuleError> {
        validate_tree(&conditions)?;

        let mut root = AndRule::new();
        self.attach(&mut root, None, &conditions)?;

        debug!(
            rule_id = %entity.id,
            conditions = conditions.len(),
            "built rule tree"
        );
        Ok(LoadedRule { entity, root })
    }

    fn attach(
        &self,
        parent: &mut dyn Container,
        parent_id: Option<&str>,
        all: &[RuleConditionEntity],
    ) -> Result<(), RuleError> {
        let mut children: Vec<&RuleConditionEntity> = all
            .iter()
            .filter(|c| c.parent_id.as_ref().map(|p| p.as_str()) == parent_id)
            .collect();
        children.sort_by_key(|c| c.position);

        for child in children {
            let mut rule = match self.registry.create(&child.condition_type, &child.value) {
                Ok(rule) => rule,
                Err(RuleError::UnknownConditionType(condition_type)) if !self.strict => {
                    warn!(
                        condition_id = %child.id,
                        condition_type = %condition_type,
                        "skipping unknown condition type"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let child_id = child.id.as_str();
            let has_children = all
                .iter()
                .any(|c| c.parent_id.as_ref().map(|p| p.as_str()) == Some(child_id));
            if has_children {
                let container = rule
                    .as_container_mut()
                    .ok_or_else(|| RuleError::NotAContainer(child.condition_type.clone()))?;
                self.attach(container, Some(child_id), all)?;
            }

            parent.add_rule(rule)?;
        }
        Ok(())
    }
}

/// Check that condition ids are unique and every condition reaches the rule
/// root through its parents.
fn validate_tree(conditions: &[RuleConditionEntity]) -> Result<(), RuleError> {
    let mut ids = HashSet::new();
    if let Some(condition) = conditions.iter().find(|c| !ids.insert(c.id.as_str())) {
        return Err(duplicate::<RuleConditionEntity>(condition.id.as_str()));
    }

    let parents: HashMap<&str, Option<&str>> = conditions
        .iter()
        .map(|c| (c.id.as_str(), c.parent_id.as_ref().map(|p| p.as_str())))
        .collect();

    for condition in conditions {
        let mut seen = HashSet::new();
        let mut current = condition.id.as_str();
        loop {
            if !seen.insert(current) {
                return Err(orphaned(condition));
            }
            match parents.get(current) {
                Some(Some(parent)) => current = parent,
                Some(None) => break,
                None => return Err(orphaned(condition)),
            }
        }
    }
    Ok(())
}

fn duplicate<T: Entity>(id: &str) -> RuleError {
    RuleError::Store(StoreError::DuplicateId {
        entity: T::ENTITY_NAME,
        id: id.to_string(),
    })
}

fn orphaned(condition: &RuleConditionEntity) -> RuleError {
    RuleError::OrphanedCondition {
        condition_id: condition.id.to_string(),
        parent_id: condition
            .parent_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}
