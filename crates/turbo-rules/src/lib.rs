//! Cart rule evaluation for TurboRules.
//!
//! Rules are predicates over a [`CartRuleScope`], a cart together with the
//! checkout context it is evaluated in. Every rule exposes a stable
//! [`Rule::name`] that doubles as the persisted condition `type`, so rule
//! definitions stored through a repository can be turned back into rule
//! trees by the [`RuleRegistry`] and [`RuleLoader`].
//!
//! - **Rules**: [`CartHasDeliveryFreeItemRule`], container rules, [`AlwaysValidRule`]
//! - **Registry**: condition type to rule factory mapping
//! - **Persistence**: [`RuleEntity`] / [`RuleConditionEntity`] and the [`RuleLoader`]
//!
//! # Example
//!
//! ```rust
//! use turbo_cart::Cart;
//! use turbo_rules::prelude::*;
//!
//! let cart = Cart::new("storefront", "token-1");
//! let context = SalesChannelContext::new("storefront", "EUR");
//!
//! let rule = CartHasDeliveryFreeItemRule::new();
//! let result = rule.evaluate(&CartRuleScope::new(&cart, &context));
//! assert!(!result.matches());
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod loader;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod scope;

pub use config::RuleEngineConfig;
pub use entity::{RuleConditionEntity, RuleConditionId, RuleEntity, RuleId};
pub use error::RuleError;
pub use loader::{matching_rule_ids, LoadedRule, RuleLoader};
pub use registry::{RuleFactory, RuleRegistry};
pub use rule::{Container, MatchResult, Rule};
pub use rules::{AlwaysValidRule, AndRule, CartHasDeliveryFreeItemRule, NotRule, OrRule};
pub use scope::{CartRuleScope, CheckoutContext, SalesChannelContext};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::RuleEngineConfig;
    pub use crate::entity::{RuleConditionEntity, RuleConditionId, RuleEntity, RuleId};
    pub use crate::error::RuleError;
    pub use crate::loader::{matching_rule_ids, LoadedRule, RuleLoader};
    pub use crate::registry::RuleRegistry;
    pub use crate::rule::{Container, MatchResult, Rule};
    pub use crate::rules::{
        AlwaysValidRule, AndRule, CartHasDeliveryFreeItemRule, NotRule, OrRule,
    };
    pub use crate::scope::{CartRuleScope, CheckoutContext, SalesChannelContext};
}
