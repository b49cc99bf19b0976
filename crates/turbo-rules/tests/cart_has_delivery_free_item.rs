//! End-to-end tests for the free delivery item rule: evaluation against
//! carts, persistence of its condition type, and concurrent use.

use std::sync::Arc;

use chrono::{Duration, Utc};
use proptest::prelude::*;
use turbo_cart::{Cart, DeliveryDate, DeliveryInformation, LineItem, LineItemCollection};
use turbo_rules::prelude::*;
use turbo_store::{Criteria, EntityRepository, InMemoryRepository};

/// Checkout context double that answers with fixed values.
struct StubContext;

impl CheckoutContext for StubContext {
    fn sales_channel_id(&self) -> &str {
        "stub-channel"
    }

    fn currency(&self) -> &str {
        "EUR"
    }

    fn customer_id(&self) -> Option<&str> {
        None
    }
}

fn delivery_information(free_delivery: bool) -> DeliveryInformation {
    let now = Utc::now();
    let window = DeliveryDate::new(now - Duration::hours(6), now + Duration::weeks(3)).unwrap();
    DeliveryInformation::new(9999, 50.0, window, window, free_delivery)
}

fn cart_from_flags(flags: &[Option<bool>]) -> Cart {
    let mut cart = Cart::new("test", "token");
    for (i, flag) in flags.iter().enumerate() {
        let mut item = LineItem::product(format!("item-{}", i), 1).unwrap();
        if let Some(free) = flag {
            item = item.with_delivery_information(delivery_information(*free));
        }
        cart.add_line_item(item).unwrap();
    }
    cart
}

#[test]
fn test_shipping_free_line_items_are_caught() {
    let mut line_items = LineItemCollection::new();
    line_items
        .add(
            LineItem::new("dummyWithShippingCost", "product", 3)
                .unwrap()
                .with_delivery_information(delivery_information(false)),
        )
        .unwrap();
    line_items
        .add(
            LineItem::new("dummyNoShippingCost", "product", 3)
                .unwrap()
                .with_delivery_information(delivery_information(true)),
        )
        .unwrap();

    let mut cart = Cart::new("test", "d2c5f7a1b3e94c6f8a0b1c2d3e4f5a6b");
    cart.add_line_items(line_items).unwrap();

    let rule = CartHasDeliveryFreeItemRule::new();
    let result = rule.evaluate(&CartRuleScope::new(&cart, &StubContext));

    assert!(result.matches());
}

#[test]
fn test_rule_name_is_persisted_as_condition_type() {
    let rules = Arc::new(InMemoryRepository::<RuleEntity>::new());
    let conditions = Arc::new(InMemoryRepository::<RuleConditionEntity>::new());

    let rule = RuleEntity::new("Demo rule", 1);
    rules.create(vec![rule.clone()]).unwrap();

    let condition = RuleConditionEntity::new(rule.id.clone(), CartHasDeliveryFreeItemRule::new().name());
    let condition_id = condition.id.clone();
    conditions.create(vec![condition]).unwrap();

    let found = conditions
        .search(&Criteria::with_ids([condition_id.as_str()]))
        .unwrap();
    let stored = found.get(condition_id.as_str()).expect("condition should be stored");

    assert_eq!(stored.condition_type, "cartHasDeliveryFreeItem");
    assert_eq!(stored.rule_id, rule.id);
}

#[test]
fn test_persisted_rule_evaluates_like_the_rule_itself() {
    let rules = Arc::new(InMemoryRepository::<RuleEntity>::new());
    let conditions = Arc::new(InMemoryRepository::<RuleConditionEntity>::new());
    let config = RuleEngineConfig::default();
    let loader = RuleLoader::new(
        RuleRegistry::from_config(&config),
        rules.clone(),
        conditions.clone(),
        &config,
    );

    let rule = RuleEntity::new("Free delivery", 1);
    let rule_id = rule.id.clone();
    let condition = RuleConditionEntity::new(rule_id.clone(), CartHasDeliveryFreeItemRule::NAME);
    loader.persist(rule, vec![condition]).unwrap();

    assert_eq!(rules.len().unwrap(), 1);
    assert_eq!(conditions.len().unwrap(), 1);

    let loaded = loader.load(&rule_id).unwrap();
    let direct = CartHasDeliveryFreeItemRule::new();
    for flags in [
        vec![],
        vec![None],
        vec![Some(false)],
        vec![Some(true)],
        vec![None, Some(true)],
        vec![Some(false), Some(true)],
    ] {
        let cart = cart_from_flags(&flags);
        let scope = CartRuleScope::new(&cart, &StubContext);
        assert_eq!(
            loaded.evaluate(&scope).matches(),
            direct.evaluate(&scope).matches(),
            "flags: {:?}",
            flags
        );
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let cart = cart_from_flags(&[Some(false), None, Some(true)]);
    let rule = CartHasDeliveryFreeItemRule::new();
    let scope = CartRuleScope::new(&cart, &StubContext);

    let first = rule.evaluate(&scope);
    let second = rule.evaluate(&scope);
    assert_eq!(first, second);
    assert_eq!(cart, cart_from_flags(&[Some(false), None, Some(true)]));
}

#[test]
fn test_concurrent_evaluation() {
    let rule: Arc<dyn Rule> = Arc::new(CartHasDeliveryFreeItemRule::new());
    let carts = [
        (cart_from_flags(&[Some(true)]), true),
        (cart_from_flags(&[Some(false)]), false),
        (cart_from_flags(&[None, Some(true)]), true),
        (cart_from_flags(&[]), false),
    ];

    std::thread::scope(|s| {
        for _ in 0..4 {
            for (cart, expected) in &carts {
                let rule = Arc::clone(&rule);
                s.spawn(move || {
                    for _ in 0..100 {
                        let scope = CartRuleScope::new(cart, &StubContext);
                        assert_eq!(rule.evaluate(&scope).matches(), *expected);
                    }
                });
            }
        }
    });
}

proptest! {
    #[test]
    fn prop_matches_iff_any_item_is_free(flags in prop::collection::vec(prop::option::of(any::<bool>()), 0..16)) {
        let cart = cart_from_flags(&flags);
        let scope = CartRuleScope::new(&cart, &StubContext);
        let expected = flags.iter().any(|flag| *flag == Some(true));

        prop_assert_eq!(CartHasDeliveryFreeItemRule::new().evaluate(&scope).matches(), expected);
        prop_assert_eq!(
            CartHasDeliveryFreeItemRule::with_allowed(false).evaluate(&scope).matches(),
            !expected
        );
    }
}
