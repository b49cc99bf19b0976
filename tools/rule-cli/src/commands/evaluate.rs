//! Rule evaluation command.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use turbo_cart::Cart;
use turbo_rules::{
    CartRuleScope, LoadedRule, RuleConditionEntity, RuleEntity, RuleLoader, SalesChannelContext,
};

use super::EvaluateArgs;
use crate::context::Context;
use crate::output::match_badge;

/// A rule definition file: the rule and its conditions.
#[derive(Debug, Deserialize)]
pub struct RuleDefinition {
    pub rule: RuleEntity,
    #[serde(default)]
    pub conditions: Vec<RuleConditionEntity>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    cart: String,
    token: String,
    line_items: usize,
    sales_channel: String,
    currency: String,
    matched_rule_ids: Vec<String>,
    rules: Vec<RuleReport>,
}

#[derive(Debug, Serialize)]
struct RuleReport {
    id: String,
    name: String,
    priority: i32,
    matches: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<String>,
}

/// Run the evaluate command.
pub fn run(args: EvaluateArgs, ctx: &Context) -> Result<()> {
    let cart: Cart = read_json(&ctx.resolve_path(&args.cart)).context("Failed to load cart")?;
    ctx.output.debug(&format!(
        "Loaded cart '{}' with {} line item(s)",
        cart.name,
        cart.line_items().len()
    ));

    let loader = RuleLoader::in_memory(&ctx.config.engine);
    for path in &args.rules {
        let definition: RuleDefinition = read_json(&ctx.resolve_path(path))
            .with_context(|| format!("Failed to load rule definition: {}", path))?;
        ctx.output.debug(&format!(
            "Persisting rule '{}' with {} condition(s)",
            definition.rule.name,
            definition.conditions.len()
        ));
        loader
            .persist(definition.rule, definition.conditions)
            .with_context(|| format!("Invalid rule definition: {}", path))?;
    }
    let rules = loader.load_all().context("Failed to load rules")?;

    let mut checkout = SalesChannelContext::new(args.sales_channel.clone(), args.currency.clone());
    if let Some(customer) = args.customer {
        checkout = checkout.with_customer(customer);
    }

    let report = evaluate(&cart, &checkout, &rules, &args.sales_channel, &args.currency);

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("Cart {}", report.cart));
    ctx.output.kv("Token", &report.token);
    ctx.output.kv("Line items", &report.line_items.to_string());
    ctx.output.kv("Sales channel", &report.sales_channel);
    ctx.output.kv("Currency", &report.currency);

    ctx.output.header("Rules");
    for rule in &report.rules {
        ctx.output.kv(
            &format!("{} [{}]", rule.name, rule.priority),
            &match_badge(rule.matches),
        );
        for message in &rule.messages {
            ctx.output.debug(message);
        }
    }

    println!();
    if report.matched_rule_ids.is_empty() {
        ctx.output.info("No rule matches the cart");
    } else {
        ctx.output.success(&format!(
            "{} of {} rule(s) match the cart",
            report.matched_rule_ids.len(),
            report.rules.len()
        ));
    }

    Ok(())
}

fn evaluate(
    cart: &Cart,
    checkout: &SalesChannelContext,
    rules: &[LoadedRule],
    sales_channel: &str,
    currency: &str,
) -> EvaluationReport {
    let scope = CartRuleScope::new(cart, checkout);

    let reports: Vec<RuleReport> = rules
        .iter()
        .map(|rule| {
            let result = rule.evaluate(&scope);
            RuleReport {
                id: rule.entity.id.to_string(),
                name: rule.entity.name.clone(),
                priority: rule.entity.priority,
                matches: result.matches(),
                messages: result.into_messages(),
            }
        })
        .collect();

    EvaluationReport {
        cart: cart.name.clone(),
        token: cart.token.clone(),
        line_items: cart.line_items().len(),
        sales_channel: sales_channel.to_string(),
        currency: currency.to_string(),
        matched_rule_ids: reports
            .iter()
            .filter(|r| r.matches)
            .map(|r| r.id.clone())
            .collect(),
        rules: reports,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
