//! Rule type listing.

use anyhow::Result;
use serde::Serialize;
use turbo_rules::RuleRegistry;

use super::TypesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct TypeInfo {
    name: &'static str,
    enabled: bool,
}

/// Run the types command.
pub fn run(args: TypesArgs, ctx: &Context) -> Result<()> {
    let types = list_types(&RuleRegistry::from_config(&ctx.config.engine), args.all);

    if ctx.output.is_json() {
        ctx.output.json(&types);
        return Ok(());
    }

    ctx.output.header("Rule types");
    for info in &types {
        if info.enabled {
            ctx.output.list_item(info.name);
        } else {
            ctx.output.list_item(&format!("{} (disabled)", info.name));
        }
    }
    Ok(())
}

fn list_types(enabled: &RuleRegistry, all: bool) -> Vec<TypeInfo> {
    let source = if all {
        RuleRegistry::with_defaults()
    } else {
        enabled.clone()
    };

    source
        .names()
        .into_iter()
        .map(|name| TypeInfo {
            name,
            enabled: enabled.contains(name),
        })
        .collect()
}
