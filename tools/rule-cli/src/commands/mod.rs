//! CLI command implementations.

pub mod evaluate;
pub mod types;

use clap::Args;

/// Arguments for the evaluate command.
#[derive(Args)]
pub struct EvaluateArgs {
    /// Cart JSON file.
    #[arg(long)]
    pub cart: String,

    /// Rule definition JSON file (repeatable).
    #[arg(short, long = "rule", required = true)]
    pub rules: Vec<String>,

    /// Sales channel the cart is evaluated in.
    #[arg(long, default_value = "storefront")]
    pub sales_channel: String,

    /// Checkout currency.
    #[arg(long, default_value = "EUR")]
    pub currency: String,

    /// Logged-in customer id.
    #[arg(long)]
    pub customer: Option<String>,
}

/// Arguments for the types command.
#[derive(Args)]
pub struct TypesArgs {
    /// Also list types disabled by configuration.
    #[arg(long)]
    pub all: bool,
}
