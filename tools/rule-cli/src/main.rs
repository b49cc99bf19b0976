//! TurboRules CLI - evaluate cart rules from the command line.
//!
//! Commands:
//! - `turbo-rules evaluate` - Evaluate rule definitions against a cart
//! - `turbo-rules types` - List registered rule types

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{EvaluateArgs, TypesArgs};

/// TurboRules CLI - Evaluate cart rules
#[derive(Parser)]
#[command(name = "turbo-rules")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate rule definitions against a cart
    Evaluate(EvaluateArgs),

    /// List registered rule types
    Types(TypesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("{:#}", e));
    }

    let result = match cli.command {
        Commands::Evaluate(args) => commands::evaluate::run(args, &ctx),
        Commands::Types(args) => commands::types::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
