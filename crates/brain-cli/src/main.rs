//! `brain` -- a local transactional memory store for AI agents.
//!
//! Entry point: parses CLI arguments with clap, resolves the runtime
//! context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;
mod parse;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("brain=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = run(&cli);

    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({ "error": format!("{:#}", e) });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{s}");
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Commands::Init) {
        return commands::init::run(&cli.global);
    }

    let ctx = RuntimeContext::resolve(&cli.global)?;

    match &cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Write(args) => commands::write::run(&ctx, args),
        Commands::Update(args) => commands::update::run(&ctx, args),
        Commands::Deprecate(args) => commands::deprecate::run(&ctx, args),
        Commands::Delete(args) => commands::delete::run(&ctx, args),
        Commands::Boot(args) => commands::boot::run(&ctx, args),
        Commands::Validate(args) => commands::validate::run(&ctx, args),
        Commands::Query(args) => commands::query::run(&ctx, args),
        Commands::Show(args) => commands::show::run(&ctx, args),
    }
}
