//! sigil CLI - export font glyphs as SVG documents

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Render(args) => commands::render::run(args, cli.quiet),
        Commands::Batch(args) => commands::batch::run(args, cli.quiet),
        Commands::Info(args) => commands::info::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        },
    }
}

/// Warnings always reach stderr; `--verbose` raises to debug, `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
