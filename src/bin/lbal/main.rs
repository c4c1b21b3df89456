//! lbal CLI - uniform capability tokens for C++ toolchains

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use lbal::util::diagnostic;
use lbal::ResolveError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        // Resolution failures carry stage, implicated signal and a hint
        match e.downcast_ref::<ResolveError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("lbal=debug")
    } else {
        EnvFilter::new("lbal=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Probe(args) => commands::probe::execute(args),
        Commands::Identify(args) => commands::identify::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args, color),
        Commands::Rules(args) => commands::rules::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
