//! fuzzbuild CLI - libFuzzer archives from Go packages

use std::sync::Arc;

use clap::Parser;
use fuzzbuild::util::Shell;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, MessageFormat};

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    let shell = Arc::new(Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    ));

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("fuzzbuild=debug")
    } else if cli.quiet {
        EnvFilter::new("fuzzbuild=warn")
    } else {
        EnvFilter::new("fuzzbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = commands::build::execute(&cli, &shell) {
        if shell.is_json() {
            shell.error(format!("{:#}", e));
        }
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
