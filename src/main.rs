//! srcbundle CLI
//!
//! Command-line interface for bundling a source tree into one text file.

use anyhow::Result;
use clap::Parser;
use srcbundle::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flags.
    // --quiet only hides the summary, per-file warnings still reach stderr.
    let default_filter = if cli.verbose { "srcbundle=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Execute the command
    match cli.command {
        Some(Commands::Completion { shell }) => commands::completion::execute(shell),
        None => commands::bundle::execute(cli.bundle, cli.quiet),
    }
}
