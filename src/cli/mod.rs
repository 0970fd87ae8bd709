//! Command-line interface for srcbundle

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub mod commands;

/// srcbundle - concatenate a source tree into a single text file
#[derive(Parser, Debug)]
#[command(
    name = "srcbundle",
    version,
    about = "Concatenate a source tree into a single text file",
    long_about = "Walks a directory, skips paths matched by the root .gitignore and files whose extension is not allowed, and writes every remaining file into one output file behind a '--- <path> ---' header."
)]
pub struct Cli {
    #[command(flatten)]
    pub bundle: BundleArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the summary and progress output (warnings are still shown)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for a bundling run
#[derive(Args, Debug, Clone, Default)]
pub struct BundleArgs {
    /// Directory to scan (default: current directory)
    #[arg(long, env = "SRCBUNDLE_ROOT")]
    pub root: Option<PathBuf>,

    /// Output file, relative to the root unless absolute (default: output.txt)
    #[arg(short, long, env = "SRCBUNDLE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Allowed extension; repeat or comma-separate (default: js,css,html)
    #[arg(short = 'e', long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Ignore file to use instead of <root>/.gitignore
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Config file (default: <root>/srcbundle.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List the files that would be bundled without writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
