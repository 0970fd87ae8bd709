//! Completion command implementation

use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

/// Generate shell completion scripts
///
/// The script goes to stdout; installation hints go to stderr so the
/// output can be piped or eval'd directly.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = "srcbundle";

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    let hint = match shell {
        Shell::Bash => "srcbundle completion bash > ~/.local/share/bash-completion/completions/srcbundle",
        Shell::Zsh => "srcbundle completion zsh > ~/.local/share/zsh/site-functions/_srcbundle",
        Shell::Fish => "srcbundle completion fish > ~/.config/fish/completions/srcbundle.fish",
        Shell::PowerShell => "Invoke-Expression (& srcbundle completion powershell)",
        _ => "Save the script where your shell loads completions",
    };
    eprintln!("\n{} {}", "Install with:".bold(), hint.cyan());

    Ok(())
}
