//! Bundle command implementation

use crate::bundle::Aggregator;
use crate::cli::BundleArgs;
use crate::config::{BundleConfig, FileConfig};
use crate::core::types::{BundleReport, ExtensionSet};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Execute the bundle command
pub fn execute(args: BundleArgs, quiet: bool) -> Result<()> {
    let config = build_config(&args)?;

    let show_progress =
        !args.no_progress && !quiet && !args.json && atty::is(atty::Stream::Stderr);
    let spinner = show_progress.then(|| {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress.set_message("Scanning files...");
        progress
    });

    let mut aggregator = Aggregator::new(config);
    if let Some(progress) = spinner.clone() {
        aggregator = aggregator.with_progress(move |update| {
            progress.set_message(format!(
                "[{}] {}",
                update.files_bundled, update.current_file
            ));
        });
    }

    let result = aggregator.run();
    if let Some(progress) = &spinner {
        progress.finish_and_clear();
    }
    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.dry_run {
        print_dry_run(&report, quiet);
    } else if !quiet {
        print_summary(&report);
    }

    Ok(())
}

/// Merge defaults, config file and flags into a [`BundleConfig`]
pub fn build_config(args: &BundleArgs) -> Result<BundleConfig> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let mut config = BundleConfig::new(root);

    let file_config = match &args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => FileConfig::discover(&config.root)?,
    };
    if let Some(file_config) = file_config {
        config.apply_file(file_config);
    }

    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if !args.extensions.is_empty() {
        config.allowed_extensions = ExtensionSet::new(&args.extensions)?;
    }
    if let Some(ignore_file) = &args.ignore_file {
        config.ignore_file = Some(ignore_file.clone());
    }
    config.dry_run = args.dry_run;

    Ok(config)
}

fn print_dry_run(report: &BundleReport, quiet: bool) {
    for path in &report.bundled {
        println!("{}", path);
    }
    if !quiet {
        eprintln!(
            "{} {} of {} files would be bundled into {}",
            "•".cyan(),
            report.files_bundled(),
            report.files_visited,
            report.output.display()
        );
    }
}

fn print_summary(report: &BundleReport) {
    println!(
        "{} Bundled {} files ({}) into {}",
        "✓".green(),
        report.files_bundled(),
        bytesize::ByteSize(report.bytes_written),
        report.output.display().to_string().bright_white()
    );
    println!(
        "  • Ignored: {}, other extensions: {}",
        report.files_ignored, report.files_unmatched
    );
    println!(
        "  • Time: {}",
        humantime::format_duration(Duration::from_millis(report.elapsed_ms))
    );

    if report.has_failures() {
        eprintln!(
            "{} {} files could not be read",
            "⚠".yellow(),
            report.failures.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("srcbundle.toml"),
            "output = \"from_file.txt\"\nextensions = [\"md\"]\nignore_file = \".alt\"\n",
        )
        .unwrap();

        let args = BundleArgs {
            root: Some(temp_dir.path().to_path_buf()),
            extensions: vec!["rs".to_string()],
            ..Default::default()
        };
        let config = build_config(&args).unwrap();

        assert_eq!(config.output, PathBuf::from("from_file.txt"));
        assert!(config.allowed_extensions.contains("rs"));
        assert!(!config.allowed_extensions.contains("md"));
        assert_eq!(config.ignore_file, Some(PathBuf::from(".alt")));
    }

    #[test]
    fn test_explicit_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        fs::write(&config_path, "output = \"custom.txt\"\n").unwrap();

        let args = BundleArgs {
            root: Some(temp_dir.path().to_path_buf()),
            config: Some(config_path),
            dry_run: true,
            ..Default::default()
        };
        let config = build_config(&args).unwrap();

        assert_eq!(config.output, PathBuf::from("custom.txt"));
        assert!(config.dry_run);
        assert_eq!(config.allowed_extensions, ExtensionSet::default());
    }

    #[test]
    fn test_invalid_extension_flag() {
        let temp_dir = TempDir::new().unwrap();
        let args = BundleArgs {
            root: Some(temp_dir.path().to_path_buf()),
            extensions: vec!["".to_string()],
            ..Default::default()
        };
        assert!(build_config(&args).is_err());
    }
}
