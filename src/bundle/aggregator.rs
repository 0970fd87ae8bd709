//! Traversal and aggregation driver
//!
//! One pass over the tree: every file that survives the ignore rules and
//! the extension allowlist is appended to the output in traversal order.
//! Files that cannot be read as UTF-8 text are reported and skipped.

use crate::bundle::writer::BundleWriter;
use crate::config::BundleConfig;
use crate::core::error::{BundleError, Result};
use crate::core::types::{BundleReport, FileFailure, FileRecord};
use crate::ignore::{FileScanner, FilterDecision, IgnoreRules, PathFilter};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Progress information reported after each bundled file
#[derive(Debug, Clone)]
pub struct BundleProgress {
    /// Files seen by the walk so far
    pub files_visited: usize,
    /// Files bundled (or listed, in a dry run) so far
    pub files_bundled: usize,
    /// Relative path of the file just bundled
    pub current_file: String,
}

/// Bundles a directory tree into a single text file
pub struct Aggregator {
    config: BundleConfig,
    /// Progress callback function
    progress_callback: Option<Box<dyn Fn(&BundleProgress)>>,
}

impl Aggregator {
    pub fn new(config: BundleConfig) -> Self {
        Self {
            config,
            progress_callback: None,
        }
    }

    /// Set progress callback for real-time updates
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&BundleProgress) + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Run the bundle
    ///
    /// Setup failures (root missing, output not creatable) and write
    /// failures abort the run. Per-file read failures do not.
    pub fn run(&self) -> Result<BundleReport> {
        let start_time = Instant::now();
        let paths = self.config.resolve()?;
        let rules = IgnoreRules::from_file(&paths.ignore_file);

        tracing::debug!(
            "Bundling {} into {} ({} ignore patterns, extensions: {})",
            paths.root.display(),
            paths.output.display(),
            rules.patterns().len(),
            self.config.allowed_extensions
        );

        let mut sink = if self.config.dry_run {
            None
        } else {
            Some(create_output(&paths.output)?)
        };

        let filter = PathFilter::new(rules, self.config.allowed_extensions.clone())
            .with_output(canonical_or_self(&paths.output));

        let mut report = BundleReport {
            root: paths.root.clone(),
            output: paths.output.clone(),
            dry_run: self.config.dry_run,
            ..Default::default()
        };

        let scanner = FileScanner::new(&paths.root, &filter);
        for record in scanner.files() {
            let record = record?;

            match filter.check(&record) {
                FilterDecision::OutputFile => continue,
                FilterDecision::Ignored(pattern) => {
                    report.files_visited += 1;
                    report.files_ignored += 1;
                    tracing::debug!("Ignored {} (pattern {})", record.display_path(), pattern);
                },
                FilterDecision::UnmatchedExtension => {
                    report.files_visited += 1;
                    report.files_unmatched += 1;
                    tracing::trace!("Skipped {} (extension)", record.display_path());
                },
                FilterDecision::Included => {
                    report.files_visited += 1;
                    self.bundle_file(&record, sink.as_mut(), &paths.output, &mut report)?;
                },
            }
        }

        if let Some(writer) = sink {
            report.bytes_written = writer.bytes_written();
            writer.finish().map_err(|source| BundleError::Write {
                path: paths.output.clone(),
                source,
            })?;
        }

        report.elapsed_ms = start_time.elapsed().as_millis() as u64;
        tracing::debug!(
            "Bundled {} of {} files ({} failed)",
            report.files_bundled(),
            report.files_visited,
            report.failures.len()
        );

        Ok(report)
    }

    fn bundle_file<W: Write>(
        &self,
        record: &FileRecord,
        sink: Option<&mut BundleWriter<W>>,
        output: &Path,
        report: &mut BundleReport,
    ) -> Result<()> {
        let display_path = record.display_path();

        if let Some(writer) = sink {
            let content = match fs::read_to_string(&record.path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", display_path, e);
                    report.failures.push(FileFailure {
                        path: display_path,
                        error: e.to_string(),
                    });
                    return Ok(());
                },
            };

            writer
                .write_block(&display_path, &content)
                .map_err(|source| BundleError::Write {
                    path: output.to_path_buf(),
                    source,
                })?;
        }

        report.bundled.push(display_path);
        self.report_progress(report);
        Ok(())
    }

    /// Report progress to callback
    fn report_progress(&self, report: &BundleReport) {
        if let Some(callback) = &self.progress_callback {
            callback(&BundleProgress {
                files_visited: report.files_visited,
                files_bundled: report.bundled.len(),
                current_file: report.bundled.last().cloned().unwrap_or_default(),
            });
        }
    }
}

/// Bundle with the given configuration and no progress reporting
pub fn bundle(config: BundleConfig) -> Result<BundleReport> {
    Aggregator::new(config).run()
}

fn create_output(path: &Path) -> Result<BundleWriter<BufWriter<File>>> {
    let file = File::create(path).map_err(|source| BundleError::OutputCreate {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BundleWriter::new(BufWriter::new(file)))
}

fn canonical_or_self(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
