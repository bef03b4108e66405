//! Outcome of a patch run.

use crate::error::FileError;
use crate::patch::rule::TargetRule;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files a single rule resolved to. Empty when the rule matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: TargetRule,
    pub matched: Vec<PathBuf>,
}

/// Aggregated result of [`Patcher::patch`](crate::patch::Patcher::patch).
///
/// `files_modified` is always a subset of `files_matched`. Per-file
/// failures live in `errors`; the caller decides whether they fail the
/// overall step.
#[derive(Debug, Default)]
pub struct PatchResult {
    pub files_matched: Vec<PathBuf>,
    pub files_modified: Vec<PathBuf>,
    pub errors: BTreeMap<PathBuf, FileError>,
    pub rules: Vec<RuleOutcome>,
    pub dry_run: bool,
}

impl PatchResult {
    pub(crate) fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub(crate) fn record_match(&mut self, path: &Path) {
        if !self.files_matched.iter().any(|p| p == path) {
            self.files_matched.push(path.to_path_buf());
        }
    }

    pub(crate) fn record_modified(&mut self, path: &Path) {
        if !self.files_modified.iter().any(|p| p == path) {
            self.files_modified.push(path.to_path_buf());
        }
    }

    pub(crate) fn record_error(&mut self, path: &Path, error: FileError) {
        self.errors.entry(path.to_path_buf()).or_insert(error);
    }

    /// Returns true if no file failed.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        !self.files_modified.is_empty()
    }

    /// Rules that resolved to zero files.
    pub fn unmatched_rules(&self) -> impl Iterator<Item = &TargetRule> {
        self.rules
            .iter()
            .filter(|o| o.matched.is_empty())
            .map(|o| &o.rule)
    }

    /// Prints a summary to stdout.
    ///
    /// Paths are relative to `root` with forward slashes.
    pub fn print_summary(&self, root: &Path) {
        let display_path = |path: &Path| -> String {
            let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
            relative.to_string_lossy().replace('\\', "/")
        };

        if self.dry_run {
            println!("\n{}", "DRY RUN - No changes will be made".yellow().bold());
        }

        if self.files_matched.is_empty() {
            println!("\n{}", "No manifests matched".yellow());
        } else {
            let header = if self.dry_run {
                "Would update"
            } else {
                "Updated"
            };
            println!(
                "\n{} {} of {} matched file{}",
                header.green().bold(),
                self.files_modified.len(),
                self.files_matched.len(),
                if self.files_matched.len() == 1 { "" } else { "s" }
            );

            for path in &self.files_matched {
                let display = display_path(path);
                if self.errors.contains_key(path) {
                    println!("   {} {}", "✗".red(), display);
                } else if self.files_modified.contains(path) {
                    if self.dry_run {
                        println!("   • {}", display);
                    } else {
                        println!("   {} {}", "✓".green(), display);
                    }
                } else {
                    println!("   {} {}", "-".dimmed(), display.dimmed());
                }
            }
        }

        for rule in self.unmatched_rules() {
            println!("   {} no files for {}", "•".yellow(), rule.pattern.dimmed());
        }

        if !self.errors.is_empty() {
            eprintln!(
                "\n{} {} file{} failed",
                "Error:".red().bold(),
                self.errors.len(),
                if self.errors.len() == 1 { "" } else { "s" }
            );
            for (path, error) in &self.errors {
                eprintln!("   {} {}: {}", "✗".red(), display_path(path), error);
            }
        }
    }
}
