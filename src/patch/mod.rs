//! Manifest version patching.
//!
//! Given a release version and a list of [`TargetRule`]s, rewrites the
//! named YAML field in every matched file to `v<version>`. Files are
//! processed sequentially; a failure on one file is recorded in the
//! [`PatchResult`] and the batch continues.
//!
//! ## Example
//!
//! ```no_run
//! # use manifest_patch::patch::{Patcher, TargetRule};
//! # fn example() -> manifest_patch::error::Result<()> {
//! let rules = [
//!     TargetRule::file("app/devops-app.yaml", "targetRevision"),
//!     TargetRule::tree("applicationsets", ".yaml", "revision"),
//! ];
//!
//! let result = Patcher::new(".").patch("1.4.0", &rules)?;
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

mod resolve;
mod result;
mod rewrite;
mod rule;

pub use resolve::resolve;
pub use result::{PatchResult, RuleOutcome};
pub use rewrite::FieldRewriter;
pub use rule::TargetRule;

use crate::error::{FileError, Result};
use crate::fs::write_atomic;
use crate::version::ReleaseVersion;
use std::fs;
use std::path::{Path, PathBuf};

/// Patches manifests under a fixed root directory.
#[derive(Debug, Clone)]
pub struct Patcher {
    root: PathBuf,
    dry_run: bool,
}

impl Patcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// When set, files are read and compared but never written.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates `version`, then patches every file the rules resolve to.
    ///
    /// # Errors
    ///
    /// Fails without touching any file if the version is invalid or a rule
    /// cannot be compiled. Per-file read/write failures are not errors
    /// here; they are collected in [`PatchResult::errors`].
    pub fn patch(&self, version: &str, rules: &[TargetRule]) -> Result<PatchResult> {
        let version = ReleaseVersion::parse(version)?;
        self.patch_version(&version, rules)
    }

    /// Same as [`Patcher::patch`] for an already validated version.
    pub fn patch_version(
        &self,
        version: &ReleaseVersion,
        rules: &[TargetRule],
    ) -> Result<PatchResult> {
        // Resolve everything up front so a bad rule fails before any write
        let mut plan = Vec::with_capacity(rules.len());
        for rule in rules {
            rule.validate()?;
            let rewriter = FieldRewriter::new(&rule.field, version)?;
            let files = resolve(&self.root, rule)?;
            plan.push((rule, rewriter, files));
        }

        let mut result = PatchResult::new(self.dry_run);

        for (rule, rewriter, files) in plan {
            if files.is_empty() {
                log::info!("No files matched '{}'", rule.pattern);
            }

            for path in &files {
                result.record_match(path);

                // Don't retry a file that already failed under an earlier rule
                if result.errors.contains_key(path) {
                    continue;
                }

                match self.patch_file(path, &rewriter) {
                    Ok(true) => result.record_modified(path),
                    Ok(false) => log::debug!("No '{}:' in {}", rule.field, path.display()),
                    Err(e) => {
                        log::warn!("{}: {}", path.display(), e);
                        result.record_error(path, e);
                    }
                }
            }

            result.rules.push(RuleOutcome {
                rule: rule.clone(),
                matched: files,
            });
        }

        Ok(result)
    }

    fn patch_file(
        &self,
        path: &Path,
        rewriter: &FieldRewriter,
    ) -> std::result::Result<bool, FileError> {
        let content = fs::read_to_string(path).map_err(|source| FileError::Read { source })?;

        let Some(updated) = rewriter.rewrite(&content) else {
            return Ok(false);
        };

        if self.dry_run {
            log::debug!("Would update {}", path.display());
            return Ok(true);
        }

        write_atomic(path, &updated).map_err(|source| FileError::Write { source })?;
        log::debug!("Updated {}", path.display());
        Ok(true)
    }
}

/// Patches `rules` relative to the current working directory.
pub fn patch(version: &str, rules: &[TargetRule]) -> Result<PatchResult> {
    let version = ReleaseVersion::parse(version)?;
    Patcher::new(std::env::current_dir()?).patch_version(&version, rules)
}
