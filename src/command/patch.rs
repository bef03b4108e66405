//! The `patch` subcommand: patch manifests and hand off to the commit step.

use crate::error::{PatchError, Result};
use crate::patch::Patcher;
use crate::profile::{MAIN_BRANCH, ReleaseConfig};
use crate::version::ReleaseVersion;
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
pub struct PatchArgs {
    /// Release version computed by the versioning step (e.g. 1.4.0)
    #[arg(long = "version", value_name = "VERSION")]
    pub release_version: String,

    /// Branch being released; `main` is a full release, anything else an rc
    #[arg(long, env = "BRANCH_NAME", default_value = MAIN_BRANCH)]
    pub branch: String,

    /// Repository root the manifest paths are relative to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Release notes to append to the commit message (main only)
    #[arg(long, value_name = "FILE")]
    pub notes: Option<PathBuf>,

    /// Also write the rendered commit message to this file
    #[arg(long, value_name = "FILE")]
    pub message_file: Option<PathBuf>,

    /// Show what would change without writing any file
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

pub fn execute(args: PatchArgs) -> Result<()> {
    // Validate before anything else touches the disk
    let version = ReleaseVersion::parse(&args.release_version)?;
    let config = ReleaseConfig::for_branch(&args.branch);

    log::info!(
        "Branch '{}' resolved to {} profile",
        args.branch,
        config.profile
    );

    if config.prerelease_channel.is_some() && !version.is_prerelease() {
        log::warn!(
            "Version {} has no pre-release suffix but branch '{}' is a pre-release branch",
            version,
            args.branch
        );
    }

    let notes = args
        .notes
        .as_deref()
        .map(read_notes)
        .transpose()?;

    let patcher = Patcher::new(&args.root).dry_run(args.dry_run);
    let result = patcher.patch_version(&version, &config.rules)?;

    result.print_summary(patcher.root());

    if !result.is_success() {
        return Err(PatchError::Other(anyhow::anyhow!(
            "{} of {} manifest(s) could not be patched",
            result.errors.len(),
            result.files_matched.len()
        )));
    }

    let message = config.commit_message(&version, notes.as_deref());
    if !result.has_changes() {
        log::info!("Manifests already at v{}", version);
    }

    let staging = config.staging_paths(&result, patcher.root());

    print_handoff(&staging, &message, patcher.root());

    if let Some(path) = &args.message_file
        && !args.dry_run
    {
        fs::write(path, format!("{message}\n"))
            .with_context(|| format!("Failed to write commit message to {}", path.display()))?;
        log::debug!("Commit message written to {}", path.display());
    }

    if !args.dry_run {
        println!(
            "{} {} → v{}",
            "✓ Patched".green().bold(),
            config.profile,
            version.to_string().green().bold()
        );
    }

    Ok(())
}

fn read_notes(path: &Path) -> Result<String> {
    let notes = fs::read_to_string(path)
        .with_context(|| format!("Failed to read release notes from {}", path.display()))?;
    Ok(notes)
}

fn print_handoff(staging: &[PathBuf], message: &str, root: &Path) {
    println!("\n{}", "Stage:".bold().cyan());
    if staging.is_empty() {
        println!("   {}", "nothing to stage".dimmed());
    }
    for path in staging {
        let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
        println!("   {}", relative.to_string_lossy().replace('\\', "/"));
    }

    println!("\n{}", "Commit message:".bold().cyan());
    for line in message.lines() {
        println!("   {}", line);
    }
    println!();
}
