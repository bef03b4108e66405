//! Release profiles.
//!
//! The branch being released selects a [`ReleaseProfile`] once at startup.
//! The profile fixes everything branch-dependent: which manifests are
//! patched, which assets the commit step stages, and the commit message.

use crate::patch::{PatchResult, TargetRule};
use crate::version::ReleaseVersion;
use std::fmt;
use std::path::{Path, PathBuf};

/// Branch that produces full releases.
pub const MAIN_BRANCH: &str = "main";

/// Pre-release identifier used on every other branch.
pub const PRERELEASE_CHANNEL: &str = "rc";

pub const CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const APP_MANIFEST: &str = "app/devops-app.yaml";
pub const APPLICATIONSETS_DIR: &str = "applicationsets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseProfile {
    /// Full release from `main`: changelog, manifests, release notes.
    Main,
    /// `rc` pre-release from any other branch: manifests only.
    PreRelease,
}

impl ReleaseProfile {
    pub fn from_branch(branch: &str) -> Self {
        if branch.trim() == MAIN_BRANCH {
            Self::Main
        } else {
            Self::PreRelease
        }
    }
}

impl fmt::Display for ReleaseProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("release"),
            Self::PreRelease => f.write_str("pre-release"),
        }
    }
}

/// Everything a release run needs, resolved from the profile.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub profile: ReleaseProfile,
    pub rules: Vec<TargetRule>,
    /// Paths (globs allowed) handed to the staging step.
    pub assets: Vec<String>,
    /// Whether the changelog step runs and `CHANGELOG.md` is staged.
    pub changelog: bool,
    pub prerelease_channel: Option<&'static str>,
}

impl ReleaseConfig {
    /// Both profiles patch the same manifests; they differ in changelog,
    /// staged assets, and commit message.
    pub fn for_profile(profile: ReleaseProfile) -> Self {
        let rules = vec![
            TargetRule::file(APP_MANIFEST, "targetRevision"),
            TargetRule::tree(APPLICATIONSETS_DIR, ".yaml", "revision"),
        ];

        let mut assets = vec![
            APP_MANIFEST.to_string(),
            format!("{APPLICATIONSETS_DIR}/**/*.yaml"),
        ];

        match profile {
            ReleaseProfile::Main => {
                assets.insert(0, CHANGELOG_FILE.to_string());
                Self {
                    profile,
                    rules,
                    assets,
                    changelog: true,
                    prerelease_channel: None,
                }
            }
            ReleaseProfile::PreRelease => Self {
                profile,
                rules,
                assets,
                changelog: false,
                prerelease_channel: Some(PRERELEASE_CHANNEL),
            },
        }
    }

    pub fn for_branch(branch: &str) -> Self {
        Self::for_profile(ReleaseProfile::from_branch(branch))
    }

    /// Renders the release commit message.
    ///
    /// Release notes are appended after a blank line for full releases only.
    pub fn commit_message(&self, version: &ReleaseVersion, notes: Option<&str>) -> String {
        let subject = format!("chore({}): {} [skip ci]", self.profile, version);

        match (self.profile, notes.map(str::trim)) {
            (ReleaseProfile::Main, Some(notes)) if !notes.is_empty() => {
                format!("{subject}\n\n{notes}")
            }
            _ => subject,
        }
    }

    /// Concrete paths for the staging step: every modified manifest, plus
    /// the changelog when this profile produces one and it exists on disk.
    pub fn staging_paths(&self, result: &PatchResult, root: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(result.files_modified.len() + 1);

        if self.changelog {
            let changelog = root.join(CHANGELOG_FILE);
            if changelog.exists() {
                paths.push(changelog);
            } else {
                log::warn!("{} not found; skipping", CHANGELOG_FILE);
            }
        }

        paths.extend(result.files_modified.iter().cloned());
        paths
    }
}
