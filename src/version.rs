//! Validation of the externally computed release version.
//!
//! Pure functions with no I/O or side effects.

use crate::error::{PatchError, Result};
use std::fmt;

/// Release version as handed over by the versioning step, e.g. `1.4.0`
/// or `0.9.1-rc.1`.
///
/// Stored verbatim; manifests receive it as `v<version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Validates a version string.
    ///
    /// ## Rules
    /// - Not empty
    /// - No leading `v` (the patcher adds the prefix itself)
    /// - Parses as semver: `MAJOR.MINOR.PATCH[-PRE][+BUILD]`
    ///
    /// Semver parsing also rules out whitespace, path separators and
    /// control characters.
    pub fn parse(version: &str) -> Result<Self> {
        if version.is_empty() {
            return Err(PatchError::InvalidVersion(
                version.to_string(),
                "cannot be empty".to_string(),
            ));
        }

        if version.starts_with('v') || version.starts_with('V') {
            return Err(PatchError::InvalidVersion(
                version.to_string(),
                "must not carry a 'v' prefix".to_string(),
            ));
        }

        semver::Version::parse(version)
            .map_err(|e| PatchError::InvalidVersion(version.to_string(), e.to_string()))?;

        Ok(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value written into manifests.
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }

    /// Returns true if the version carries a pre-release suffix.
    pub fn is_prerelease(&self) -> bool {
        semver::Version::parse(&self.0).is_ok_and(|v| !v.pre.is_empty())
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
