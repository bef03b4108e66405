//! Target rules: which files to patch and which field to rewrite.

use crate::error::{PatchError, Result};
use std::fmt;
use std::path::PathBuf;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// A (file pattern, field name) pair.
///
/// Non-recursive rules name exactly one file relative to the patch root.
/// Recursive rules carry a gitignore-style glob (`applicationsets/**/*.yaml`)
/// and expand via a directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRule {
    pub pattern: String,
    pub field: String,
    pub recursive: bool,
}

impl TargetRule {
    /// Rule for a single literal file.
    pub fn file(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            pattern: path.into(),
            field: field.into(),
            recursive: false,
        }
    }

    /// Rule for every file under `dir` whose name ends with `suffix`.
    pub fn tree(dir: &str, suffix: &str, field: impl Into<String>) -> Self {
        let dir = dir.trim_end_matches('/');
        Self::glob(format!("{dir}/**/*{suffix}"), field)
    }

    /// Rule for every file matching a gitignore-style glob.
    pub fn glob(pattern: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            field: field.into(),
            recursive: true,
        }
    }

    /// Checks the field name can be matched as a YAML key.
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(PatchError::InvalidRule(
                self.pattern.clone(),
                "field name cannot be empty".to_string(),
            ));
        }

        if self
            .field
            .chars()
            .any(|c| c == ':' || c == '\n' || c == '\r')
        {
            return Err(PatchError::InvalidRule(
                self.pattern.clone(),
                format!("field name '{}' contains ':' or a line break", self.field),
            ));
        }

        if self.pattern.trim().is_empty() {
            return Err(PatchError::InvalidRule(
                self.pattern.clone(),
                "pattern cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Glob used to filter walked files.
    ///
    /// A recursive pattern without glob characters is treated as a
    /// directory and matches everything beneath it.
    pub fn effective_glob(&self) -> String {
        if self.pattern.contains(GLOB_META) {
            self.pattern.clone()
        } else {
            format!("{}/**", self.pattern.trim_end_matches('/'))
        }
    }

    /// Directory the walk starts from: the literal components in front of
    /// the first glob character.
    pub fn walk_root(&self) -> PathBuf {
        let mut root = PathBuf::new();
        for component in self.pattern.split('/') {
            if component.contains(GLOB_META) {
                break;
            }
            if !component.is_empty() && component != "." {
                root.push(component);
            }
        }
        root
    }
}

impl fmt::Display for TargetRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:)", self.pattern, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_builds_glob() {
        let rule = TargetRule::tree("applicationsets/", ".yaml", "revision");
        assert_eq!(rule.pattern, "applicationsets/**/*.yaml");
        assert!(rule.recursive);
        assert_eq!(rule.walk_root(), PathBuf::from("applicationsets"));
    }

    #[test]
    fn test_walk_root_stops_at_first_glob() {
        let rule = TargetRule::glob("deploy/envs/*/apps/*.yaml", "revision");
        assert_eq!(rule.walk_root(), PathBuf::from("deploy/envs"));

        let rule = TargetRule::glob("**/*.yaml", "revision");
        assert_eq!(rule.walk_root(), PathBuf::new());
    }

    #[test]
    fn test_plain_directory_pattern() {
        let rule = TargetRule::glob("manifests", "revision");
        assert_eq!(rule.effective_glob(), "manifests/**");
        assert_eq!(rule.walk_root(), PathBuf::from("manifests"));
    }

    #[test]
    fn test_validate_field() {
        assert!(TargetRule::file("app.yaml", "targetRevision").validate().is_ok());
        assert!(TargetRule::file("app.yaml", "").validate().is_err());
        assert!(TargetRule::file("app.yaml", "a:b").validate().is_err());
        assert!(TargetRule::file("  ", "revision").validate().is_err());
    }
}
