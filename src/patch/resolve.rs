//! Expansion of target rules into concrete file lists.

use crate::error::{PatchError, Result};
use crate::patch::rule::TargetRule;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolves a rule against `root`.
///
/// Non-recursive rules yield exactly one path, whether or not it exists;
/// a missing file surfaces later as a read error. Recursive rules walk the
/// rule's literal directory prefix and return matching regular files in
/// sorted order. A missing walk root yields an empty list.
pub fn resolve(root: &Path, rule: &TargetRule) -> Result<Vec<PathBuf>> {
    if !rule.recursive {
        return Ok(vec![root.join(&rule.pattern)]);
    }

    let overrides = build_overrides(root, rule)?;
    let walk_root = root.join(rule.walk_root());

    if !walk_root.is_dir() {
        log::debug!("Walk root {} does not exist", walk_root.display());
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(&walk_root)
        .standard_filters(false)
        .filter_entry(|e| e.file_name() != OsStr::new(".git"))
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
        .map(|e| e.into_path())
        .filter(|p| overrides.matched(p, false).is_whitelist())
        .collect();

    files.sort();
    Ok(files)
}

fn build_overrides(root: &Path, rule: &TargetRule) -> Result<Override> {
    let invalid = |source| PatchError::InvalidPattern {
        pattern: rule.pattern.clone(),
        source,
    };

    let mut builder = OverrideBuilder::new(root);
    builder.add(&rule.effective_glob()).map_err(invalid)?;
    builder.build().map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "revision: main\n").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_literal_rule_resolves_to_one_path() {
        let temp = TempDir::new().unwrap();
        let rule = TargetRule::file("app/devops-app.yaml", "targetRevision");

        let files = resolve(temp.path(), &rule).unwrap();
        assert_eq!(files, vec![temp.path().join("app/devops-app.yaml")]);
    }

    #[test]
    fn test_recursive_rule_filters_by_suffix_and_sorts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "applicationsets/zeta.yaml");
        touch(root, "applicationsets/alpha.yaml");
        touch(root, "applicationsets/nested/deep/beta.yaml");
        touch(root, "applicationsets/readme.md");
        touch(root, "applicationsets/values.yml");
        touch(root, "other/skip.yaml");

        let rule = TargetRule::tree("applicationsets", ".yaml", "revision");
        let files = resolve(root, &rule).unwrap();

        assert_eq!(
            relative(root, &files),
            vec![
                "applicationsets/alpha.yaml",
                "applicationsets/nested/deep/beta.yaml",
                "applicationsets/zeta.yaml",
            ]
        );
    }

    #[test]
    fn test_recursive_rule_includes_hidden_and_ignored_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(".gitignore"), "applicationsets/ignored.yaml\n").unwrap();
        touch(root, "applicationsets/ignored.yaml");
        touch(root, "applicationsets/.hidden.yaml");

        let rule = TargetRule::tree("applicationsets", ".yaml", "revision");
        let files = resolve(root, &rule).unwrap();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_walk_root_matches_nothing() {
        let temp = TempDir::new().unwrap();
        let rule = TargetRule::tree("applicationsets", ".yaml", "revision");

        let files = resolve(temp.path(), &rule).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "manifests/a.yaml");
        let rule = TargetRule::glob("manifests/[unclosed/*.yaml", "revision");

        assert!(matches!(
            resolve(temp.path(), &rule),
            Err(PatchError::InvalidPattern { .. })
        ));
    }
}
