//! Shared fixtures for manifest-patch integration tests.
//!
//! Each fixture is a throwaway repository laid out like a GitOps
//! deployment repo: one Argo CD application manifest and a tree of
//! application sets.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(unused)]
pub const APP_MANIFEST: &str = r#"apiVersion: argoproj.io/v1alpha1
kind: Application
metadata:
  name: devops-app
spec:
  project: default
  source:
    repoURL: https://git.example.com/platform/devops.git
    targetRevision: HEAD
    path: applicationsets
  destination:
    server: https://kubernetes.default.svc
    namespace: argocd
"#;

#[allow(unused)]
pub const APPLICATIONSET: &str = r#"apiVersion: argoproj.io/v1alpha1
kind: ApplicationSet
metadata:
  name: monitoring
spec:
  generators:
    - git:
        repoURL: https://git.example.com/platform/devops.git
        revision: HEAD
        directories:
          - path: charts/*
  template:
    spec:
      source:
        repoURL: https://git.example.com/platform/devops.git
        revision: HEAD
        path: '{{path}}'
"#;

#[allow(unused)]
pub const PLAIN_YAML: &str = "apiVersion: v1\nkind: ConfigMap\ndata:\n  key: value\n";

/// Writes `content` to `root/rel`, creating parent directories.
#[allow(unused)]
pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[allow(unused)]
pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Repository with the app manifest, two application sets carrying
/// `revision:` and one YAML file without it.
#[allow(unused)]
pub fn create_release_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "app/devops-app.yaml", APP_MANIFEST);
    write(root, "applicationsets/monitoring.yaml", APPLICATIONSET);
    write(root, "applicationsets/team-a/ingress.yaml", APPLICATIONSET);
    write(root, "applicationsets/team-a/config.yaml", PLAIN_YAML);
    write(root, "CHANGELOG.md", "# Changelog\n");

    temp
}

/// Runs the `patch` subcommand against `root` with colors disabled.
#[allow(unused)]
pub fn run_patch(root: &Path, version: &str, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("manifest-patch");
    cmd.arg("patch")
        .arg("--version")
        .arg(version)
        .arg("--root")
        .arg(root)
        .args(extra_args)
        .env("NO_COLOR", "1")
        .env_remove("BRANCH_NAME");

    cmd.assert()
}
