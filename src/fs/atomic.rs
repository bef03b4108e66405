//! Atomic replacement of existing files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replaces the contents of `path` with `content`.
///
/// Symlinks are resolved first so the link stays a link and its target
/// receives the new content. The content is written and synced to a temp
/// file next to the resolved target, which is then renamed over it. The
/// target's permissions are carried over. On any error the original file
/// is left untouched and the temp file is removed.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let permissions = fs::metadata(&target)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;

    temp.persist(&target).map_err(|e| e.error)?;

    log::trace!("Persisted {} ({})", path.display(), target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.yaml");
        fs::write(&path, "old\n").unwrap();

        write_atomic(&path, "new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        // No stray temp files left behind
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.yaml");

        assert!(write_atomic(&path, "new\n").is_err());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_through_symlink() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        let app = temp.path().join("app");
        fs::create_dir(&shared).unwrap();
        fs::create_dir(&app).unwrap();
        fs::write(shared.join("app.yaml"), "old\n").unwrap();
        std::os::unix::fs::symlink("../shared/app.yaml", app.join("devops-app.yaml")).unwrap();

        let link = app.join("devops-app.yaml");
        write_atomic(&link, "new\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(shared.join("app.yaml")).unwrap(), "new\n");
        assert_eq!(fs::read_dir(&shared).unwrap().count(), 1);
        assert_eq!(fs::read_dir(&app).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.yaml");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, "new\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }
}
