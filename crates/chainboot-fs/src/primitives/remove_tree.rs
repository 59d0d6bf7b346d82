use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Removes `path` and everything below it, children before parents.
///
/// Individual removals that fail are logged and skipped; the call only
/// succeeds if `path` is gone afterwards. A failed delete on some
/// filesystems (open handles, pending deletes) reports success while the
/// entry lingers, so absence is checked rather than trusted.
pub fn remove_tree(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !exists(path) {
        return Ok(());
    }

    let mut doomed = Vec::new();
    collect_post_order(path, &mut doomed);

    for (entry, is_dir) in &doomed {
        let removed = if *is_dir {
            fs::remove_dir(entry)
        } else {
            fs::remove_file(entry)
        };
        if let Err(e) = removed {
            tracing::debug!(path = %entry.display(), error = %e, "failed to remove entry");
        }
    }

    ensure_absent(path)
}

/// Removes a single file (or symlink) if present and verifies it is gone.
pub fn remove_file_verified(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Error::Remove {
                path: path.to_path_buf(),
                source: e,
            });
        }
    }
    ensure_absent(path)
}

fn ensure_absent(path: &Path) -> Result<()> {
    if exists(path) {
        return Err(Error::StillPresent {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

// Does not follow symlinks: a dangling link still counts as present.
fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn collect_post_order(path: &Path, out: &mut Vec<(PathBuf, bool)>) {
    let is_dir = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false);

    if is_dir {
        match fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    collect_post_order(&entry.path(), out);
                }
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "failed to list directory");
            }
        }
    }

    out.push((path.to_path_buf(), is_dir));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remove_tree_nested() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("txleveldb");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("a/one.ldb"), "1").unwrap();
        fs::write(root.join("a/b/c/two.ldb"), "2").unwrap();
        fs::write(root.join("CURRENT"), "MANIFEST").unwrap();

        remove_tree(&root).unwrap();
        assert!(!root.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn test_remove_tree_missing_is_ok() {
        let dir = tempdir().unwrap();
        remove_tree(dir.path().join("nothing")).unwrap();
    }

    #[test]
    fn test_post_order_children_first() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/file"), "x").unwrap();

        let mut order = Vec::new();
        collect_post_order(&root, &mut order);

        let position = |p: &Path| order.iter().position(|(e, _)| e == p).unwrap();
        assert!(position(&root.join("sub/file")) < position(&root.join("sub")));
        assert!(position(&root.join("sub")) < position(&root));
        assert_eq!(order.last().unwrap().0, root);
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_tree_does_not_follow_symlinks() {
        let dir = tempdir().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "keep").unwrap();

        let root = dir.path().join("tree");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        remove_tree(&root).unwrap();
        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists());
    }

    #[test]
    fn test_ensure_absent_reports_survivor() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("blk0001.dat");
        fs::write(&file, "blocks").unwrap();

        let err = ensure_absent(&file).unwrap_err();
        assert!(matches!(err, Error::StillPresent { path } if path == file));
        ensure_absent(&dir.path().join("gone")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_tree_fails_when_entry_survives() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        let root = locked.join("txleveldb");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("000001.ldb"), "1").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind a privileged user.
        let privileged = fs::create_dir(locked.join("check")).is_ok();
        let result = if privileged { None } else { Some(remove_tree(&root)) };
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if let Some(result) = result {
            assert!(matches!(result, Err(Error::StillPresent { path }) if path == root));
            assert!(root.is_dir());
            assert!(!root.join("000001.ldb").exists());
        }
    }

    #[test]
    fn test_remove_file_verified() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("blk0001.dat");
        fs::write(&file, "blocks").unwrap();

        remove_file_verified(&file).unwrap();
        assert!(!file.exists());
        remove_file_verified(&file).unwrap();
    }
}
