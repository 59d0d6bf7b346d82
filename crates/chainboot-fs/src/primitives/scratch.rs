use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A file that lives only for the duration of one operation.
///
/// Dropping the guard deletes the file; a failed delete is logged, never
/// surfaced.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Claims `path`, removing any stale file and creating missing parents.
    pub fn prepare(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        remove_if_exists(&path)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match remove_if_exists(&self.path) {
            Ok(true) => tracing::debug!(path = %self.path.display(), "removed scratch file"),
            Ok(false) => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove scratch file"
            ),
        }
    }
}

/// Removes a file, returning whether anything was deleted.
pub fn remove_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Remove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prepare_removes_stale_and_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/archive.zip");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale").unwrap();

        let scratch = ScratchFile::prepare(&path).unwrap();
        assert!(!scratch.path().exists());
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive.zip");
        {
            let scratch = ScratchFile::prepare(&path).unwrap();
            std::fs::write(scratch.path(), "data").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_without_file_is_quiet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never-written.zip");
        drop(ScratchFile::prepare(&path).unwrap());
        assert!(!path.exists());
    }
}
