use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedPath {
    pub original: String,
    /// Entry path with `.` and `..` resolved; empty for the root itself.
    pub relative: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an untrusted entry name against `base`.
///
/// Resolution is component-wise: absolute paths, drive prefixes and any
/// `..` that would climb above `base` are rejected with
/// [`Error::PathTraversal`]. Backslashes count as separators so that
/// Windows-authored names cannot smuggle `..\` past the check.
pub fn sanitize_entry_path(entry: &str, base: &Path) -> Result<SanitizedPath> {
    if entry.contains('\0') {
        return Err(Error::InvalidPath {
            entry: entry.to_string(),
        });
    }

    let unified = entry.replace('\\', "/");
    let mut relative = PathBuf::new();

    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(traversal(entry));
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(traversal(entry)),
        }
    }

    let resolved = base.join(&relative);
    if !resolved.starts_with(base) {
        return Err(traversal(entry));
    }

    Ok(SanitizedPath {
        original: entry.to_string(),
        relative,
        resolved,
    })
}

/// Check that an on-disk path, once symlinks are resolved, is still inside
/// the canonical `root`.
pub fn ensure_contained(entry: &str, path: &Path, root: &Path) -> Result<()> {
    let canonical = path.canonicalize().map_err(|e| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    if canonical.starts_with(root) {
        Ok(())
    } else {
        Err(traversal(entry))
    }
}

fn traversal(entry: &str) -> Error {
    Error::PathTraversal {
        entry: entry.to_string(),
    }
}
