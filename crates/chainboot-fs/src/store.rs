//! The chain data store: the fixed set of paths a bootstrap replaces.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::primitives::{remove_file_verified, remove_tree};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagedKind {
    Directory,
    File,
}

/// A data-store path below the destination root that must be cleared
/// before fresh chain data is extracted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedPath {
    pub name: String,
    pub kind: ManagedKind,
}

impl ManagedPath {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ManagedKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ManagedKind::File,
        }
    }

    /// Resolves the path below `root`, rejecting names that are not a
    /// single plain component.
    pub fn resolve(&self, root: &Path) -> Result<PathBuf> {
        let mut components = Path::new(&self.name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => Ok(root.join(part)),
            _ => Err(Error::InvalidManagedPath {
                name: self.name.clone(),
            }),
        }
    }
}

/// The transaction index directory and the primary block file.
pub fn default_managed_paths() -> Vec<ManagedPath> {
    vec![
        ManagedPath::directory("txleveldb"),
        ManagedPath::file("blk0001.dat"),
    ]
}

/// Deletes every managed path under `root` and verifies each is gone.
pub fn clear_store(root: impl AsRef<Path>, managed: &[ManagedPath]) -> Result<()> {
    let root = root.as_ref();
    for entry in managed {
        let target = entry.resolve(root)?;
        tracing::debug!(path = %target.display(), kind = ?entry.kind, "clearing managed path");
        match entry.kind {
            ManagedKind::Directory => remove_tree(&target)?,
            ManagedKind::File => remove_file_verified(&target)?,
        }
    }
    Ok(())
}
