//! Filesystem side of a chain bootstrap.
//!
//! - [`store`] - the managed chain data paths and [`clear_store`]
//! - [`primitives`] - verified tree removal and self-deleting scratch files

mod error;
pub mod primitives;
pub mod store;

pub use error::{Error, Result};
pub use primitives::{ScratchFile, remove_file_verified, remove_if_exists, remove_tree};
pub use store::{ManagedKind, ManagedPath, clear_store, default_managed_paths};
