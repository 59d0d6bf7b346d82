pub mod remove_tree;
pub mod scratch;

pub use remove_tree::{remove_file_verified, remove_tree};
pub use scratch::{ScratchFile, remove_if_exists};
