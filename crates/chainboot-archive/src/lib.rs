//! Zip extraction for untrusted chain bootstrap archives.
//!
//! # Architecture
//!
//! - `sanitize.rs` - entry name resolution (zip-slip prevention)
//! - `extract.rs` - validate-all-then-write extraction
//! - `report.rs` - what was written

pub use error::{Error, Result};
pub use extract::{extract_archive, extract_from_reader};
pub use report::{EntryKind, ExtractReport, ExtractedEntry};
pub use sanitize::{SanitizedPath, ensure_contained, sanitize_entry_path};

mod error;
mod extract;
mod report;
mod sanitize;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
