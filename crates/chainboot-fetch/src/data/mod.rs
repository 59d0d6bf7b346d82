//! Immutable data types for archive fetching.

pub mod options;
pub mod progress;

pub use options::{FetchOptions, Timeouts};
pub use progress::{FetchOutcome, Progress};
