//! Streaming download of a bootstrap archive.
//!
//! # Architecture
//!
//! - [`data`] - options, progress and outcome types
//! - [`tracking`] - pure progress de-duplication
//! - effects - the [`HttpClient`] seam and the [`Fetcher`] that drives it
//!
//! The fetcher writes the body in fixed-size chunks, reports whole-percent
//! progress changes, and stops between chunks when its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires.

pub mod data;
mod effects;
mod error;
pub mod tracking;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use data::{FetchOptions, FetchOutcome, Progress, Timeouts};
pub use effects::{BoxStream, Fetcher, HttpClient, Response};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{BoxError, Error, Result};
