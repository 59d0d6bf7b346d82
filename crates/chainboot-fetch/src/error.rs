//! Error types for chainboot-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to read response body after {bytes_downloaded} bytes: {source}")]
    Body {
        bytes_downloaded: u64,
        #[source]
        source: BoxError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to prepare download target: {0}")]
    Prepare(#[from] chainboot_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
