use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to delete {path}: path still exists")]
    StillPresent { path: PathBuf },

    #[error("managed path '{name}' must be a single relative component")]
    InvalidManagedPath { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
