use std::path::PathBuf;

use thiserror::Error;

/// Why a phase of a bootstrap run failed. Never escapes the orchestrator;
/// it is logged and turned into a terminal `Error` event.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("download failed: {0}")]
    Fetch(#[from] chainboot_fetch::Error),

    #[error("failed to clear chain data: {0}")]
    Store(#[from] chainboot_fs::Error),

    #[error("failed to extract archive: {0}")]
    Extract(#[from] chainboot_archive::Error),

    #[error("extraction task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
