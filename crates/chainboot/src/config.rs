//! Run configuration, loaded from TOML.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use chainboot_fetch::{FetchOptions, Timeouts};
use chainboot_fs::{ManagedPath, default_managed_paths};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SOURCE_URL: &str =
    "https://download.spectreproject.io/files/bootstrap/BootstrapChain.zip";
pub const DEFAULT_ARCHIVE_FILE_NAME: &str = "BootstrapChain.zip";
const DEFAULT_DATA_DIR: &str = ".spectrecoin";

/// Everything a bootstrap run needs to know. Missing keys in a config file
/// fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub source_url: String,
    pub destination_root: PathBuf,
    /// Name of the temporary download, created inside `destination_root`.
    pub archive_file_name: String,
    pub chunk_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
    pub managed_paths: Vec<ManagedPath>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        let home = home::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            destination_root: home.join(DEFAULT_DATA_DIR),
            archive_file_name: DEFAULT_ARCHIVE_FILE_NAME.to_string(),
            chunk_size: FetchOptions::default().chunk_size,
            connect_timeout_secs: None,
            read_timeout_secs: None,
            managed_paths: default_managed_paths(),
        }
    }
}

impl BootstrapConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_destination_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.destination_root = root.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_url.trim().is_empty() {
            return Err(ConfigError::Invalid("source_url is empty".into()));
        }
        if !is_single_component(&self.archive_file_name) {
            return Err(ConfigError::Invalid(format!(
                "archive_file_name '{}' must be a plain file name",
                self.archive_file_name
            )));
        }
        for managed in &self.managed_paths {
            managed
                .resolve(&self.destination_root)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if managed.name == self.archive_file_name {
                return Err(ConfigError::Invalid(format!(
                    "archive_file_name '{}' collides with a managed path",
                    self.archive_file_name
                )));
            }
        }
        Ok(())
    }

    pub fn archive_path(&self) -> PathBuf {
        self.destination_root.join(&self.archive_file_name)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default().chunk_size(self.chunk_size)
    }

    pub fn timeouts(&self) -> Timeouts {
        let mut timeouts = Timeouts::default();
        if let Some(secs) = self.connect_timeout_secs {
            timeouts = timeouts.connect(Duration::from_secs(secs));
        }
        if let Some(secs) = self.read_timeout_secs {
            timeouts = timeouts.read(Duration::from_secs(secs));
        }
        timeouts
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
