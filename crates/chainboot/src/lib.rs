//! Bootstrap a node's chain data store from a pre-synced archive.
//!
//! A run downloads the archive ([`chainboot_fetch`]), clears the managed
//! store paths ([`chainboot_fs`]), extracts the archive into the destination
//! root ([`chainboot_archive`]) and reports each step as a
//! [`ProgressEvent`].
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use chainboot::{Bootstrap, BootstrapConfig, ProgressEvent};
//! use chainboot_fetch::ReqwestClient;
//!
//! let config = BootstrapConfig::default();
//! let handle = Bootstrap::new(ReqwestClient::new()?, &config)
//!     .with_sink(|event: &ProgressEvent| println!("{}: {}", event.state, event.message))
//!     .spawn();
//! let state = handle.wait().await;
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

mod broadcast;
mod config;
mod error;
mod orchestrator;
mod service;
mod sink;
mod state;
pub mod ui;

pub use broadcast::EventSender;
pub use config::{BootstrapConfig, DEFAULT_ARCHIVE_FILE_NAME, DEFAULT_SOURCE_URL};
pub use error::{BootstrapError, ConfigError};
pub use orchestrator::{Bootstrap, replace_store};
pub use service::BootstrapHandle;
pub use sink::{ProgressSink, Reporter};
pub use state::{BootstrapBroadcast, BootstrapState, Presentation, ProgressEvent};
