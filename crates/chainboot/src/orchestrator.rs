//! Fetch, replace, extract: one bootstrap run from start to terminal state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chainboot_archive::ExtractReport;
use chainboot_fetch::{FetchOutcome, Fetcher, HttpClient, Progress};
use chainboot_fs::{ManagedPath, ScratchFile};
use tokio_util::sync::CancellationToken;

use crate::broadcast::EventSender;
use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use crate::sink::{ProgressSink, Reporter};
use crate::state::{BootstrapBroadcast, BootstrapState, ProgressEvent};

/// Drives a single bootstrap run.
///
/// ```text
/// Downloading ──► Extracting ──► Finished
///      │               │
///      └──────► Error ◄┘
/// ```
///
/// Every transition is reported before the next phase starts. The
/// temporary archive is removed on every exit path.
pub struct Bootstrap<C: HttpClient> {
    fetcher: Fetcher<C>,
    source_url: String,
    destination_root: PathBuf,
    archive_path: PathBuf,
    managed_paths: Vec<ManagedPath>,
    reporter: Reporter,
}

impl<C: HttpClient> Bootstrap<C> {
    pub fn new(client: C, config: &BootstrapConfig) -> Self {
        Self {
            fetcher: Fetcher::new(client).with_options(config.fetch_options()),
            source_url: config.source_url.clone(),
            destination_root: config.destination_root.clone(),
            archive_path: config.archive_path(),
            managed_paths: config.managed_paths.clone(),
            reporter: Reporter::default(),
        }
    }

    pub fn with_sink(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.reporter.add(Arc::new(sink));
        self
    }

    pub fn with_broadcast(self, sender: EventSender<BootstrapBroadcast>) -> Self {
        self.with_sink(sender)
    }

    /// Run to a terminal state. Failures are reported, never returned.
    pub async fn run(&self, cancel: CancellationToken) -> BootstrapState {
        let archive = match ScratchFile::prepare(&self.archive_path) {
            Ok(archive) => archive,
            Err(e) => {
                tracing::error!(error = %e, "cannot prepare archive location");
                self.reporter.report(&ProgressEvent::failed());
                return BootstrapState::Error;
            }
        };

        let state = self.run_phases(archive.path(), &cancel).await;
        drop(archive);
        state
    }

    async fn run_phases(&self, archive: &Path, cancel: &CancellationToken) -> BootstrapState {
        match self.download(archive, cancel).await {
            Ok(FetchOutcome::Completed { bytes_downloaded }) => {
                tracing::info!(bytes_downloaded, "bootstrap archive downloaded");
            }
            Ok(FetchOutcome::Cancelled { bytes_downloaded }) => {
                tracing::info!(bytes_downloaded, "bootstrap download canceled");
                self.reporter.report(&ProgressEvent::canceled());
                return BootstrapState::Error;
            }
            Err(e) => {
                tracing::error!(error = %e, url = %self.source_url, "bootstrap download failed");
                self.reporter.report(&ProgressEvent::failed());
                return BootstrapState::Error;
            }
        }

        self.reporter.report(&ProgressEvent::extracting());
        match self.install(archive).await {
            Ok(report) => {
                tracing::info!(
                    entries = report.entry_count,
                    bytes = report.total_bytes,
                    root = %self.destination_root.display(),
                    "chain data replaced"
                );
                self.reporter.report(&ProgressEvent::finished());
                BootstrapState::Finished
            }
            Err(e) => {
                tracing::error!(error = %e, "bootstrap extraction failed");
                self.reporter.report(&ProgressEvent::failed());
                BootstrapState::Error
            }
        }
    }

    async fn download(
        &self,
        archive: &Path,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, BootstrapError> {
        let reporter = &self.reporter;
        let outcome = self
            .fetcher
            .fetch(&self.source_url, archive, cancel, |progress: &Progress| {
                reporter.report(&ProgressEvent::downloading(progress))
            })
            .await?;
        Ok(outcome)
    }

    async fn install(&self, archive: &Path) -> Result<ExtractReport, BootstrapError> {
        let archive = archive.to_path_buf();
        let root = self.destination_root.clone();
        let managed = self.managed_paths.clone();
        tokio::task::spawn_blocking(move || replace_store(&archive, &root, &managed)).await?
    }
}

/// Clear the managed paths under `root` and extract `archive` into it.
///
/// On failure the managed paths are cleared again so no half-written store
/// is left behind. A failing rollback is logged; the original error wins.
pub fn replace_store(
    archive: &Path,
    root: &Path,
    managed: &[ManagedPath],
) -> Result<ExtractReport, BootstrapError> {
    let result = chainboot_fs::clear_store(root, managed)
        .map_err(BootstrapError::from)
        .and_then(|()| {
            chainboot_archive::extract_archive(archive, root).map_err(BootstrapError::from)
        });

    if let Err(e) = &result {
        tracing::debug!(error = %e, "rolling back partially replaced chain data");
        if let Err(rollback) = chainboot_fs::clear_store(root, managed) {
            tracing::warn!(error = %rollback, "rollback after failed extraction did not complete");
        }
    }
    result
}
