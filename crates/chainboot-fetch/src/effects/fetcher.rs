use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::data::{FetchOptions, FetchOutcome, Progress};
use crate::effects::http::{BoxStream, HttpClient};
use crate::error::{Error, Result};
use crate::tracking::PercentTracker;

/// Streams a remote archive to a local file.
pub struct Fetcher<C: HttpClient> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Download `url` into `destination`.
    ///
    /// Any stale file at `destination` is removed first and missing parent
    /// directories are created. `on_progress` is called once up front when
    /// the total size is unknown or zero, otherwise each time the whole percentage
    /// changes.
    ///
    /// Cancellation is checked between chunks. A cancelled or failed fetch
    /// leaves the partial file in place; deleting it is the caller's job.
    pub async fn fetch<F>(
        &self,
        url: &str,
        destination: &Path,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<FetchOutcome>
    where
        F: FnMut(&Progress),
    {
        chainboot_fs::remove_if_exists(destination)?;
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        if cancel.is_cancelled() {
            return Ok(FetchOutcome::Cancelled {
                bytes_downloaded: 0,
            });
        }

        tracing::debug!(url, destination = %destination.display(), "connecting");
        let response = self.client.get(url).await.map_err(|e| Error::Request {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let total_bytes = response.content_length;
        tracing::debug!(?total_bytes, "response received");
        let start = Progress {
            bytes_downloaded: 0,
            total_bytes,
        };
        if start.is_indeterminate() {
            on_progress(&start);
        }

        let mut file = File::create(destination).await.map_err(|e| Error::Write {
            path: destination.to_path_buf(),
            source: e,
        })?;

        let streamed = self
            .stream_to_file(
                response.body,
                &mut file,
                destination,
                total_bytes,
                cancel,
                &mut on_progress,
            )
            .await;

        match streamed {
            Ok(FetchOutcome::Completed { bytes_downloaded }) => {
                finish(&mut file).await.map_err(|e| Error::Write {
                    path: destination.to_path_buf(),
                    source: e,
                })?;
                tracing::debug!(bytes_downloaded, "download complete");
                Ok(FetchOutcome::Completed { bytes_downloaded })
            }
            other => {
                if let Err(e) = file.flush().await {
                    tracing::debug!(error = %e, "failed to flush partial download");
                }
                other
            }
        }
    }

    async fn stream_to_file<E, F>(
        &self,
        mut body: BoxStream<'static, std::result::Result<bytes::Bytes, E>>,
        file: &mut File,
        destination: &Path,
        total_bytes: Option<u64>,
        cancel: &CancellationToken,
        on_progress: &mut F,
    ) -> Result<FetchOutcome>
    where
        E: std::error::Error + Send + Sync + 'static,
        F: FnMut(&Progress),
    {
        let chunk_size = self.options.effective_chunk_size();
        let mut tracker = PercentTracker::new(total_bytes);
        let mut bytes_downloaded = 0u64;

        loop {
            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Ok(FetchOutcome::Cancelled { bytes_downloaded });
                }
                frame = body.next() => frame,
            };

            let Some(frame) = frame else {
                return Ok(FetchOutcome::Completed { bytes_downloaded });
            };
            let mut frame = frame.map_err(|e| Error::Body {
                bytes_downloaded,
                source: Box::new(e),
            })?;

            while !frame.is_empty() {
                if cancel.is_cancelled() {
                    tracing::debug!(bytes_downloaded, "download cancelled");
                    return Ok(FetchOutcome::Cancelled { bytes_downloaded });
                }

                let chunk = frame.split_to(chunk_size.min(frame.len()));
                file.write_all(&chunk).await.map_err(|e| Error::Write {
                    path: destination.to_path_buf(),
                    source: e,
                })?;
                bytes_downloaded += chunk.len() as u64;

                if let Some(progress) = tracker.advance(bytes_downloaded) {
                    on_progress(&progress);
                }
            }
        }
    }
}

async fn finish(file: &mut File) -> std::io::Result<()> {
    file.flush().await?;
    file.sync_all().await
}
