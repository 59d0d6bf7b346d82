/// Download progress handed to the fetch callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of bytes written to the destination file.
    pub bytes_downloaded: u64,

    /// Total expected bytes, if the server sent a Content-Length.
    pub total_bytes: Option<u64>,
}

impl Progress {
    /// Whole percent complete, rounded down and capped at 100.
    ///
    /// Returns `None` when the total is unknown or zero.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        let total = self.total_bytes.filter(|&total| total > 0)?;
        let percent = (self.bytes_downloaded.saturating_mul(100) / total).min(100);
        Some(percent as u8)
    }

    /// `true` when no meaningful percentage can be shown.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        self.percentage().is_none()
    }
}

/// How a fetch that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The whole body was written and flushed.
    Completed { bytes_downloaded: u64 },

    /// The cancellation token fired; the partial file is left on disk.
    Cancelled { bytes_downloaded: u64 },
}

impl FetchOutcome {
    pub fn bytes_downloaded(&self) -> u64 {
        match *self {
            Self::Completed { bytes_downloaded } | Self::Cancelled { bytes_downloaded } => {
                bytes_downloaded
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
