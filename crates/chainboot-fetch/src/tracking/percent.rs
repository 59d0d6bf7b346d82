use crate::data::Progress;

/// De-duplicates progress so observers only hear about whole-percent changes.
#[derive(Debug, Clone)]
pub struct PercentTracker {
    total_bytes: Option<u64>,
    last_reported: Option<u8>,
}

impl PercentTracker {
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            last_reported: None,
        }
    }

    /// Records `bytes_downloaded` and returns the progress to report, if the
    /// whole percentage moved since the last report.
    ///
    /// With an unknown or zero total nothing is ever returned; the caller reports a
    /// single indeterminate progress up front instead.
    pub fn advance(&mut self, bytes_downloaded: u64) -> Option<Progress> {
        let progress = Progress {
            bytes_downloaded,
            total_bytes: self.total_bytes,
        };
        let percent = progress.percentage()?;
        if self.last_reported == Some(percent) {
            return None;
        }
        self.last_reported = Some(percent);
        Some(progress)
    }
}
