use std::time::Duration;

/// Bytes written between progress and cancellation checks.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Configuration for a [`Fetcher`](crate::Fetcher).
///
/// # Examples
///
/// ```
/// use chainboot_fetch::FetchOptions;
///
/// let options = FetchOptions::default().chunk_size(64 * 1024);
/// assert_eq!(options.chunk_size, 64 * 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Size of the pieces the response body is written in.
    ///
    /// Network frames larger than this are split, so progress reporting
    /// and cancellation happen at this granularity. Zero is treated as one.
    ///
    /// Default: 1024
    pub chunk_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FetchOptions {
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

/// Network timeouts applied by the HTTP client. `None` waits forever.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub read: Option<Duration>,
}

impl Timeouts {
    pub fn connect(mut self, timeout: Duration) -> Self {
        self.connect = Some(timeout);
        self
    }

    pub fn read(mut self, timeout: Duration) -> Self {
        self.read = Some(timeout);
        self
    }
}
