//! In-memory [`HttpClient`] for tests.

use bytes::Bytes;

use crate::effects::{HttpClient, Response};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StaticClientError(pub String);

/// Serves a fixed payload, optionally split into frames, without touching
/// the network.
#[derive(Debug, Clone)]
pub struct StaticClient {
    payload: Bytes,
    frame_size: usize,
    advertise_length: bool,
    fail_after_frames: Option<usize>,
    refuse: bool,
}

impl StaticClient {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            frame_size: usize::MAX,
            advertise_length: true,
            fail_after_frames: None,
            refuse: false,
        }
    }

    /// A client whose every request fails before any body is produced.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new(Bytes::new())
        }
    }

    /// Deliver the payload in frames of at most `frame_size` bytes.
    pub fn frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size.max(1);
        self
    }

    /// Omit the Content-Length, as a chunked response would.
    pub fn without_content_length(mut self) -> Self {
        self.advertise_length = false;
        self
    }

    /// Yield an error in place of frame number `frames` (zero-based).
    pub fn fail_after_frames(mut self, frames: usize) -> Self {
        self.fail_after_frames = Some(frames);
        self
    }

    fn frames(&self) -> Vec<Result<Bytes, StaticClientError>> {
        let mut frames: Vec<_> = self
            .payload
            .chunks(self.frame_size)
            .map(|frame| Ok(Bytes::copy_from_slice(frame)))
            .collect();
        if let Some(limit) = self.fail_after_frames {
            frames.truncate(limit);
            frames.push(Err(StaticClientError("connection reset".into())));
        }
        frames
    }
}

impl HttpClient for StaticClient {
    type Error = StaticClientError;

    async fn get(&self, url: &str) -> Result<Response<Self::Error>, Self::Error> {
        if self.refuse {
            return Err(StaticClientError(format!("connection refused: {url}")));
        }
        let content_length = self.advertise_length.then_some(self.payload.len() as u64);
        Ok(Response {
            content_length,
            body: Box::pin(futures_util::stream::iter(self.frames())),
        })
    }
}
