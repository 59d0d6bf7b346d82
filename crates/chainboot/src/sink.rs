//! Where progress events go.

use std::sync::Arc;

use crate::broadcast::EventSender;
use crate::state::{BootstrapBroadcast, BootstrapState, ProgressEvent};

/// Receives every [`ProgressEvent`] of a run.
///
/// Called synchronously from the download and extraction path, so
/// implementations must return quickly.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

impl ProgressSink for EventSender<BootstrapBroadcast> {
    fn on_progress(&self, event: &ProgressEvent) {
        self.notify(event.broadcast());
    }
}

/// Fans an event out to every registered sink, logging it on the way.
#[derive(Clone, Default)]
pub struct Reporter {
    sinks: Vec<Arc<dyn ProgressSink>>,
}

impl Reporter {
    pub fn add(&mut self, sink: Arc<dyn ProgressSink>) {
        self.sinks.push(sink);
    }

    pub fn report(&self, event: &ProgressEvent) {
        match event.state {
            BootstrapState::Downloading => tracing::debug!(
                percent = event.percent,
                indeterminate = event.indeterminate,
                "download progress"
            ),
            state => tracing::info!(%state, message = event.message, "bootstrap state changed"),
        }
        for sink in &self.sinks {
            sink.on_progress(event);
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
