use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::trace;

const DEFAULT_SIZE_BROADCAST_CHANNEL: usize = 256;

/// A bounded broadcast channel for bootstrap events.
///
/// Sending never blocks; slow listeners lag and skip events rather than
/// stall the run.
#[derive(Debug, Clone)]
pub struct EventSender<T> {
    sender: Sender<T>,
}

impl<T> Default for EventSender<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_SIZE_BROADCAST_CHANNEL)
    }
}

impl<T: Clone + Send + Sync + 'static> EventSender<T> {
    pub fn new(events_channel_size: usize) -> Self {
        let (sender, _) = broadcast::channel(events_channel_size);
        Self { sender }
    }

    /// Broadcasts an event to all listeners.
    pub fn notify(&self, event: T) {
        if self.sender.send(event).is_err() {
            trace!("no receivers for bootstrap events");
        }
    }

    pub fn subscribe(&self) -> Receiver<T> {
        self.sender.subscribe()
    }
}
