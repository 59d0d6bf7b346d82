//! Running a bootstrap in the background.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use chainboot_fetch::HttpClient;

use crate::orchestrator::Bootstrap;
use crate::state::BootstrapState;

impl<C: HttpClient + 'static> Bootstrap<C> {
    /// Start the run on the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn spawn(self) -> BootstrapHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(async move { self.run(token).await });
        BootstrapHandle { cancel, task }
    }
}

/// Host-side view of a running bootstrap.
///
/// Dropping the handle detaches from the run without stopping it.
#[derive(Debug)]
pub struct BootstrapHandle {
    cancel: CancellationToken,
    task: JoinHandle<BootstrapState>,
}

impl BootstrapHandle {
    /// Ask the run to stop. Only honoured while downloading; extraction
    /// runs to completion once started.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the terminal state.
    pub async fn wait(self) -> BootstrapState {
        match self.task.await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "bootstrap task aborted");
                BootstrapState::Error
            }
        }
    }
}
