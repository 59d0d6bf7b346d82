//! Bootstrap states and the progress events that describe them.

use std::fmt;

use chainboot_fetch::Progress;
use serde::{Deserialize, Serialize};

/// Where a bootstrap run is. `Finished` and `Error` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BootstrapState {
    Downloading,
    Extracting,
    Finished,
    Error,
}

impl BootstrapState {
    /// Integer encoding used on the broadcast channel.
    pub const fn code(self) -> i32 {
        match self {
            Self::Error => -1,
            Self::Downloading => 1,
            Self::Extracting => 2,
            Self::Finished => 3,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Error),
            1 => Some(Self::Downloading),
            2 => Some(Self::Extracting),
            3 => Some(Self::Finished),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Error)
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downloading => write!(f, "Downloading"),
            Self::Extracting => write!(f, "Extracting"),
            Self::Finished => write!(f, "Finished"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// How long a presentation layer should keep an event on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Replaced by the next event; gone once the run stops.
    Transient,
    /// Outlives the run.
    Persistent,
}

/// One reported transition. Built fresh for every report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    pub state: BootstrapState,
    pub percent: u8,
    pub indeterminate: bool,
    pub message: &'static str,
}

impl ProgressEvent {
    pub const DOWNLOADING: &'static str = "Downloading...";
    pub const EXTRACTING: &'static str = "Extracting...";
    pub const FINISHED: &'static str = "Successfully finished!";
    pub const CANCELED: &'static str = "Canceled...";
    pub const FAILED: &'static str = "Failed...";

    pub fn downloading(progress: &Progress) -> Self {
        Self {
            state: BootstrapState::Downloading,
            percent: progress.percentage().unwrap_or(0),
            indeterminate: progress.is_indeterminate(),
            message: Self::DOWNLOADING,
        }
    }

    pub fn extracting() -> Self {
        Self {
            state: BootstrapState::Extracting,
            percent: 0,
            indeterminate: true,
            message: Self::EXTRACTING,
        }
    }

    pub fn finished() -> Self {
        Self {
            state: BootstrapState::Finished,
            percent: 100,
            indeterminate: false,
            message: Self::FINISHED,
        }
    }

    pub fn canceled() -> Self {
        Self::error(Self::CANCELED)
    }

    pub fn failed() -> Self {
        Self::error(Self::FAILED)
    }

    fn error(message: &'static str) -> Self {
        Self {
            state: BootstrapState::Error,
            percent: 0,
            indeterminate: false,
            message,
        }
    }

    /// Scale of a progress bar showing this event: only downloads have one.
    pub fn max(&self) -> u8 {
        if self.state == BootstrapState::Downloading {
            100
        } else {
            0
        }
    }

    pub fn presentation(&self) -> Presentation {
        if self.state.is_terminal() {
            Presentation::Persistent
        } else {
            Presentation::Transient
        }
    }

    pub fn broadcast(&self) -> BootstrapBroadcast {
        BootstrapBroadcast {
            state: self.state.code(),
            progress: self.percent,
            indeterminate: self.indeterminate,
        }
    }
}

/// The payload sent to external observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapBroadcast {
    pub state: i32,
    pub progress: u8,
    pub indeterminate: bool,
}
