use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

use crate::sink::ProgressSink;
use crate::state::{BootstrapState, Presentation, ProgressEvent};

const PB_STYLE: &str =
    "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos:>3}% {wide_msg}";

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Terminal presentation of a run: a percent bar while the download size is
/// known, a spinner otherwise, and a final line that stays on screen.
#[derive(Clone)]
pub struct ProgressBarSink {
    pb: ProgressBar,
}

impl Default for ProgressBarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarSink {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(100))
    }

    /// Use an existing bar, e.g. a hidden one in tests.
    pub fn with_bar(pb: ProgressBar) -> Self {
        pb.set_prefix("Bootstrap");
        Self { pb }
    }

    fn show_bar(&self, percent: u8) {
        if let Some(style) = PB_TEMPLATE.as_ref() {
            self.pb.set_style(style.clone());
        }
        self.pb.disable_steady_tick();
        self.pb.set_length(100);
        self.pb.set_position(u64::from(percent));
    }

    fn show_spinner(&self) {
        if let Some(style) = SPINNER_TEMPLATE.as_ref() {
            self.pb.set_style(style.clone());
        }
        self.pb.enable_steady_tick(Duration::from_millis(120));
    }
}

impl ProgressSink for ProgressBarSink {
    fn on_progress(&self, event: &ProgressEvent) {
        if event.presentation() == Presentation::Persistent {
            self.pb.disable_steady_tick();
            match event.state {
                BootstrapState::Finished => self.pb.finish_with_message(event.message),
                _ => self.pb.abandon_with_message(event.message),
            }
            return;
        }

        self.pb.set_prefix(event.state.to_string());
        self.pb.set_message(event.message);
        if event.indeterminate || event.max() == 0 {
            self.show_spinner();
        } else {
            self.show_bar(event.percent);
        }
    }
}
