//! Spinner shown while the provider call is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Indeterminate spinner for the single latency-bearing step of a turn
pub struct WaitSpinner {
    bar: ProgressBar,
}

impl WaitSpinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    /// Stop the spinner and clear its line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
