//! Spinner shown while a release query is in flight
//!
//! indicatif draws to stderr and hides itself when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner frames, one braille cell per tick
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Progress reporter for the update workflow
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Show a spinner with a message for an indeterminate operation
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let style = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Whether the current spinner is actually drawn
    ///
    /// False when no spinner is active or when indicatif hides it because
    /// stderr is not a terminal.
    pub fn is_visible(&self) -> bool {
        self.bar.as_ref().is_some_and(|bar| !bar.is_hidden())
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(true)
    }
}
