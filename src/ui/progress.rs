//! Progress reporting

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress reporter for the upload queue
pub struct ProgressReporter {
    upload_bar: ProgressBar,
    started_at: Option<Instant>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Reporter that draws nothing; used when stderr is not a terminal.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(upload_bar: ProgressBar) -> Self {
        if let Ok(style) =
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            upload_bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            upload_bar,
            started_at: None,
        }
    }

    /// Initialize the upload phase.
    pub fn start(&mut self, total_uploads: u64) {
        self.started_at = Some(Instant::now());
        self.upload_bar.set_length(total_uploads);
        self.upload_bar.set_position(0);
        self.upload_bar.set_message("Starting deploy...".to_string());
    }

    /// Update the current key indicator.
    pub fn set_current(&self, key: &str) {
        self.upload_bar.set_message(format!("Copy {}", key));
    }

    /// Mark one upload complete.
    pub fn complete_upload(&self) {
        self.upload_bar.inc(1);
    }

    /// Surface the failed upload above the bar.
    pub fn upload_error(&self, key: &str, err: &str) {
        self.upload_bar.abandon_with_message(format!("ERROR {}: {}", key, err));
    }

    /// Finalize the upload phase.
    pub fn finish(&self, completed: usize) {
        let elapsed = self
            .started_at
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or_default();
        self.upload_bar.finish_with_message(format!(
            "Deploy complete: {} file(s) in {:.1}s",
            completed, elapsed
        ));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
