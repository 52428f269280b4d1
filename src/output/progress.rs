//! Progress reporting functionality
//!
//! A spinner on stderr shows which project is being resolved. Resolution of a
//! single module can take a while because the go tool downloads module
//! metadata, so a bar with an ETA would be misleading.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the scan
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    verbose: bool,
}

impl ProgressReporter {
    /// Create a reporter, which stays silent when `enabled` is false
    pub fn new(enabled: bool, verbose: bool) -> Self {
        let spinner = enabled.then(|| {
            let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner
        });

        Self { spinner, verbose }
    }

    /// Start spinning with an initial message
    pub fn start(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(message.to_string());
            spinner.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Show the project currently being processed
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("[{}/{}] {}", current, total, message));
        }
        if self.verbose {
            tracing::debug!("[{}/{}] {}", current, total, message);
        }
    }

    /// Stop the spinner and leave a final message
    pub fn finish(&self, message: &str) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_with_message(message.to_string());
        }
    }

    /// Stop the spinner and remove it from the terminal
    pub fn clear(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.spinner.is_some()
    }
}

/// Create a progress callback that updates a ProgressReporter
pub fn create_progress_callback(reporter: &ProgressReporter) -> impl Fn(usize, usize, &str) + '_ {
    move |current, total, message| reporter.update(current, total, message)
}
