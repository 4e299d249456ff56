//! Spinner feedback while directories are being listed
//!
//! The spinner is drawn on stderr and only when it is a terminal, so piped
//! output stays clean.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Live crawl progress
pub struct CrawlSpinner {
    bar: ProgressBar,
}

impl CrawlSpinner {
    /// Start a spinner; `hidden` suppresses all drawing
    pub fn start(message: impl Into<String>, hidden: bool) -> Self {
        let bar = if hidden || !atty::is(atty::Stream::Stderr) {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new_spinner()
        };

        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style.tick_strings(&["◐", "◓", "◑", "◒"]));
        }
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar }
    }

    pub fn update(&self, found: usize) {
        self.bar.set_message(format!("Listing directories... {} files found", found));
    }

    /// Print a line without tearing the spinner
    pub fn println(&self, line: impl AsRef<str>) {
        if self.bar.is_hidden() {
            println!("{}", line.as_ref());
        } else {
            self.bar.suspend(|| println!("{}", line.as_ref()));
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner() {
        let spinner = CrawlSpinner::start("Listing", true);
        assert!(spinner.is_hidden());
        spinner.update(3);
        spinner.finish();
    }
}
