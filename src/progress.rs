//! Progress display for package downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Snapshot of download progress, emitted repeatedly during one transfer.
/// Percent values are monotonically non-decreasing; the final event is 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub percent: u8,
}

/// Percent bar for a single package download
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    pub fn new() -> Self {
        let style = ProgressStyle::default_bar()
            .template("  |- Downloading package... {msg:>4}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let bar = ProgressBar::new(100);
        bar.set_style(style);
        bar.set_message("0");

        Self { bar }
    }

    pub fn update(&self, event: ProgressEvent) {
        self.bar.set_position(u64::from(event.percent));
        self.bar.set_message(event.percent.to_string());
    }

    /// Clear the live bar and leave a plain final line in its place
    pub fn finish(self) {
        self.bar.finish_and_clear();
        println!("  |- Downloading package...   100%");
    }

    /// Clear the live bar after a failed transfer
    pub fn abandon(self) {
        self.bar.finish_and_clear();
    }
}

impl Default for DownloadProgress {
    fn default() -> Self {
        Self::new()
    }
}
