//! Scan progress display.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A single spinner line naming the archive currently being audited.
pub(crate) struct ScanSpinner {
    pb: ProgressBar,
}

impl ScanSpinner {
    /// Create the spinner. When `hidden` is true (quiet mode or JSON to
    /// stdout) nothing is drawn.
    pub(crate) fn new(hidden: bool) -> Self {
        let pb = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub(crate) fn set_current(&self, path: &Path) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
        self.pb.set_message(format!("auditing {name}"));
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
