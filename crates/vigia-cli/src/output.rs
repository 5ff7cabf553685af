//! Output formatting and progress reporting

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for suite execution
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar for multiple cases
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a passed-case line
    pub fn case_passed(&self, name: &str, duration: Duration) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        self.write_line(&format!("{prefix} {name} ({duration:.2?})"));
    }

    /// Print a failed-case line
    pub fn case_failed(&self, name: &str, error: &str) {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        self.write_line(&format!("{prefix} {name}: {error}"));
    }

    /// Print a skipped-case line
    pub fn case_skipped(&self, name: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("-").yellow().to_string()
        } else {
            "SKIP".to_string()
        };
        self.write_line(&format!("{prefix} {name} (skipped)"));
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write_line(message);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        let text = if self.use_color {
            style(message).red().to_string()
        } else {
            message.to_string()
        };
        self.write_line(&text);
    }

    /// Write above the progress bar when one is running
    fn write_line(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.println(line),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter_has_no_bar() {
            let reporter = ProgressReporter::new(false, false);
            assert!(reporter.progress_bar.is_none());
            assert!(!reporter.use_color);
        }

        #[test]
        fn test_quiet_mode_skips_progress() {
            let mut reporter = ProgressReporter::new(false, true);
            reporter.start_progress(5, "running");
            assert!(reporter.progress_bar.is_none());
        }

        #[test]
        fn test_start_progress_creates_bar() {
            let mut reporter = ProgressReporter::new(false, false);
            reporter.start_progress(5, "running");
            assert!(reporter.progress_bar.is_some());
            reporter.increment(2);
            reporter.finish();
        }

        #[test]
        fn test_case_lines_do_not_panic_without_bar() {
            let reporter = ProgressReporter::new(false, false);
            reporter.case_passed("test_ok", Duration::from_millis(12));
            reporter.case_failed("test_bad", "home link missing");
            reporter.case_skipped("test_rest");
            reporter.info("done");
            reporter.error("broken");
        }
    }
}
