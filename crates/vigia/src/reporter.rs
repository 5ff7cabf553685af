//! Suite reporting.
//!
//! The reporter collects per-case results and renders an HTML report for
//! humans plus JUnit XML for CI. In fail-fast mode recording a failure
//! returns an error so the runner stops the suite; in collect-all mode the
//! suite runs to the end and failures pile up in the report.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::result::{VigiaError, VigiaResult};

/// What the runner does after a failed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Run every case and report all failures
    #[default]
    CollectAll,
    /// Stop the suite on the first failure
    FailFast,
}

/// Test result status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test did not run
    Skipped,
}

impl TestStatus {
    /// Check if status is passing.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failing.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Result of one test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResultEntry {
    /// Test name
    pub name: String,
    /// Test status
    pub status: TestStatus,
    /// Wall-clock duration
    pub duration: Duration,
    /// Error message if failed
    pub error: Option<String>,
    /// Failure screenshot, relative to the report directory
    pub screenshot_path: Option<PathBuf>,
    /// When the case finished
    pub timestamp: SystemTime,
}

impl TestResultEntry {
    /// Create a passing result.
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            duration,
            error: None,
            screenshot_path: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            duration,
            error: Some(error.into()),
            screenshot_path: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Create a skipped result.
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            duration: Duration::ZERO,
            error: None,
            screenshot_path: None,
            timestamp: SystemTime::now(),
        }
    }

    /// Attach a saved failure screenshot, path relative to the report dir.
    #[must_use]
    pub fn with_screenshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = Some(path.into());
        self
    }
}

/// Collects results and renders reports.
#[derive(Debug, Default)]
pub struct Reporter {
    results: Vec<TestResultEntry>,
    failure_mode: FailureMode,
    suite_name: String,
}

impl Reporter {
    /// Create a reporter in collect-all mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            suite_name: "Test Suite".to_string(),
            ..Default::default()
        }
    }

    /// Create a reporter that stops the suite on the first failure.
    #[must_use]
    pub fn fail_fast() -> Self {
        Self {
            failure_mode: FailureMode::FailFast,
            suite_name: "Test Suite".to_string(),
            ..Default::default()
        }
    }

    /// Set the suite name shown in reports.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = name.into();
        self
    }

    /// The failure mode in force.
    #[must_use]
    pub const fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Record a result. The result is kept either way.
    ///
    /// # Errors
    ///
    /// In fail-fast mode, returns [`VigiaError::AssertionFailed`] when the
    /// recorded result is a failure, signalling the runner to stop.
    pub fn record(&mut self, result: TestResultEntry) -> VigiaResult<()> {
        let failure = result
            .status
            .is_failed()
            .then(|| (result.name.clone(), result.error.clone().unwrap_or_default()));

        self.results.push(result);

        if self.failure_mode == FailureMode::FailFast {
            if let Some((name, error)) = failure {
                return Err(VigiaError::AssertionFailed {
                    message: format!("stopping suite: '{name}' failed: {error}"),
                });
            }
        }
        Ok(())
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_passed()).count()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.status.is_failed()).count()
    }

    /// Number of skipped cases.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == TestStatus::Skipped)
            .count()
    }

    /// Total recorded cases.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    /// Pass rate from 0.0 to 1.0; an empty suite counts as passing.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 1.0;
        }
        self.passed_count() as f64 / self.results.len() as f64
    }

    /// Whether no case failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Sum of case durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }

    /// Recorded results in execution order.
    #[must_use]
    pub fn results(&self) -> &[TestResultEntry] {
        &self.results
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%)",
            self.suite_name,
            self.passed_count(),
            self.total_count(),
            self.pass_rate() * 100.0
        )
    }

    /// Write the HTML report. Screenshot paths in the entries must be
    /// relative to this file's directory for the embeds to resolve.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Io`] when the file cannot be written.
    pub fn generate_html(&self, output_path: &Path) -> VigiaResult<()> {
        std::fs::write(output_path, self.render_html())?;
        Ok(())
    }

    /// Render the HTML report content.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut html = String::new();

        html.push_str(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Vigia Test Report</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 20px; }
        .summary { background: #f5f5f5; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
        .progress-bar { background: #ddd; height: 20px; border-radius: 10px; overflow: hidden; }
        .passed { background: #4caf50; height: 100%; }
        .test { padding: 10px; margin: 5px 0; border-radius: 4px; }
        .test.pass { background: #e8f5e9; border-left: 4px solid #4caf50; }
        .test.fail { background: #ffebee; border-left: 4px solid #f44336; }
        .test.skip { background: #fff3e0; border-left: 4px solid #ff9800; }
        .error { color: #d32f2f; font-family: monospace; white-space: pre-wrap; }
        .screenshot img { border: 1px solid #ddd; cursor: pointer; margin-top: 8px; }
    </style>
</head>
<body>
"#,
        );

        html.push_str(&format!(
            r#"<div class="summary">
    <h1>{}</h1>
    <h2>Results: {}/{} passed ({:.1}%)</h2>
    <div class="progress-bar">
        <div class="passed" style="width: {:.1}%"></div>
    </div>
    <p>Duration: {:.2}s</p>
</div>
"#,
            self.suite_name,
            self.passed_count(),
            self.total_count(),
            self.pass_rate() * 100.0,
            self.pass_rate() * 100.0,
            self.total_duration().as_secs_f64()
        ));

        html.push_str("<h2>Test Results</h2>\n");
        for result in &self.results {
            let class = match result.status {
                TestStatus::Passed => "pass",
                TestStatus::Failed => "fail",
                TestStatus::Skipped => "skip",
            };

            html.push_str(&format!(
                r#"<div class="test {}">
    <strong>{}</strong> - {:?} ({:.2}ms)
"#,
                class,
                result.name,
                result.status,
                result.duration.as_secs_f64() * 1000.0
            ));

            if let Some(error) = &result.error {
                html.push_str(&format!(r#"    <div class="error">{error}</div>"#));
                html.push('\n');
            }

            if let Some(path) = &result.screenshot_path {
                html.push_str(&format!(
                    r#"    <div class="screenshot"><img src="{}" width="300" height="200" onclick="window.open(this.src)" alt="failure screenshot"></div>"#,
                    path.display()
                ));
                html.push('\n');
            }

            html.push_str("</div>\n");
        }

        html.push_str(
            r"
<footer>
    <p>Generated by Vigia</p>
</footer>
</body>
</html>
",
        );

        html
    }

    /// Write the JUnit XML report for CI integration.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Io`] when the file cannot be written.
    pub fn generate_junit(&self, output_path: &Path) -> VigiaResult<()> {
        std::fs::write(output_path, self.render_junit())?;
        Ok(())
    }

    /// Render the JUnit XML content.
    #[must_use]
    pub fn render_junit(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<testsuite name="{}" tests="{}" failures="{}" skipped="{}" time="{:.3}">"#,
            escape_xml(&self.suite_name),
            self.total_count(),
            self.failed_count(),
            self.skipped_count(),
            self.total_duration().as_secs_f64()
        ));
        xml.push('\n');

        for result in &self.results {
            xml.push_str(&format!(
                r#"  <testcase name="{}" time="{:.3}">"#,
                escape_xml(&result.name),
                result.duration.as_secs_f64()
            ));
            xml.push('\n');

            if let Some(error) = &result.error {
                xml.push_str(&format!(
                    r#"    <failure message="{}">{}</failure>"#,
                    escape_xml(error),
                    escape_xml(error)
                ));
                xml.push('\n');
            }
            if result.status == TestStatus::Skipped {
                xml.push_str("    <skipped/>\n");
            }

            xml.push_str("  </testcase>\n");
        }

        xml.push_str("</testsuite>\n");
        xml
    }
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
