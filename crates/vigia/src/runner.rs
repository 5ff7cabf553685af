//! Suite execution.
//!
//! The runner walks registered cases sequentially. Every case gets a fresh
//! session from the fixture, a failing case gets a screenshot before its
//! session closes, and the suite ends by writing the HTML and JUnit
//! reports. In fail-fast mode the first failure stops the suite and the
//! remaining cases are recorded as skipped.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::actions::CommonActions;
use crate::artifacts::{save_failure_screenshot, SCREENSHOT_DIR};
use crate::config::AppData;
use crate::data::DataTable;
use crate::driver::{Session, UiDriver};
use crate::fixture::{DriverProvider, SessionFixture};
use crate::reporter::{FailureMode, Reporter, TestResultEntry};
use crate::result::{VigiaError, VigiaResult};

/// Everything a case needs besides its session: the application
/// coordinates from config and the loaded test-data sheet.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    /// URL and credentials from `[AppData]`
    pub app: AppData,
    /// The keyed test-data sheet
    pub data: DataTable,
}

type CaseFuture = Pin<Box<dyn Future<Output = VigiaResult<()>> + Send>>;
type CaseFn<D> = Box<dyn Fn(CommonActions<D>, Arc<SuiteContext>) -> CaseFuture + Send + Sync>;
type Observer = Box<dyn Fn(&TestResultEntry) + Send + Sync>;

/// A named, registered test case.
pub struct TestCase<D: UiDriver> {
    name: String,
    run: CaseFn<D>,
}

impl<D: UiDriver> std::fmt::Debug for TestCase<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

impl<D: UiDriver> TestCase<D> {
    /// Wrap an async case body under a name.
    pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(CommonActions<D>, Arc<SuiteContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = VigiaResult<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(move |actions, context| Box::pin(body(actions, context))),
        }
    }

    /// The case name, used in reports and screenshot files.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Final tallies of one suite run.
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Per-case results in execution order
    pub entries: Vec<TestResultEntry>,
    /// Passed count
    pub passed: usize,
    /// Failed count
    pub failed: usize,
    /// Skipped count
    pub skipped: usize,
    /// Path of the written HTML report
    pub html_report: PathBuf,
    /// Path of the written JUnit report
    pub junit_report: PathBuf,
}

impl SuiteResults {
    /// Whether no case failed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Total recorded cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

/// Runs registered cases against fixture-provided sessions.
pub struct SuiteRunner<P: DriverProvider> {
    fixture: SessionFixture<P>,
    context: Arc<SuiteContext>,
    cases: Vec<TestCase<P::Driver>>,
    output_dir: PathBuf,
    failure_mode: FailureMode,
    suite_name: String,
    observer: Option<Observer>,
}

impl<P: DriverProvider> std::fmt::Debug for SuiteRunner<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteRunner")
            .field("suite_name", &self.suite_name)
            .field("cases", &self.cases.len())
            .field("output_dir", &self.output_dir)
            .field("failure_mode", &self.failure_mode)
            .finish()
    }
}

impl<P: DriverProvider> SuiteRunner<P> {
    /// Create a runner over a fixture and suite context.
    #[must_use]
    pub fn new(fixture: SessionFixture<P>, context: SuiteContext) -> Self {
        Self {
            fixture,
            context: Arc::new(context),
            cases: Vec::new(),
            output_dir: PathBuf::from("target/vigia"),
            failure_mode: FailureMode::default(),
            suite_name: "vtiger UI Suite".to_string(),
            observer: None,
        }
    }

    /// Set the directory receiving reports and screenshots.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the failure mode.
    #[must_use]
    pub const fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Set the suite name used in reports.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = name.into();
        self
    }

    /// Install a callback invoked after each case completes.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&TestResultEntry) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Register one case.
    pub fn register(&mut self, case: TestCase<P::Driver>) {
        self.cases.push(case);
    }

    /// Register many cases.
    pub fn register_all(&mut self, cases: Vec<TestCase<P::Driver>>) {
        self.cases.extend(cases);
    }

    /// Names of registered cases, in execution order.
    #[must_use]
    pub fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::name).collect()
    }

    /// Run the whole suite and write the reports.
    ///
    /// A suite with failing cases still returns `Ok`; inspect
    /// [`SuiteResults::all_passed`]. Errors are reserved for the runner's
    /// own plumbing, like an unwritable output directory.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Io`] when the output directory or a report
    /// cannot be written.
    pub async fn run(&self) -> VigiaResult<SuiteResults> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut reporter = match self.failure_mode {
            FailureMode::FailFast => Reporter::fail_fast(),
            FailureMode::CollectAll => Reporter::new(),
        }
        .with_name(self.suite_name.clone());

        info!(suite = %self.suite_name, cases = self.cases.len(), "suite starting");

        let mut stopped_at = None;
        for (idx, case) in self.cases.iter().enumerate() {
            info!(case = %case.name, "case starting");
            let started = Instant::now();
            let outcome = self.run_case(case).await;
            let duration = started.elapsed();

            let entry = match outcome {
                Ok(()) => TestResultEntry::passed(case.name.clone(), duration),
                Err((err, screenshot)) => {
                    error!(case = %case.name, error = %err, "case failed");
                    let entry =
                        TestResultEntry::failed(case.name.clone(), duration, err.to_string());
                    match screenshot {
                        Some(path) => entry.with_screenshot_path(path),
                        None => entry,
                    }
                }
            };

            if let Some(observer) = &self.observer {
                observer(&entry);
            }

            if reporter.record(entry).is_err() {
                stopped_at = Some(idx);
                break;
            }
        }

        if let Some(idx) = stopped_at {
            warn!("fail-fast: skipping remaining cases");
            for case in &self.cases[idx + 1..] {
                let entry = TestResultEntry::skipped(case.name.clone());
                if let Some(observer) = &self.observer {
                    observer(&entry);
                }
                reporter.record(entry)?;
            }
        }

        let html_report = self.output_dir.join("report.html");
        let junit_report = self.output_dir.join("junit.xml");
        reporter.generate_html(&html_report)?;
        reporter.generate_junit(&junit_report)?;
        info!(summary = %reporter.summary(), "suite finished");

        Ok(SuiteResults {
            entries: reporter.results().to_vec(),
            passed: reporter.passed_count(),
            failed: reporter.failed_count(),
            skipped: reporter.skipped_count(),
            html_report,
            junit_report,
        })
    }

    /// Run one case in a fresh session; on failure, capture a screenshot
    /// before teardown and return its report-relative path.
    async fn run_case(
        &self,
        case: &TestCase<P::Driver>,
    ) -> Result<(), (VigiaError, Option<PathBuf>)> {
        let session = match self.fixture.setup().await {
            Ok(session) => session,
            Err(err) => return Err((err, None)),
        };

        let actions =
            CommonActions::with_options(session.clone(), self.fixture.wait_options().clone());
        let body = (case.run)(actions, Arc::clone(&self.context)).await;

        let outcome = match body {
            Ok(()) => Ok(()),
            Err(err) => {
                let screenshot = self.capture_failure(&session, &case.name).await;
                Err((err, screenshot))
            }
        };

        match self.fixture.teardown(&session).await {
            Ok(()) => outcome,
            // A teardown failure only surfaces when the body passed.
            Err(err) => outcome.and(Err((err, None))),
        }
    }

    async fn capture_failure(
        &self,
        session: &Session<P::Driver>,
        case_name: &str,
    ) -> Option<PathBuf> {
        let shot = match session.screenshot().await {
            Ok(shot) => shot,
            Err(err) => {
                warn!(case = %case_name, error = %err, "failure screenshot capture failed");
                return None;
            }
        };
        match save_failure_screenshot(&self.output_dir, case_name, &shot) {
            Ok(path) => path
                .file_name()
                .map(|name| Path::new(SCREENSHOT_DIR).join(name)),
            Err(err) => {
                warn!(case = %case_name, error = %err, "failure screenshot write failed");
                None
            }
        }
    }
}
