//! The `run` subcommand: execute the CRM suite against a live browser.

use std::sync::Arc;

use vigia::{
    all_cases, AppData, DataTable, FailureMode, IniConfig, SuiteResults, TestCase, TestStatus,
    UiDriver,
};

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;

/// Load configuration and test data, then run the suite.
///
/// # Errors
///
/// Returns a configuration or data error before any browser is launched,
/// and a suite-execution error when cases fail.
pub fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let ini = IniConfig::load(&args.config)?;
    let app = ini.app_data()?;
    let data = DataTable::load_sheet(&args.data_dir, &args.sheet)?;
    run_suite(config, args, app, data)
}

/// Drop cases whose name does not contain the filter pattern.
fn retain_matching<D: UiDriver + 'static>(cases: &mut Vec<TestCase<D>>, filter: Option<&str>) {
    if let Some(pattern) = filter {
        cases.retain(|case| case.name().contains(pattern));
    }
}

const fn failure_mode(fail_fast: bool) -> FailureMode {
    if fail_fast {
        FailureMode::FailFast
    } else {
        FailureMode::CollectAll
    }
}

fn summary_line(results: &SuiteResults) -> String {
    format!(
        "{} cases: {} passed, {} failed, {} skipped",
        results.total(),
        results.passed,
        results.failed,
        results.skipped
    )
}

#[cfg(feature = "browser")]
fn run_suite(
    config: &CliConfig,
    args: &RunArgs,
    app: AppData,
    data: DataTable,
) -> CliResult<()> {
    use vigia::{
        BrowserKind, CdpProvider, DriverConfig, SessionFixture, SuiteContext, SuiteRunner,
        WaitOptions,
    };

    let kind = BrowserKind::from(args.browser);
    let driver_config = DriverConfig::new().headless(!args.headed);
    let provider = CdpProvider::new(kind, driver_config);
    let wait = WaitOptions::new().with_timeout(args.timeout);
    let fixture = SessionFixture::new(provider, &app.url).with_wait_options(wait);

    let mut cases = all_cases(&data);
    retain_matching(&mut cases, args.filter.as_deref());
    if cases.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "no case matches filter {:?}",
            args.filter.as_deref().unwrap_or_default()
        )));
    }

    let mut progress =
        ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    progress.info(&format!(
        "running {} cases against {} ({kind})",
        cases.len(),
        app.url
    ));
    progress.start_progress(cases.len() as u64, "running suite");
    let progress = Arc::new(progress);

    let observer = Arc::clone(&progress);
    let mut runner = SuiteRunner::new(fixture, SuiteContext { app, data })
        .with_output_dir(&args.output)
        .with_failure_mode(failure_mode(args.fail_fast))
        .with_observer(move |entry| {
            match entry.status {
                TestStatus::Passed => observer.case_passed(&entry.name, entry.duration),
                TestStatus::Failed => observer
                    .case_failed(&entry.name, entry.error.as_deref().unwrap_or("unknown error")),
                TestStatus::Skipped => observer.case_skipped(&entry.name),
            }
            observer.increment(1);
        });
    runner.register_all(cases);

    let runtime = tokio::runtime::Runtime::new()?;
    let results = runtime.block_on(runner.run())?;
    progress.finish();

    progress.info(&summary_line(&results));
    progress.info(&format!("HTML report: {}", results.html_report.display()));
    progress.info(&format!("JUnit report: {}", results.junit_report.display()));

    if results.all_passed() {
        Ok(())
    } else {
        Err(CliError::suite_execution(format!(
            "{} of {} cases failed",
            results.failed,
            results.total()
        )))
    }
}

#[cfg(not(feature = "browser"))]
fn run_suite(
    _config: &CliConfig,
    _args: &RunArgs,
    _app: AppData,
    _data: DataTable,
) -> CliResult<()> {
    Err(CliError::invalid_argument(
        "browser control not enabled; rebuild with --features browser",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use vigia::{MockDriver, TestResultEntry};

    fn sample_data() -> DataTable {
        let mut data = DataTable::new();
        data.insert_row(
            "test_verify_invalidLogin_TC03",
            &[("username", "admin12"), ("password", "admin")],
        );
        data
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn test_no_filter_keeps_everything() {
            let data = sample_data();
            let mut cases = all_cases::<MockDriver>(&data);
            let before = cases.len();
            retain_matching(&mut cases, None);
            assert_eq!(cases.len(), before);
        }

        #[test]
        fn test_filter_matches_substring() {
            let data = sample_data();
            let mut cases = all_cases::<MockDriver>(&data);
            retain_matching(&mut cases, Some("TC03"));
            assert_eq!(cases.len(), 1);
            assert!(cases[0].name().contains("invalidLogin"));
        }

        #[test]
        fn test_filter_can_match_nothing() {
            let data = sample_data();
            let mut cases = all_cases::<MockDriver>(&data);
            retain_matching(&mut cases, Some("TC99"));
            assert!(cases.is_empty());
        }
    }

    mod mode_tests {
        use super::*;

        #[test]
        fn test_fail_fast_flag_selects_mode() {
            assert_eq!(failure_mode(true), FailureMode::FailFast);
            assert_eq!(failure_mode(false), FailureMode::CollectAll);
        }
    }

    mod summary_tests {
        use super::*;

        #[test]
        fn test_summary_line_counts() {
            let results = SuiteResults {
                entries: vec![
                    TestResultEntry::passed("test_a", Duration::from_millis(5)),
                    TestResultEntry::failed("test_b", Duration::from_millis(7), "boom"),
                    TestResultEntry::skipped("test_c"),
                ],
                passed: 1,
                failed: 1,
                skipped: 1,
                html_report: PathBuf::from("target/vigia/report.html"),
                junit_report: PathBuf::from("target/vigia/junit.xml"),
            };
            assert_eq!(
                summary_line(&results),
                "3 cases: 1 passed, 1 failed, 1 skipped"
            );
        }
    }

    mod load_tests {
        use super::*;
        use crate::commands::{BrowserArg, RunArgs};

        fn args_with_config(config: PathBuf) -> RunArgs {
            RunArgs {
                browser: BrowserArg::Edge,
                config,
                data_dir: PathBuf::from("data"),
                sheet: "LoginData".to_string(),
                output: PathBuf::from("target/vigia"),
                filter: None,
                fail_fast: false,
                headed: false,
                timeout: 10_000,
            }
        }

        #[test]
        fn test_missing_config_fails_before_launch() {
            let args = args_with_config(PathBuf::from("/nonexistent/vigia.ini"));
            let err = execute_run(&CliConfig::new(), &args).unwrap_err();
            assert!(matches!(err, CliError::Vigia(_)));
        }
    }
}
