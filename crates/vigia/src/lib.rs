//! Vigia: browser-driven UI test suite for the vtiger CRM
//!
//! Vigia (Spanish: "lookout") drives a real Chromium-family browser
//! through the Chrome DevTools Protocol and checks the vtiger web CRM
//! the way a tester would: open the login page, sign in, create a lead,
//! log out, and report what happened.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      VIGIA Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐    ┌──────────────┐    ┌───────────────────┐  │
//! │  │ Scenarios │    │ Page objects │    │ UiDriver          │  │
//! │  │ (TC01-05) │───►│ + wait/act   │───►│ (CDP or mock)     │  │
//! │  │           │    │ primitives   │    │                   │  │
//! │  └───────────┘    └──────────────┘    └───────────────────┘  │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  ┌───────────┐    ┌──────────────┐    ┌───────────────────┐  │
//! │  │ Runner    │───►│ Reporter     │───►│ HTML + JUnit +    │  │
//! │  │ (fixture  │    │              │    │ failure PNGs      │  │
//! │  │ per case) │    │              │    │                   │  │
//! │  └───────────┘    └──────────────┘    └───────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every test case gets a fresh browser session from the fixture layer.
//! Element interaction goes through [`CommonActions`], which waits for
//! presence within a bounded budget and raises typed errors instead of
//! swallowing them. Failures produce a timestamped screenshot that the
//! HTML report embeds.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod actions;
pub mod artifacts;
pub mod browser;
pub mod config;
pub mod data;
pub mod driver;
pub mod fixture;
pub mod locator;
pub mod pages;
pub mod reporter;
pub mod result;
pub mod runner;
pub mod scenarios;

pub use actions::{CommonActions, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
pub use artifacts::{save_failure_screenshot, screenshot_file_name, SCREENSHOT_DIR};
pub use browser::{BrowserKind, BROWSER_PATH_ENV};
#[cfg(feature = "browser")]
pub use browser::{CdpDriver, CdpProvider};
pub use config::{AppData, IniConfig, Settings, APP_SECTION};
pub use data::{DataRow, DataTable, DEFAULT_KEY_COLUMN};
pub use driver::{
    DriverConfig, ElementHandle, MockDriver, Screenshot, Session, UiDriver, Visibility,
};
pub use fixture::{DriverProvider, ProviderFn, SessionFixture};
pub use locator::{Locator, Strategy};
pub use pages::{HomePage, LeadPage, LoginPage};
pub use reporter::{FailureMode, Reporter, TestResultEntry, TestStatus};
pub use result::{VigiaError, VigiaResult};
pub use runner::{SuiteContext, SuiteResults, SuiteRunner, TestCase};
pub use scenarios::{all_cases, LOGIN_DATA_SHEET, LOGIN_PAGE_TITLE};
