//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use vigia::BrowserKind;

/// Vigia: page-object UI test suite for the vtiger CRM
#[derive(Parser, Debug)]
#[command(name = "vigia")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the CRM suite against a live browser
    Run(RunArgs),

    /// List the registered test cases
    List(ListArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Browser family to launch
    #[arg(long, value_enum, default_value = "edge")]
    pub browser: BrowserArg,

    /// INI configuration file with the [AppData] section
    #[arg(short, long, default_value = "config.ini")]
    pub config: PathBuf,

    /// Directory holding the test-data sheets
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Test-data sheet name (resolved to {sheet}.csv in the data dir)
    #[arg(long, default_value = "LoginData")]
    pub sheet: String,

    /// Output directory for reports and failure screenshots
    #[arg(short, long, default_value = "target/vigia")]
    pub output: PathBuf,

    /// Only run cases whose name contains this pattern
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Stop the suite on the first failing case
    #[arg(long)]
    pub fail_fast: bool,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Element wait budget in milliseconds
    #[arg(long, default_value = "10000")]
    pub timeout: u64,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory holding the test-data sheets
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Test-data sheet name (resolved to {sheet}.csv in the data dir)
    #[arg(long, default_value = "LoginData")]
    pub sheet: String,
}

/// Browser choice as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BrowserArg {
    /// Google Chrome / Chromium
    Chrome,
    /// Microsoft Edge
    #[default]
    Edge,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Chrome => Self::Chrome,
            BrowserArg::Edge => Self::Edge,
        }
    }
}

/// Color choice as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorArg {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Always => Self::Always,
            ColorArg::Auto => Self::Auto,
            ColorArg::Never => Self::Never,
        }
    }
}
