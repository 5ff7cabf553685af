//! Vigia CLI library
//!
//! Command-line interface for the Vigia UI test suite: `run` executes the
//! CRM cases against a live browser, `list` prints the expanded case names.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod tracing;

pub use commands::{BrowserArg, Cli, ColorArg, Commands, ListArgs, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use tracing::init_tracing;
