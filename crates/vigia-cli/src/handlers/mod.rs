//! Command handlers - one module per subcommand
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Comprehensive tests

pub mod list;
pub mod run;

// Re-export handlers for convenient access
pub use list::execute_list;
pub use run::execute_run;
