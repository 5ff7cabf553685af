//! Vigia CLI: drive the vtiger CRM suite from the command line
//!
//! ## Usage
//!
//! ```bash
//! vigia run --config demos/config.ini --data-dir demos   # Run the suite
//! vigia run --browser chrome --fail-fast                 # Chrome, stop on failure
//! vigia list --data-dir demos                            # Print the case names
//! ```

use clap::Parser;
use std::process::ExitCode;

use vigia_cli::{handlers, init_tracing, Cli, CliConfig, CliResult, Commands, Verbosity};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Run(args) => handlers::execute_run(&config, &args),
        Commands::List(args) => handlers::execute_list(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
}
