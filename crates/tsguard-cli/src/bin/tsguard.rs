#![allow(clippy::print_stderr)]

use clap::Parser;
use std::process::ExitCode;

use tsguard_cli::args::CliArgs;
use tsguard_cli::driver::{self, RunStatus};
use tsguard_cli::tracing_config;

/// Exit status when `--check` finds files that would change.
const EXIT_WOULD_CHANGE: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    // Zero cost unless TSGUARD_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match driver::run(&args, &mut out) {
        Ok(RunStatus::Success) => ExitCode::SUCCESS,
        Ok(RunStatus::WouldChange(count)) => {
            eprintln!("{count} file(s) would change");
            ExitCode::from(EXIT_WOULD_CHANGE)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
