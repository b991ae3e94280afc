//! `tomography` binary.
//!
//! Sweeps the given position dumps with `analyse` or `membership` and prints
//! which result files were written. Diagnostics go to stderr through
//! `tracing`; a failed run logs the stable error codes of core failures and
//! exits non-zero without touching the output directory.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tomography_cli::{
    cli::{Cli, CliError, ExecutionSummary, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match run_cli(Cli::parse()) {
        Ok(summary) => match print_summary(&summary) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = %format!("{err:#}"), "could not report results");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn print_summary(summary: &ExecutionSummary) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush stdout")
}

fn log_failure(err: &CliError) {
    let (code, lattice_code) = err
        .core_codes()
        .map_or((None, None), |(code, lattice)| (Some(code), lattice));
    error!(
        error = %err,
        code = code.map(|value| field::display(value.as_str())),
        lattice_code = lattice_code.map(|value| field::display(value.as_str())),
        "tomography run failed"
    );
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is unavailable until logging initialises"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
