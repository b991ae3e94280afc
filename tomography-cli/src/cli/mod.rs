//! Command-line interface for batch cluster tomography.
//!
//! The `analyse` command reduces every position dump to its corner
//! contribution, gap statistics, and largest-cluster size; the `membership`
//! command records which particles share a cluster in every dump.

mod commands;
mod dump;
mod output;

pub use commands::{
    AnalyseCommand, Cli, CliError, Command, ExecutionSummary, MembershipCommand, render_summary,
    run_cli,
};
pub use dump::read_positions;

#[cfg(test)]
mod test_helpers;
