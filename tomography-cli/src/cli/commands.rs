//! Command implementations and argument parsing for the tomography CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tomography_core::{
    BinnedConfiguration, DEFAULT_SIZE, LargestClusterPolicy, LatticeErrorCode, Tomography,
    TomographyBuilder, TomographyError, TomographyErrorCode, bin_positions,
};
use tracing::{Span, field, info, instrument};

use super::dump::read_positions;
use super::output::{format_float, write_json, write_table};

const CORNER_FILE: &str = "corner.txt";
const GAPSTAT_FILE: &str = "gapstat.txt";
const LARGEST_CLUSTER_FILE: &str = "LC.txt";
const MEMBERSHIP_FILE: &str = "clusters.json";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "tomography",
    about = "Run spatial cluster tomography over particle position dumps."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute corner contribution, gap statistics, and largest-cluster size.
    Analyse(AnalyseCommand),
    /// Record which particles share a cluster in every dump.
    Membership(MembershipCommand),
}

/// Options accepted by the `analyse` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyseCommand {
    /// Linear system size in bins.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Whether the largest cluster takes part in the gap statistics.
    /// Accepts `include` or `exclude`.
    #[arg(long = "largest-cluster", default_value_t = LargestClusterPolicy::Exclude)]
    pub largest_cluster: LargestClusterPolicy,

    /// Directory receiving `corner.txt`, `gapstat.txt`, and `LC.txt`.
    #[arg(long = "output-dir")]
    pub output_dir: PathBuf,

    /// Position dumps, one snapshot each, processed in the given order.
    #[arg(required = true)]
    pub dumps: Vec<PathBuf>,
}

/// Options accepted by the `membership` command.
#[derive(Debug, Args, Clone)]
pub struct MembershipCommand {
    /// Linear system size in bins.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Directory receiving `clusters.json` and `LC.txt`.
    #[arg(long = "output-dir")]
    pub output_dir: PathBuf,

    /// Position dumps, one snapshot each, processed in the given order.
    #[arg(required = true)]
    pub dumps: Vec<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input or writing an output failed.
    #[error("I/O failure on `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A dump row could not be parsed.
    #[error("`{path}` line {line}: {reason}")]
    Parse {
        /// Dump being read.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
    /// Tomography configuration or analysis failed.
    #[error(transparent)]
    Core(#[from] TomographyError),
    /// The membership document could not be encoded.
    #[error("failed to encode `{path}`: {source}")]
    Serialise {
        /// Output path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    /// Stable codes of an analysis failure: the tomography code and, when
    /// the lattice layer rejected the input, its code too.
    ///
    /// Returns `None` for failures outside the core library.
    #[must_use]
    pub const fn core_codes(&self) -> Option<(TomographyErrorCode, Option<LatticeErrorCode>)> {
        match self {
            Self::Core(error) => Some((error.code(), error.lattice_code())),
            Self::Io { .. } | Self::Parse { .. } | Self::Serialise { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Name of the executed command.
    pub command: &'static str,
    /// Number of dumps processed.
    pub snapshots: usize,
    /// Files written, in writing order.
    pub outputs: Vec<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when a dump cannot be read or parsed, the analysis
/// fails, or an output cannot be written. No summary is produced on error.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tempfile::TempDir;
/// # use tomography_cli::cli::{AnalyseCommand, Cli, Command, run_cli};
/// # use tomography_core::LargestClusterPolicy;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let dump = dir.path().join("dump.00000001.txt");
/// std::fs::write(&dump, "header\nheader\n0.5 0.5\n0.5 1.5\n")?;
/// let cli = Cli {
///     command: Command::Analyse(AnalyseCommand {
///         size: 4,
///         largest_cluster: LargestClusterPolicy::Exclude,
///         output_dir: dir.path().join("results"),
///         dumps: vec![dump],
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.snapshots, 1);
/// assert_eq!(summary.outputs.len(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Analyse(command) => {
            span.record("command", field::display("analyse"));
            run_analyse(command)
        }
        Command::Membership(command) => {
            span.record("command", field::display("membership"));
            run_membership(command)
        }
    }
}

#[instrument(
    name = "cli.analyse",
    err,
    skip(command),
    fields(
        size = command.size,
        dumps = command.dumps.len(),
        largest_cluster = ?command.largest_cluster,
    ),
)]
pub(super) fn run_analyse(command: AnalyseCommand) -> Result<ExecutionSummary, CliError> {
    let tomography = TomographyBuilder::new()
        .with_size(command.size)
        .with_largest_cluster(command.largest_cluster)
        .build()?;

    let mut corners = Vec::with_capacity(command.dumps.len());
    let mut gap_rows = Vec::with_capacity(command.dumps.len());
    let mut largest = Vec::with_capacity(command.dumps.len());
    for dump in &command.dumps {
        let binned = load_snapshot(dump, &tomography)?;
        let report = tomography.analyse(binned.occupancy())?;
        corners.push(vec![format_float(report.corner)]);
        gap_rows.push(
            report
                .gap_statistics
                .values()
                .iter()
                .map(|&value| format_float(value))
                .collect::<Vec<_>>(),
        );
        largest.push(vec![report.largest_cluster_size.to_string()]);
    }

    let dir = prepare_output_dir(&command.output_dir)?;
    let outputs = vec![
        write_table(dir, CORNER_FILE, "Corner contribution, C(ell)", corners)?,
        write_table(dir, GAPSTAT_FILE, "Gap-size statistics, g(s)", gap_rows)?,
        write_table(dir, LARGEST_CLUSTER_FILE, "Size of the largest cluster", largest)?,
    ];

    info!(snapshots = command.dumps.len(), "analysis completed");
    Ok(ExecutionSummary {
        command: "analyse",
        snapshots: command.dumps.len(),
        outputs,
    })
}

#[instrument(
    name = "cli.membership",
    err,
    skip(command),
    fields(size = command.size, dumps = command.dumps.len()),
)]
pub(super) fn run_membership(command: MembershipCommand) -> Result<ExecutionSummary, CliError> {
    let tomography = TomographyBuilder::new().with_size(command.size).build()?;

    let mut memberships = Vec::with_capacity(command.dumps.len());
    let mut largest = Vec::with_capacity(command.dumps.len());
    for dump in &command.dumps {
        let binned = load_snapshot(dump, &tomography)?;
        let membership = tomography.membership(&binned)?;
        memberships.push(membership.flatten());
        largest.push(vec![membership.largest_cluster_size().to_string()]);
    }

    let dir = prepare_output_dir(&command.output_dir)?;
    let outputs = vec![
        write_json(dir, MEMBERSHIP_FILE, &memberships)?,
        write_table(dir, LARGEST_CLUSTER_FILE, "Size of the largest cluster", largest)?,
    ];

    info!(snapshots = command.dumps.len(), "membership completed");
    Ok(ExecutionSummary {
        command: "membership",
        snapshots: command.dumps.len(),
        outputs,
    })
}

fn load_snapshot(dump: &Path, tomography: &Tomography) -> Result<BinnedConfiguration, CliError> {
    let positions = read_positions(dump)?;
    Ok(bin_positions(&positions, tomography.size())?)
}

fn prepare_output_dir(dir: &Path) -> Result<&Path, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(dir)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::path::PathBuf;
/// # use tomography_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     command: "analyse",
///     snapshots: 2,
///     outputs: vec![PathBuf::from("out/corner.txt")],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "command: analyse\nsnapshots: 2\nwrote: out/corner.txt\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "command: {}", summary.command)?;
    writeln!(writer, "snapshots: {}", summary.snapshots)?;
    for output in &summary.outputs {
        writeln!(writer, "wrote: {}", output.display())?;
    }
    Ok(())
}
