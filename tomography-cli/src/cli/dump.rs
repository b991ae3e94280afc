//! Reader for particle position dumps.
//!
//! A dump starts with two header lines followed by one particle per line.
//! The first two whitespace-separated columns hold the `x` and `y` position
//! in units of the bin width; further columns are ignored.

use std::fs;
use std::path::Path;

use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

/// Number of header lines preceding the particle rows.
const HEADER_LINES: usize = 2;

/// Reads the `(x, y)` positions stored in the dump at `path`.
///
/// Blank lines are skipped.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read and
/// [`CliError::Parse`] when a row has fewer than two columns or a column is
/// not a number.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tempfile::NamedTempFile;
/// # use tomography_cli::cli::read_positions;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "ITEM: TIMESTEP\nITEM: ATOMS x y\n0.5 1.5 0\n2.0 3.25 1\n")?;
/// let positions = read_positions(file.path())?;
/// assert_eq!(positions, vec![[0.5, 1.5], [2.0, 3.25]]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.read_dump", err, fields(path = field::Empty, particles = field::Empty))]
pub fn read_positions(path: &Path) -> Result<Vec<[f64; 2]>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));

    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let positions = parse_positions(path, &contents)?;

    span.record("particles", positions.len());
    debug!(particles = positions.len(), "dump parsed");
    Ok(positions)
}

fn parse_positions(path: &Path, contents: &str) -> Result<Vec<[f64; 2]>, CliError> {
    contents
        .lines()
        .enumerate()
        .skip(HEADER_LINES)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_row(line).map_err(|reason| parse_error(path, index, reason)))
        .collect()
}

fn parse_row(line: &str) -> Result<[f64; 2], String> {
    let mut columns = line.split_whitespace();
    let mut next = |axis: &str| -> Result<f64, String> {
        let raw = columns
            .next()
            .ok_or_else(|| format!("missing {axis} column"))?;
        raw.parse::<f64>()
            .map_err(|error| format!("invalid {axis} value `{raw}`: {error}"))
    };
    Ok([next("x")?, next("y")?])
}

fn parse_error(path: &Path, index: usize, reason: String) -> CliError {
    CliError::Parse {
        path: path.to_path_buf(),
        line: index + 1,
        reason,
    }
}
