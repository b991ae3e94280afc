//! Writers for the per-run result files.
//!
//! Tabular outputs are plain text: a `# ` header line, then one row per
//! snapshot. Floating-point values use scientific notation with 18 digits
//! after the point, enough to round-trip any `f64`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::commands::CliError;

/// Writes `rows` to `dir/name` below a `# header` line, joining the cells of
/// each row with tabs.
pub(super) fn write_table<R, C>(
    dir: &Path,
    name: &str,
    header: &str,
    rows: R,
) -> Result<PathBuf, CliError>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let path = dir.join(name);
    let wrap = |source: io::Error| CliError::Io {
        path: path.clone(),
        source,
    };
    let mut writer = BufWriter::new(File::create(&path).map_err(wrap)?);
    writeln!(writer, "# {header}").map_err(wrap)?;
    for row in rows {
        let line: Vec<String> = row.into_iter().collect();
        writeln!(writer, "{}", line.join("\t")).map_err(wrap)?;
    }
    writer.flush().map_err(wrap)?;
    Ok(path)
}

/// Writes one JSON document to `dir/name`.
pub(super) fn write_json<T: ?Sized + Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
) -> Result<PathBuf, CliError> {
    let path = dir.join(name);
    let file = File::create(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|source| CliError::Serialise {
        path: path.clone(),
        source,
    })?;
    writer.flush().map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Formats a float the way the tabular outputs store it.
pub(super) fn format_float(value: f64) -> String {
    format!("{value:.18e}")
}
