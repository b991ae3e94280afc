//! Small helpers shared across CLI tests.
//!
//! The tests write position dumps into temporary directories and read the
//! result files back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Cli, CliError, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Writes a dump with the standard two header lines and one row per
/// position, padded with a trailing type column.
pub(super) fn write_dump(dir: &TempDir, name: &str, positions: &[[f64; 2]]) -> io::Result<PathBuf> {
    let mut contents = String::from("ITEM: TIMESTEP\nITEM: ATOMS x y type\n");
    for [x, y] in positions {
        contents.push_str(&format!("{x} {y} 1\n"));
    }
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Reads a tabular result file, dropping its header line.
pub(super) fn read_rows(path: &Path) -> io::Result<Vec<Vec<String>>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .skip(1)
        .map(|line| line.split('\t').map(ToOwned::to_owned).collect())
        .collect())
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
