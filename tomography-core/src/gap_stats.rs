//! Gap-size statistics over two-dimensional label grids.
//!
//! Along every row (and optionally every column) of a `size × size` label
//! grid, the reducer records how far apart consecutive occurrences of the
//! same label are. Under periodic boundaries each label seen on a line also
//! contributes the gap that closes the line around the torus; a label seen
//! once therefore contributes a gap of zero.

use std::collections::HashMap;

use tracing::instrument;

use crate::{
    error::{LatticeError, Result},
    lattice::Boundary,
    result::GapHistogram,
};

/// Which lines of the grid are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GapDirections {
    /// Scan rows only.
    Rows,
    /// Scan rows, then columns, and average the two passes.
    #[default]
    Both,
}

impl GapDirections {
    const fn passes(self) -> usize {
        match self {
            Self::Rows => 1,
            Self::Both => 2,
        }
    }
}

/// First and most recent position of a label on the current line.
#[derive(Clone, Copy)]
struct Occurrence {
    first: usize,
    last: usize,
}

/// Computes the normalised gap-size histogram `g(s)` of a `size × size`
/// label grid stored row-major.
///
/// Sites labeled `excluded` are skipped entirely. Counts are divided by
/// `size`, or by `2 · size` when both directions are scanned.
///
/// # Errors
/// Returns [`LatticeError::ZeroSize`] when `size` is zero and
/// [`LatticeError::ShapeMismatch`] when `labels` does not hold `size²`
/// entries.
///
/// # Examples
/// ```
/// use tomography_core::{Boundary, GapDirections, gap_statistics};
///
/// // One row, label 7 at columns 0 and 2 of a 3 × 3 grid; every other
/// // site has a unique label.
/// let labels = [7, 1, 7, 3, 4, 5, 6, 8, 9];
/// let g = gap_statistics(&labels, 3, Boundary::Open, GapDirections::Rows, None)?;
/// assert_eq!(g.values(), &[0.0, 0.0, 1.0 / 3.0]);
/// # Ok::<(), tomography_core::LatticeError>(())
/// ```
#[instrument(
    name = "core.gap_statistics",
    err,
    skip(labels),
    fields(sites = labels.len(), boundary = %boundary, directions = ?directions),
)]
pub fn gap_statistics(
    labels: &[usize],
    size: usize,
    boundary: Boundary,
    directions: GapDirections,
    excluded: Option<usize>,
) -> Result<GapHistogram> {
    if size == 0 {
        return Err(LatticeError::ZeroSize);
    }
    let expected = size
        .checked_mul(size)
        .ok_or_else(|| LatticeError::SiteCountOverflow {
            shape: vec![size, size],
        })?;
    if labels.len() != expected {
        return Err(LatticeError::ShapeMismatch {
            what: "label grid",
            expected,
            got: labels.len(),
        });
    }

    let mut counts = vec![0_u64; size];
    for line in 0..size {
        let row = labels.iter().skip(line * size).take(size);
        scan_line(row, size, boundary, excluded, &mut counts);
    }
    if directions == GapDirections::Both {
        for line in 0..size {
            let column = labels.iter().skip(line).step_by(size);
            scan_line(column, size, boundary, excluded, &mut counts);
        }
    }

    Ok(normalise(&counts, size * directions.passes()))
}

fn scan_line<'a>(
    line: impl Iterator<Item = &'a usize>,
    size: usize,
    boundary: Boundary,
    excluded: Option<usize>,
    counts: &mut [u64],
) {
    let mut seen: HashMap<usize, Occurrence> = HashMap::new();
    for (position, &label) in line.enumerate() {
        if excluded == Some(label) {
            continue;
        }
        match seen.get_mut(&label) {
            Some(occurrence) => {
                record(counts, position - occurrence.last);
                occurrence.last = position;
            }
            None => {
                seen.insert(
                    label,
                    Occurrence {
                        first: position,
                        last: position,
                    },
                );
            }
        }
    }

    if boundary.is_periodic() {
        for occurrence in seen.values() {
            record(counts, (size + occurrence.first - occurrence.last) % size);
        }
    }
}

fn record(counts: &mut [u64], gap: usize) {
    if let Some(count) = counts.get_mut(gap) {
        *count += 1;
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "g(s) is a normalised frequency"
)]
fn normalise(counts: &[u64], norm: usize) -> GapHistogram {
    let norm = norm as f64;
    GapHistogram::from_values(counts.iter().map(|&count| count as f64 / norm).collect())
}
