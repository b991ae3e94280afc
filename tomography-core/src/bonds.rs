//! Bond extraction from site states.
//!
//! For every axis `n` a site is paired with its axis-`n` predecessor, wrapping
//! from coordinate 0 to the far end of the axis. The wrap entry is always
//! computed; whether it is used is decided by the labeler's boundary
//! conditions.

use std::fmt;

use tracing::{debug, instrument};

use crate::{
    error::{LatticeError, Result},
    lattice::{Boundary, Lattice},
};

/// Connectivity rule deciding whether a site and its predecessor are bonded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondRule {
    /// Both sites are in a non-default (occupied) state. Site percolation.
    #[default]
    Occupied,
    /// Both sites hold the same state, whatever it is. Same-state domains,
    /// for example spin clusters.
    SameState,
}

impl BondRule {
    fn connects<T: PartialEq + Default>(self, site: &T, predecessor: &T) -> bool {
        match self {
            Self::Occupied => {
                let vacant = T::default();
                *site != vacant && *predecessor != vacant
            }
            Self::SameState => site == predecessor,
        }
    }
}

impl fmt::Display for BondRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied => f.write_str("one"),
            Self::SameState => f.write_str("all"),
        }
    }
}

/// Per-axis bond arrays over a lattice shape.
///
/// `axis(n)[idx]` states whether site `idx` is bonded to its axis-`n`
/// predecessor. Entries at coordinate 0 along `n` describe the wraparound
/// bond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bonds {
    shape: Vec<usize>,
    axes: Vec<Vec<bool>>,
}

impl Bonds {
    /// Wraps explicit bond arrays, one per axis of `shape`.
    ///
    /// # Errors
    /// Returns [`LatticeError::BondAxisMismatch`] when the number of arrays
    /// differs from the number of axes and [`LatticeError::ShapeMismatch`]
    /// when an array does not hold one entry per site.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::Bonds;
    ///
    /// let bonds = Bonds::from_axes(vec![4], vec![vec![false, true, true, true]])?;
    /// assert_eq!(bonds.axis(0), Some(&[false, true, true, true][..]));
    /// # Ok::<(), tomography_core::LatticeError>(())
    /// ```
    pub fn from_axes(shape: Vec<usize>, axes: Vec<Vec<bool>>) -> Result<Self> {
        if axes.len() != shape.len() {
            return Err(LatticeError::BondAxisMismatch {
                expected: shape.len(),
                got: axes.len(),
            });
        }
        let sites = site_count(&shape)?;
        if let Some(bad) = axes.iter().find(|axis| axis.len() != sites) {
            return Err(LatticeError::ShapeMismatch {
                what: "bond array",
                expected: sites,
                got: bad.len(),
            });
        }
        Ok(Self { shape, axes })
    }

    /// Shape the bond arrays were built for.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes covered.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// Bond array for `axis`, if it exists.
    #[must_use]
    pub fn axis(&self, axis: usize) -> Option<&[bool]> {
        self.axes.get(axis).map(Vec::as_slice)
    }

    /// Whether `site` is bonded to its predecessor along `axis`. Out-of-range
    /// queries report no bond.
    #[must_use]
    pub fn is_active(&self, axis: usize, site: usize) -> bool {
        self.axes
            .get(axis)
            .and_then(|bonds| bonds.get(site))
            .copied()
            .unwrap_or(false)
    }

    /// Number of active bonds summed over all axes, wrap entries included.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.axes
            .iter()
            .map(|axis| axis.iter().filter(|&&bond| bond).count())
            .sum()
    }
}

fn site_count(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1_usize, |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| LatticeError::SiteCountOverflow {
            shape: shape.to_vec(),
        })
}

/// Derives per-axis bond arrays from a flat, row-major `state` array.
///
/// # Errors
/// Returns the validation errors of [`Lattice::new`] for a malformed `shape`
/// and [`LatticeError::ShapeMismatch`] when `state` does not hold one entry
/// per site.
///
/// # Examples
/// ```
/// use tomography_core::{BondRule, extract_bonds};
///
/// let bonds = extract_bonds(&[1_u8, 1, 0, 1], &[4], BondRule::Occupied)?;
/// assert_eq!(bonds.axis(0), Some(&[true, true, false, false][..]));
///
/// let spins = extract_bonds(&[1_i8, 1, -1, -1], &[4], BondRule::SameState)?;
/// assert_eq!(spins.axis(0), Some(&[false, true, false, true][..]));
/// # Ok::<(), tomography_core::LatticeError>(())
/// ```
#[instrument(
    name = "core.extract_bonds",
    err,
    skip(state),
    fields(sites = state.len(), rule = %rule),
)]
pub fn extract_bonds<T>(state: &[T], shape: &[usize], rule: BondRule) -> Result<Bonds>
where
    T: PartialEq + Default,
{
    // Boundary conditions play no part here; open placeholders only satisfy
    // the lattice validation.
    let lattice = Lattice::new(shape.to_vec(), vec![Boundary::Open; shape.len()])?;
    if state.len() != lattice.sites() {
        return Err(LatticeError::ShapeMismatch {
            what: "state array",
            expected: lattice.sites(),
            got: state.len(),
        });
    }

    let mut axes = vec![Vec::with_capacity(lattice.sites()); lattice.dimensions()];
    for (coords, index) in lattice.coordinates() {
        for (axis, (bonds, &coord)) in axes.iter_mut().zip(&coords).enumerate() {
            let predecessor = lattice.wrapped_predecessor(index, coord, axis);
            let active = match (state.get(index), state.get(predecessor)) {
                (Some(site), Some(previous)) => rule.connects(site, previous),
                _ => false,
            };
            bonds.push(active);
        }
    }

    let bonds = Bonds {
        shape: shape.to_vec(),
        axes,
    };
    debug!(active = bonds.active_count(), "bonds extracted");
    Ok(bonds)
}
