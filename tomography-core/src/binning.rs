//! Particle binning onto a square occupancy grid.

use tracing::instrument;

use crate::error::{LatticeError, TomographyError};

/// Occupancy grid of one snapshot and the bin of every particle.
///
/// Bin `(x, y)` has flat index `x * size + y`, matching the row-major layout
/// of the labeler with `x` on the slow axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinnedConfiguration {
    size: usize,
    occupancy: Vec<u8>,
    particle_bins: Vec<usize>,
}

impl BinnedConfiguration {
    /// Linear size of the grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// `size²` occupancy flags, `1` where at least one particle landed.
    #[must_use]
    pub fn occupancy(&self) -> &[u8] {
        &self.occupancy
    }

    /// Flat bin index of every particle, in input order.
    #[must_use]
    pub fn particle_bins(&self) -> &[usize] {
        &self.particle_bins
    }

    /// Number of binned particles.
    #[must_use]
    pub fn particles(&self) -> usize {
        self.particle_bins.len()
    }

    /// Number of occupied bins.
    #[must_use]
    pub fn occupied_bins(&self) -> usize {
        self.occupancy.iter().filter(|&&flag| flag != 0).count()
    }
}

/// Bins `(x, y)` positions, given in units of the bin width, onto a
/// `size × size` periodic grid.
///
/// Coordinates are wrapped into `[0, size)` before truncation, so particles
/// that drifted across the box edge land in the image bin.
///
/// # Errors
/// Returns [`LatticeError::ZeroSize`] (wrapped) when `size` is zero and
/// [`TomographyError::NonFinitePosition`] for a NaN or infinite coordinate.
///
/// # Examples
/// ```
/// use tomography_core::bin_positions;
///
/// let binned = bin_positions(&[[0.5, 1.5], [3.9, -0.5]], 4)?;
/// assert_eq!(binned.particle_bins(), &[1, 15]);
/// assert_eq!(binned.occupied_bins(), 2);
/// # Ok::<(), tomography_core::TomographyError>(())
/// ```
#[instrument(name = "core.bin_positions", err, skip(positions), fields(particles = positions.len()))]
pub fn bin_positions(
    positions: &[[f64; 2]],
    size: usize,
) -> Result<BinnedConfiguration, TomographyError> {
    if size == 0 {
        return Err(LatticeError::ZeroSize.into());
    }
    let sites = size
        .checked_mul(size)
        .ok_or_else(|| LatticeError::SiteCountOverflow {
            shape: vec![size, size],
        })?;

    let mut occupancy = vec![0_u8; sites];
    let mut particle_bins = Vec::with_capacity(positions.len());
    for (particle, &[x, y]) in positions.iter().enumerate() {
        let row = bin_coordinate(particle, x, size)?;
        let column = bin_coordinate(particle, y, size)?;
        let bin = row * size + column;
        if let Some(flag) = occupancy.get_mut(bin) {
            *flag = 1;
        }
        particle_bins.push(bin);
    }

    Ok(BinnedConfiguration {
        size,
        occupancy,
        particle_bins,
    })
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "positions are truncated onto the grid after wrapping into [0, size)"
)]
fn bin_coordinate(particle: usize, value: f64, size: usize) -> Result<usize, TomographyError> {
    if !value.is_finite() {
        return Err(TomographyError::NonFinitePosition { particle, value });
    }
    let wrapped = value.rem_euclid(size as f64);
    // `rem_euclid` can round up to `size` for tiny negative inputs.
    Ok((wrapped as usize).min(size - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::inside(2.7, 2)]
    #[case::lower_edge(0.0, 0)]
    #[case::upper_edge(4.0, 0)]
    #[case::beyond(5.25, 1)]
    #[case::negative(-0.25, 3)]
    #[case::tiny_negative(-1e-18, 3)]
    fn coordinates_wrap_onto_the_grid(#[case] value: f64, #[case] expected: usize) {
        assert_eq!(bin_coordinate(0, value, 4).expect("finite"), expected);
    }

    #[test]
    fn particles_sharing_a_bin_mark_it_once() {
        let binned = bin_positions(&[[1.1, 2.2], [1.9, 2.8], [0.0, 0.0]], 3).expect("valid");
        assert_eq!(binned.particle_bins(), &[5, 5, 0]);
        assert_eq!(binned.occupancy(), &[1, 0, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(binned.particles(), 3);
        assert_eq!(binned.occupied_bins(), 2);
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn non_finite_coordinates_are_rejected(#[case] value: f64) {
        let err = bin_positions(&[[0.0, 0.0], [1.0, value]], 4).expect_err("must reject");
        assert!(matches!(
            err,
            TomographyError::NonFinitePosition { particle: 1, .. }
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = bin_positions(&[], 0).expect_err("must reject");
        assert_eq!(err, TomographyError::Lattice(LatticeError::ZeroSize));
    }
}
