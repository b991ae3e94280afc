//! Seeded synthetic inputs for benchmarking.
//!
//! [`SyntheticLattice`] is a square site-percolation grid: each site is
//! occupied independently with the configured probability. [`SyntheticCloud`]
//! is a uniform particle cloud over a square box measured in bin widths.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic data generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested linear size was zero.
    #[error("size must be greater than zero")]
    ZeroSize,
    /// The requested site count does not fit in memory.
    #[error("size {size} squared overflows usize")]
    SizeOverflow {
        /// Requested linear size.
        size: usize,
    },
    /// The occupation percentage exceeded one hundred.
    #[error("density must be at most 100%, got {percent}%")]
    DensityOutOfRange {
        /// Requested percentage.
        percent: u8,
    },
    /// The requested particle count was zero.
    #[error("particle count must be greater than zero")]
    ZeroParticles,
    /// The box is too wide to express its extent exactly as `f64`.
    #[error("size {size} exceeds the supported box width")]
    BoxTooWide {
        /// Requested linear size.
        size: usize,
    },
}

/// Configuration for a synthetic percolation lattice.
#[derive(Clone, Debug)]
pub struct LatticeConfig {
    /// Linear system size.
    pub size: usize,
    /// Percentage of sites to occupy, `0..=100`.
    pub density_percent: u8,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A square occupancy grid generated from a seeded RNG.
///
/// # Examples
///
/// ```
/// use tomography_benches::source::{LatticeConfig, SyntheticLattice};
///
/// let config = LatticeConfig { size: 8, density_percent: 50, seed: 42 };
/// let lattice = SyntheticLattice::generate(&config).expect("valid config");
/// assert_eq!(lattice.occupancy().len(), 64);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticLattice {
    occupancy: Vec<u8>,
    size: usize,
}

impl SyntheticLattice {
    /// Generates the occupancy grid eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroSize`] for an empty grid,
    /// [`SyntheticError::SizeOverflow`] when `size²` overflows, and
    /// [`SyntheticError::DensityOutOfRange`] above one hundred percent.
    pub fn generate(config: &LatticeConfig) -> Result<Self, SyntheticError> {
        if config.size == 0 {
            return Err(SyntheticError::ZeroSize);
        }
        if config.density_percent > 100 {
            return Err(SyntheticError::DensityOutOfRange {
                percent: config.density_percent,
            });
        }
        let sites = config
            .size
            .checked_mul(config.size)
            .ok_or(SyntheticError::SizeOverflow { size: config.size })?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let occupancy = (0..sites)
            .map(|_| u8::from(rng.gen_range(0_u8..100) < config.density_percent))
            .collect();
        Ok(Self {
            occupancy,
            size: config.size,
        })
    }

    /// Returns the row-major occupancy grid.
    #[must_use]
    pub fn occupancy(&self) -> &[u8] {
        &self.occupancy
    }

    /// Returns the linear system size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

/// Configuration for a synthetic particle cloud.
#[derive(Clone, Debug)]
pub struct CloudConfig {
    /// Number of particles to place.
    pub particle_count: usize,
    /// Box width in bins.
    pub size: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Uniformly scattered particle positions inside `[0, size)²`.
#[derive(Clone, Debug)]
pub struct SyntheticCloud {
    positions: Vec<[f64; 2]>,
}

impl SyntheticCloud {
    /// Generates the particle positions eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroParticles`], [`SyntheticError::ZeroSize`],
    /// or [`SyntheticError::BoxTooWide`] when `size` exceeds `u32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomography_benches::source::{CloudConfig, SyntheticCloud};
    ///
    /// let config = CloudConfig { particle_count: 10, size: 4, seed: 7 };
    /// let cloud = SyntheticCloud::generate(&config).expect("valid config");
    /// assert_eq!(cloud.positions().len(), 10);
    /// ```
    pub fn generate(config: &CloudConfig) -> Result<Self, SyntheticError> {
        if config.particle_count == 0 {
            return Err(SyntheticError::ZeroParticles);
        }
        if config.size == 0 {
            return Err(SyntheticError::ZeroSize);
        }
        let width = u32::try_from(config.size)
            .map(f64::from)
            .map_err(|_| SyntheticError::BoxTooWide { size: config.size })?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let positions = (0..config.particle_count)
            .map(|_| [rng.gen_range(0.0..width), rng.gen_range(0.0..width)])
            .collect();
        Ok(Self { positions })
    }

    /// Returns the generated positions.
    #[must_use]
    pub fn positions(&self) -> &[[f64; 2]] {
        &self.positions
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests fail loudly on invalid fixtures"
)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn lattice(size: usize, density_percent: u8, seed: u64) -> LatticeConfig {
        LatticeConfig {
            size,
            density_percent,
            seed,
        }
    }

    #[rstest]
    #[case::zero_size(lattice(0, 50, 1), SyntheticError::ZeroSize)]
    #[case::dense(lattice(4, 101, 1), SyntheticError::DensityOutOfRange { percent: 101 })]
    #[case::overflow(lattice(usize::MAX, 50, 1), SyntheticError::SizeOverflow { size: usize::MAX })]
    fn rejects_invalid_lattices(#[case] config: LatticeConfig, #[case] expected: SyntheticError) {
        let err = SyntheticLattice::generate(&config).expect_err("invalid config");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case::empty(0, 0)]
    #[case::full(100, 36)]
    fn density_extremes_are_exact(#[case] density_percent: u8, #[case] occupied: usize) {
        let grid = SyntheticLattice::generate(&lattice(6, density_percent, 3)).expect("valid");
        assert_eq!(grid.size(), 6);
        let count: usize = grid.occupancy().iter().map(|&site| usize::from(site)).sum();
        assert_eq!(count, occupied);
    }

    #[test]
    fn lattices_are_reproducible_per_seed() {
        let first = SyntheticLattice::generate(&lattice(16, 59, 42)).expect("valid");
        let second = SyntheticLattice::generate(&lattice(16, 59, 42)).expect("valid");
        assert_eq!(first.occupancy(), second.occupancy());
        assert!(first.occupancy().iter().all(|&site| site <= 1));
    }

    #[test]
    fn cloud_stays_inside_the_box() {
        let cloud = SyntheticCloud::generate(&CloudConfig {
            particle_count: 200,
            size: 8,
            seed: 9,
        })
        .expect("valid");
        assert!(
            cloud
                .positions()
                .iter()
                .flatten()
                .all(|&coordinate| (0.0..8.0).contains(&coordinate))
        );
    }

    #[rstest]
    #[case::no_particles(0, 4, SyntheticError::ZeroParticles)]
    #[case::zero_size(5, 0, SyntheticError::ZeroSize)]
    fn rejects_invalid_clouds(
        #[case] particle_count: usize,
        #[case] size: usize,
        #[case] expected: SyntheticError,
    ) {
        let err = SyntheticCloud::generate(&CloudConfig {
            particle_count,
            size,
            seed: 0,
        })
        .expect_err("invalid config");
        assert_eq!(err, expected);
    }
}
