//! Spatial cluster tomography over square occupancy grids.
//!
//! Provides the [`Tomography`] runtime entry point, which chains bond
//! extraction, cluster labeling, the largest-cluster policy, and the gap
//! statistics into the per-snapshot observables.

use tracing::{debug, instrument};

use crate::{
    binning::BinnedConfiguration,
    bonds::{BondRule, extract_bonds},
    builder::LargestClusterPolicy,
    error::{LatticeError, TomographyError},
    gap_stats::{GapDirections, gap_statistics},
    hoshen_kopelman::label_clusters,
    lattice::{Boundary, Lattice},
    membership::ClusterMembership,
    result::{ClusterLabels, TomographyReport},
};

/// Entry point for analysing snapshots.
///
/// # Examples
/// ```
/// use tomography_core::{LargestClusterPolicy, TomographyBuilder};
///
/// let tomography = TomographyBuilder::new()
///     .with_size(4)
///     .with_largest_cluster(LargestClusterPolicy::Include)
///     .build()?;
/// // A single vertical bar at column 0.
/// let mut occupancy = vec![0_u8; 16];
/// for row in 0..4 {
///     occupancy[row * 4] = 1;
/// }
/// let report = tomography.analyse(&occupancy)?;
/// assert_eq!(report.largest_cluster_size, 4);
/// # Ok::<(), tomography_core::TomographyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tomography {
    size: usize,
    largest_cluster: LargestClusterPolicy,
    bond_rule: BondRule,
    boundaries: [Boundary; 2],
    gap_directions: GapDirections,
}

impl Tomography {
    pub(crate) fn new(
        size: usize,
        largest_cluster: LargestClusterPolicy,
        bond_rule: BondRule,
        boundaries: [Boundary; 2],
        gap_directions: GapDirections,
    ) -> Self {
        Self {
            size,
            largest_cluster,
            bond_rule,
            boundaries,
            gap_directions,
        }
    }

    /// Linear lattice size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Treatment of the largest cluster in the gap statistics.
    #[must_use]
    pub fn largest_cluster_policy(&self) -> LargestClusterPolicy {
        self.largest_cluster
    }

    /// Rule used to derive bonds.
    #[must_use]
    pub fn bond_rule(&self) -> BondRule {
        self.bond_rule
    }

    /// Boundary conditions, slow axis first.
    #[must_use]
    pub fn boundaries(&self) -> [Boundary; 2] {
        self.boundaries
    }

    /// Grid lines scanned by the gap statistics.
    #[must_use]
    pub fn gap_directions(&self) -> GapDirections {
        self.gap_directions
    }

    /// Computes the corner contribution, gap statistics, and largest-cluster
    /// size of one `size × size` state grid stored row-major.
    ///
    /// With [`LargestClusterPolicy::Exclude`] every site of the largest
    /// cluster is relabeled with its own flat index before the gap
    /// statistics run. Labels stay unreduced so those indices cannot clash
    /// with another cluster's root.
    ///
    /// # Errors
    /// Returns [`TomographyError::Lattice`] when `state` does not hold
    /// `size²` entries or when labeling fails.
    #[instrument(
        name = "core.analyse",
        err,
        skip(self, state),
        fields(
            size = self.size,
            sites = state.len(),
            largest_cluster = %self.largest_cluster,
            rule = %self.bond_rule,
        ),
    )]
    pub fn analyse<T>(&self, state: &[T]) -> Result<TomographyReport, TomographyError>
    where
        T: PartialEq + Default,
    {
        let labels = self.label(state)?;
        let largest = labels
            .largest_cluster()
            .ok_or(LatticeError::ZeroSize)?;

        let grid = match self.largest_cluster {
            LargestClusterPolicy::Include => labels.into_inner(),
            LargestClusterPolicy::Exclude => labels.with_cluster_isolated(largest.label),
        };
        let [row_boundary, _] = self.boundaries;
        let gap_statistics =
            gap_statistics(&grid, self.size, row_boundary, self.gap_directions, None)?;
        let corner = gap_statistics.corner_contribution();

        debug!(
            corner,
            largest_cluster_size = largest.size,
            "snapshot analysed"
        );
        Ok(TomographyReport {
            corner,
            gap_statistics,
            largest_cluster_size: largest.size,
        })
    }

    /// Groups the particles of a binned snapshot by cluster.
    ///
    /// # Errors
    /// Returns [`TomographyError::Lattice`] when the binned grid size differs
    /// from the configured size or labeling fails.
    #[instrument(
        name = "core.membership",
        err,
        skip(self, binned),
        fields(size = self.size, particles = binned.particles()),
    )]
    pub fn membership(
        &self,
        binned: &BinnedConfiguration,
    ) -> Result<ClusterMembership, TomographyError> {
        let labels = self.label(binned.occupancy())?;
        let largest = labels
            .largest_cluster()
            .ok_or(LatticeError::ZeroSize)?;
        let membership = ClusterMembership::from_particle_bins(
            labels.as_slice(),
            binned.particle_bins(),
            largest.size,
        );
        debug!(
            clusters = membership.clusters().len(),
            largest_cluster_size = largest.size,
            "membership grouped"
        );
        Ok(membership)
    }

    fn label<T>(&self, state: &[T]) -> Result<ClusterLabels, LatticeError>
    where
        T: PartialEq + Default,
    {
        let shape = [self.size, self.size];
        let lattice = Lattice::square(self.size, self.boundaries)?;
        let bonds = extract_bonds(state, &shape, self.bond_rule)?;
        label_clusters(&bonds, &lattice, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{binning::bin_positions, builder::TomographyBuilder, test_utils::filled};

    fn tomography(size: usize, policy: LargestClusterPolicy) -> Tomography {
        TomographyBuilder::new()
            .with_size(size)
            .with_largest_cluster(policy)
            .build()
            .expect("valid configuration")
    }

    #[rstest]
    #[case::size_two(2)]
    #[case::size_five(5)]
    #[case::size_eight(8)]
    fn uniform_grid_has_no_corner_after_exclusion(#[case] size: usize) {
        let report = tomography(size, LargestClusterPolicy::Exclude)
            .analyse(&filled(size))
            .expect("analysis succeeds");
        assert_eq!(report.largest_cluster_size, size * size);
        assert_eq!(report.corner, 0.0);
        assert_eq!(report.gap_statistics.get(0), Some(size as f64));
    }

    #[test]
    fn uniform_grid_included_has_only_unit_gaps() {
        // One label fills every line: each line has size - 1 unit gaps and a
        // wrap gap of (size + 0 - (size - 1)) mod size = 1.
        let report = tomography(4, LargestClusterPolicy::Include)
            .analyse(&filled(4))
            .expect("analysis succeeds");
        assert_eq!(report.gap_statistics.values(), &[0.0, 4.0, 0.0, 0.0]);
        // ℓ = 1: 1 · (g(1) + g(2)) / 8.
        assert_eq!(report.corner, 0.5);
    }

    #[test]
    fn exclusion_changes_only_the_largest_cluster() {
        // 1 1 0 0
        // 0 0 0 0
        // 0 0 0 1
        // 0 0 0 0
        let mut occupancy = vec![0_u8; 16];
        occupancy[0] = 1;
        occupancy[1] = 1;
        occupancy[11] = 1;
        let included = tomography(4, LargestClusterPolicy::Include)
            .analyse(&occupancy)
            .expect("analysis succeeds");
        let excluded = tomography(4, LargestClusterPolicy::Exclude)
            .analyse(&occupancy)
            .expect("analysis succeeds");
        assert_eq!(included.largest_cluster_size, 2);
        assert_eq!(excluded.largest_cluster_size, 2);
        // Every site is its own label once the pair is split, so all gaps
        // are zero-size wrap gaps.
        assert_eq!(excluded.gap_statistics.values(), &[4.0, 0.0, 0.0, 0.0]);
        // The pair shares row 0: one unit gap and one wrap gap of 3.
        assert_eq!(included.gap_statistics.get(1), Some(1.0 / 8.0));
        assert_eq!(included.gap_statistics.get(3), Some(1.0 / 8.0));
    }

    #[test]
    fn analyse_rejects_a_mis_sized_grid() {
        let err = tomography(4, LargestClusterPolicy::Exclude)
            .analyse(&[1_u8; 15])
            .expect_err("shape mismatch");
        assert_eq!(
            err,
            TomographyError::Lattice(LatticeError::ShapeMismatch {
                what: "state array",
                expected: 16,
                got: 15,
            })
        );
    }

    #[test]
    fn membership_groups_particles_by_cluster() {
        // A pair of bins joined across the column edge, two particles in one
        // bin, and a lone particle.
        let positions = [[1.5, 0.5], [1.5, 3.5], [3.2, 2.2], [3.8, 2.9], [0.5, 1.5]];
        let binned = bin_positions(&positions, 4).expect("finite positions");
        let membership = tomography(4, LargestClusterPolicy::Exclude)
            .membership(&binned)
            .expect("membership succeeds");
        assert_eq!(membership.clusters(), &[vec![0, 1], vec![2, 3]]);
        assert_eq!(membership.largest_cluster_size(), 2);
    }

    #[test]
    fn membership_rejects_a_grid_of_another_size() {
        let binned = bin_positions(&[[0.5, 0.5]], 3).expect("finite positions");
        let err = tomography(4, LargestClusterPolicy::Exclude)
            .membership(&binned)
            .expect_err("size mismatch");
        assert_eq!(err.lattice_code().map(|code| code.as_str()), Some("LATTICE_SHAPE_MISMATCH"));
    }
}
