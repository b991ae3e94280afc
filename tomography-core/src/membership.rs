//! Per-particle cluster membership.
//!
//! Membership lists are the input of temporal tomography: the same particle
//! index identifies a particle across snapshots, so comparing the groups of
//! consecutive snapshots shows how clusters persist.

use std::collections::BTreeMap;

/// Separator between clusters in the flattened membership list.
pub const MEMBERSHIP_SEPARATOR: i64 = -1;

/// Particle indices grouped by cluster for one snapshot.
///
/// Groups are ordered by cluster label; particles inside a group keep their
/// input order. Clusters holding fewer than two particles are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterMembership {
    clusters: Vec<Vec<usize>>,
    largest_cluster_size: usize,
}

impl ClusterMembership {
    /// Groups particles by the label of the bin each one occupies.
    ///
    /// Particles whose bin lies outside `labels` are ignored.
    pub(crate) fn from_particle_bins(
        labels: &[usize],
        particle_bins: &[usize],
        largest_cluster_size: usize,
    ) -> Self {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (particle, &bin) in particle_bins.iter().enumerate() {
            if let Some(&label) = labels.get(bin) {
                groups.entry(label).or_default().push(particle);
            }
        }
        let clusters = groups
            .into_values()
            .filter(|members| members.len() > 1)
            .collect();
        Self {
            clusters,
            largest_cluster_size,
        }
    }

    /// Particle groups, one per retained cluster.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Site count of the largest cluster on the lattice.
    ///
    /// This counts bins, not particles, and includes clusters dropped from
    /// [`ClusterMembership::clusters`].
    #[must_use]
    pub fn largest_cluster_size(&self) -> usize {
        self.largest_cluster_size
    }

    /// Flattens the groups into one list with [`MEMBERSHIP_SEPARATOR`]
    /// between consecutive clusters.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::{MEMBERSHIP_SEPARATOR, Tomography, TomographyBuilder, bin_positions};
    ///
    /// let tomography = TomographyBuilder::new().with_size(4).build()?;
    /// let binned = bin_positions(&[[0.5, 0.5], [0.5, 1.5], [2.5, 2.5], [2.5, 2.7]], 4)?;
    /// let membership = tomography.membership(&binned)?;
    /// assert_eq!(membership.flatten(), vec![0, 1, MEMBERSHIP_SEPARATOR, 2, 3]);
    /// # Ok::<(), tomography_core::TomographyError>(())
    /// ```
    #[must_use]
    pub fn flatten(&self) -> Vec<i64> {
        let mut flat = Vec::new();
        for (position, cluster) in self.clusters.iter().enumerate() {
            if position > 0 {
                flat.push(MEMBERSHIP_SEPARATOR);
            }
            flat.extend(
                cluster
                    .iter()
                    .filter_map(|&particle| i64::try_from(particle).ok()),
            );
        }
        flat
    }
}
