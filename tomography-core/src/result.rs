//! Result types for labeling and tomography operations.
//!
//! Provides the canonical label array produced by the Hoshen–Kopelman
//! labeler, the gap-size histogram, and the per-snapshot tomography report.

use std::collections::HashMap;

/// Canonical cluster label of every lattice site.
///
/// Unreduced labels are root site indices: every member of a cluster carries
/// the flat index of one member of that cluster. Reduced labels are dense
/// identifiers `0..cluster_count` assigned in increasing order of the roots.
///
/// # Examples
/// ```
/// use tomography_core::ClusterLabels;
///
/// let labels = ClusterLabels::from_roots(vec![0, 0, 2, 2, 4]);
/// assert_eq!(labels.cluster_count(), 3);
/// assert_eq!(labels.reduce().as_slice(), &[0, 0, 1, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterLabels {
    labels: Vec<usize>,
    reduced: bool,
}

impl ClusterLabels {
    /// Wraps an already canonical root array.
    #[must_use]
    pub const fn from_roots(labels: Vec<usize>) -> Self {
        Self {
            labels,
            reduced: false,
        }
    }

    /// Returns the labels in site order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.labels
    }

    /// Consumes the wrapper, returning the raw label vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.labels
    }

    /// Number of labeled sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the labels have been renumbered densely.
    #[must_use]
    pub const fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Counts the distinct clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        let mut distinct = self.labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        distinct.len()
    }

    /// Renumbers the labels to `0..cluster_count`, preserving the relative
    /// order of the original label values.
    #[must_use]
    pub fn reduce(self) -> Self {
        if self.reduced {
            return self;
        }
        let mut distinct = self.labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let labels = self
            .labels
            .iter()
            // Every label is present in `distinct`, so the search always hits.
            .map(|label| distinct.binary_search(label).unwrap_or_default())
            .collect();
        Self {
            labels,
            reduced: true,
        }
    }

    /// Returns the most populous cluster.
    ///
    /// Ties resolve to the label whose first site comes earliest. Returns
    /// `None` for an empty array.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::ClusterLabels;
    ///
    /// let labels = ClusterLabels::from_roots(vec![0, 1, 1, 0, 4]);
    /// let largest = labels.largest_cluster().expect("labels are not empty");
    /// assert_eq!((largest.label, largest.size), (0, 2));
    /// ```
    #[must_use]
    pub fn largest_cluster(&self) -> Option<LargestCluster> {
        let mut counts: HashMap<usize, (usize, usize)> = HashMap::new();
        for (position, &label) in self.labels.iter().enumerate() {
            counts.entry(label).or_insert((0, position)).0 += 1;
        }
        counts
            .into_iter()
            .max_by(|(_, (left_size, left_first)), (_, (right_size, right_first))| {
                left_size
                    .cmp(right_size)
                    .then_with(|| right_first.cmp(left_first))
            })
            .map(|(label, (size, _))| LargestCluster { label, size })
    }

    /// Returns a copy of the labels in which every site of `label` carries
    /// its own flat index instead.
    ///
    /// On unreduced labels the substituted values never collide with another
    /// cluster: a site can only be the root of its own cluster.
    #[must_use]
    pub fn with_cluster_isolated(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .map(|(site, &current)| if current == label { site } else { current })
            .collect()
    }
}

/// Label and size of the most populous cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargestCluster {
    /// Label shared by the cluster's sites.
    pub label: usize,
    /// Number of member sites.
    pub size: usize,
}

/// Normalised gap-size histogram `g(s)` indexed by gap size.
#[derive(Debug, Clone, PartialEq)]
pub struct GapHistogram {
    values: Vec<f64>,
}

impl GapHistogram {
    /// Builds a histogram from precomputed values.
    #[must_use]
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Returns `g(s)` for `s` in `0..size`.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns `g(s)`, or `None` when `s` is outside the histogram.
    #[must_use]
    pub fn get(&self, gap: usize) -> Option<f64> {
        self.values.get(gap).copied()
    }

    /// Linear size of the lattice the histogram was computed on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the histogram has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Computes the corner contribution
    /// `Σ_{ℓ<size/2} ℓ · (g(ℓ) + g(size-1-ℓ)) / (2·size)`.
    ///
    /// Small and large gaps are folded together: on a periodic line a gap of
    /// `s` seen one way is a gap of `size - s` seen the other way.
    ///
    /// # Examples
    /// ```
    /// use tomography_core::GapHistogram;
    ///
    /// let histogram = GapHistogram::from_values(vec![0.0, 1.0, 1.0, 0.0]);
    /// // ℓ = 1 contributes 1 · (g(1) + g(2)) = 2, divided by 2 · 4.
    /// assert_eq!(histogram.corner_contribution(), 0.25);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::integer_division,
        reason = "the corner contribution is a floating-point weighted sum over half the lattice"
    )]
    pub fn corner_contribution(&self) -> f64 {
        let size = self.values.len();
        if size == 0 {
            return 0.0;
        }
        let half = size / 2;
        let folded: f64 = self
            .values
            .iter()
            .zip(self.values.iter().rev())
            .take(half)
            .enumerate()
            .map(|(ell, (small, large))| ell as f64 * (small + large))
            .sum();
        folded / (2.0 * size as f64)
    }
}

/// Observables extracted from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TomographyReport {
    /// Corner contribution `C(ℓ)`.
    pub corner: f64,
    /// Gap-size statistics `g(s)`.
    pub gap_statistics: GapHistogram,
    /// Number of sites in the largest cluster.
    pub largest_cluster_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::already_dense(vec![0, 1, 1, 2], vec![0, 1, 1, 2])]
    #[case::sparse_roots(vec![0, 1, 1, 3, 1, 5, 5, 1], vec![0, 1, 1, 2, 1, 3, 3, 1])]
    #[case::unsorted(vec![7, 2, 7, 2], vec![1, 0, 1, 0])]
    fn reduce_renumbers_by_sorted_value(#[case] roots: Vec<usize>, #[case] expected: Vec<usize>) {
        let reduced = ClusterLabels::from_roots(roots).reduce();
        assert!(reduced.is_reduced());
        assert_eq!(reduced.as_slice(), expected.as_slice());
    }

    #[test]
    fn largest_cluster_prefers_first_seen_on_ties() {
        let labels = ClusterLabels::from_roots(vec![3, 3, 0, 0, 5]);
        let largest = labels.largest_cluster().expect("non-empty");
        assert_eq!(largest, LargestCluster { label: 3, size: 2 });
    }

    #[test]
    fn largest_cluster_of_empty_labels_is_none() {
        assert!(ClusterLabels::from_roots(Vec::new()).largest_cluster().is_none());
    }

    #[test]
    fn isolation_replaces_members_with_site_indices() {
        let labels = ClusterLabels::from_roots(vec![0, 0, 2, 0]);
        assert_eq!(labels.with_cluster_isolated(0), vec![0, 1, 2, 3]);
        assert_eq!(labels.with_cluster_isolated(2), vec![0, 0, 2, 0]);
    }

    #[rstest]
    #[case::empty(vec![], 0.0)]
    #[case::only_zero_gaps(vec![4.0, 0.0, 0.0, 0.0], 0.0)]
    #[case::odd_size(vec![0.0, 2.0, 0.0, 0.0, 0.0], 0.2)]
    fn corner_contribution_cases(#[case] values: Vec<f64>, #[case] expected: f64) {
        let histogram = GapHistogram::from_values(values);
        assert!((histogram.corner_contribution() - expected).abs() < 1e-12);
    }
}
