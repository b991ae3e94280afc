//! Generalised Hoshen–Kopelman cluster labeling.
//!
//! The labeler sweeps every site of an n-dimensional lattice once in
//! lexicographic order (slowest axis first) and merges equivalence classes
//! through the union-find substrate:
//!
//! - a site is attached to the class of its predecessor along the first axis
//!   on which it has both a non-zero coordinate and an active bond;
//! - bonds along later axes of the same site are folded in as cross-terms
//!   that link the later predecessor's root to the site's root;
//! - periodic axes are closed afterwards by linking each face site to its
//!   image at the far end of the axis;
//! - finally every entry is resolved to its root.
//!
//! A site's axes are scanned only until the first primary union. Axes whose
//! bond is inactive do not stop the scan, so every in-sweep bond is honoured
//! exactly once.

use tracing::{debug, instrument};

use crate::{
    bonds::Bonds,
    error::{LatticeError, Result},
    lattice::Lattice,
    result::ClusterLabels,
    union_find::LabelForest,
};

/// Labels the clusters described by `bonds` on `lattice`.
///
/// When `reduce` is set the roots are renumbered to `0..cluster_count` in
/// increasing root order; otherwise each site carries the flat index of its
/// cluster's root.
///
/// # Errors
/// Returns [`LatticeError::BondAxisMismatch`] when `bonds` does not cover the
/// lattice axes, [`LatticeError::ShapeMismatch`] when its shape differs from
/// the lattice shape, and [`LatticeError::InvariantViolation`] if root
/// resolution meets a corrupt label array.
///
/// # Examples
/// ```
/// use tomography_core::{Bonds, Lattice, label_clusters};
///
/// let lattice = Lattice::with_boundary_str(vec![4], "p")?;
/// let bonds = Bonds::from_axes(vec![4], vec![vec![false, true, false, true]])?;
/// let labels = label_clusters(&bonds, &lattice, false)?;
/// assert_eq!(labels.as_slice(), &[0, 0, 2, 2]);
/// # Ok::<(), tomography_core::LatticeError>(())
/// ```
#[instrument(
    name = "core.label_clusters",
    err,
    skip(bonds, lattice),
    fields(
        shape = ?lattice.shape(),
        boundaries = %boundary_string(lattice),
        reduce = reduce,
    ),
)]
pub fn label_clusters(bonds: &Bonds, lattice: &Lattice, reduce: bool) -> Result<ClusterLabels> {
    validate(bonds, lattice)?;

    let mut forest = LabelForest::new(lattice.sites());
    sweep(&mut forest, bonds, lattice)?;
    close_periodic_axes(&mut forest, bonds, lattice)?;
    forest.canonicalise()?;

    let labels = ClusterLabels::from_roots(forest.into_labels());
    let labels = if reduce { labels.reduce() } else { labels };
    debug!(clusters = labels.cluster_count(), "labeling completed");
    Ok(labels)
}

fn boundary_string(lattice: &Lattice) -> String {
    lattice.boundaries().iter().map(|bc| bc.as_char()).collect()
}

fn validate(bonds: &Bonds, lattice: &Lattice) -> Result<()> {
    if bonds.dimensions() != lattice.dimensions() {
        return Err(LatticeError::BondAxisMismatch {
            expected: lattice.dimensions(),
            got: bonds.dimensions(),
        });
    }
    if bonds.shape() != lattice.shape() {
        let got = bonds.shape().iter().product();
        return Err(LatticeError::ShapeMismatch {
            what: "bond shape",
            expected: lattice.sites(),
            got,
        });
    }
    Ok(())
}

fn sweep(forest: &mut LabelForest, bonds: &Bonds, lattice: &Lattice) -> Result<()> {
    let strides = lattice.strides();
    for (coords, site) in lattice.coordinates() {
        let mut axes = coords.iter().zip(strides).enumerate();
        while let Some((axis, (&coord, &stride))) = axes.next() {
            if coord == 0 || !bonds.is_active(axis, site) {
                continue;
            }

            let root = forest.find(site - stride)?;
            forest.attach(site, root)?;

            for (later, (&later_coord, &later_stride)) in axes.by_ref() {
                if later_coord != 0 && bonds.is_active(later, site) {
                    forest.link(site - later_stride, site)?;
                }
            }
            break;
        }
    }
    Ok(())
}

fn close_periodic_axes(forest: &mut LabelForest, bonds: &Bonds, lattice: &Lattice) -> Result<()> {
    let periodic = lattice
        .boundaries()
        .iter()
        .enumerate()
        .filter(|(_, boundary)| boundary.is_periodic());
    for (axis, _) in periodic {
        let (Some(&stride), Some(&len)) = (lattice.strides().get(axis), lattice.shape().get(axis))
        else {
            continue;
        };
        for (coords, _) in lattice.face(axis) {
            let site = lattice.flat_index(&coords);
            if bonds.is_active(axis, site) {
                forest.link(site + stride * (len - 1), site)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod property;
