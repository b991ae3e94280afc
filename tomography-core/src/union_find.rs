//! Union-find substrate for Hoshen–Kopelman labeling.
//!
//! Every site starts as its own representative (`labels[i] == i`). Unions
//! write roots into the label array explicitly; [`find`] only walks parent
//! links and never compresses paths, so the array a caller observes is
//! exactly the one produced by its own writes. The lexicographic sweep keeps
//! chains short, so there is no union by rank.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{LatticeError, Result};

/// Follows `labels[x]` until reaching a fixed point and returns that root.
///
/// # Errors
/// Returns [`LatticeError::InvariantViolation`] when a link points outside
/// the array or the chain is longer than the array, which can only happen if
/// the labels are corrupt.
///
/// # Examples
/// ```
/// use tomography_core::find;
///
/// let labels = [0, 0, 1, 3];
/// assert_eq!(find(&labels, 2)?, 0);
/// assert_eq!(find(&labels, 3)?, 3);
/// # Ok::<(), tomography_core::LatticeError>(())
/// ```
pub fn find(labels: &[usize], x: usize) -> Result<usize> {
    let sites = labels.len();
    let mut current = x;
    for _ in 0..=sites {
        let parent = *labels.get(current).ok_or(LatticeError::InvariantViolation {
            invariant: "label link must address a site",
            index: current,
            sites,
        })?;
        if parent == current {
            return Ok(current);
        }
        current = parent;
    }
    Err(LatticeError::InvariantViolation {
        invariant: "label chain must terminate at a root",
        index: x,
        sites,
    })
}

/// Mutable label buffer owned by one labeling call.
#[derive(Clone, Debug)]
pub(crate) struct LabelForest {
    labels: Vec<usize>,
}

impl LabelForest {
    pub(crate) fn new(sites: usize) -> Self {
        Self {
            labels: (0..sites).collect(),
        }
    }

    pub(crate) fn find(&self, x: usize) -> Result<usize> {
        find(&self.labels, x)
    }

    /// Points `site` at `target`. Used for the primary union of a site visit,
    /// where `site` is still its own root.
    pub(crate) fn attach(&mut self, site: usize, target: usize) -> Result<()> {
        let sites = self.labels.len();
        let slot = self
            .labels
            .get_mut(site)
            .ok_or(LatticeError::InvariantViolation {
                invariant: "attached site must exist",
                index: site,
                sites,
            })?;
        *slot = target;
        Ok(())
    }

    /// Merges the class of `child` into the class of `parent` by linking
    /// their roots.
    pub(crate) fn link(&mut self, child: usize, parent: usize) -> Result<()> {
        let child_root = self.find(child)?;
        let parent_root = self.find(parent)?;
        self.attach(child_root, parent_root)
    }

    /// Resolves every entry to its final root.
    #[cfg(not(feature = "parallel"))]
    pub(crate) fn canonicalise(&mut self) -> Result<()> {
        for index in 0..self.labels.len() {
            let root = self.find(index)?;
            self.attach(index, root)?;
        }
        Ok(())
    }

    /// Resolves every entry to its final root.
    ///
    /// Roots are computed from an immutable snapshot, which is equivalent to
    /// the in-place pass because [`find`] never mutates.
    #[cfg(feature = "parallel")]
    pub(crate) fn canonicalise(&mut self) -> Result<()> {
        let labels = &self.labels;
        let roots = (0..labels.len())
            .into_par_iter()
            .map(|index| find(labels, index))
            .collect::<Result<Vec<_>>>()?;
        self.labels = roots;
        Ok(())
    }

    pub(crate) fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}
