//! Cluster tomography core library.
//!
//! Labels clusters on n-dimensional hypercubic lattices with the
//! Hoshen–Kopelman algorithm and reduces two-dimensional label grids to the
//! gap-size statistics and corner contribution used by spatial cluster
//! tomography.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod binning;
mod bonds;
mod builder;
mod error;
mod gap_stats;
mod hoshen_kopelman;
mod lattice;
mod membership;
mod result;
mod tomography;
mod union_find;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    binning::{BinnedConfiguration, bin_positions},
    bonds::{BondRule, Bonds, extract_bonds},
    builder::{DEFAULT_BOUNDARIES, DEFAULT_SIZE, LargestClusterPolicy, TomographyBuilder},
    error::{LatticeError, LatticeErrorCode, Result, TomographyError, TomographyErrorCode},
    gap_stats::{GapDirections, gap_statistics},
    hoshen_kopelman::label_clusters,
    lattice::{Boundary, Lattice, Odometer},
    membership::{ClusterMembership, MEMBERSHIP_SEPARATOR},
    result::{ClusterLabels, GapHistogram, LargestCluster, TomographyReport},
    tomography::Tomography,
    union_find::find,
};
