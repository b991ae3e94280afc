//! Benchmark setup error type.
//!
//! Lets setup helpers propagate failures with `?` instead of `.expect()`.

use crate::source::SyntheticError;
use tomography_core::{LatticeError, TomographyError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic data generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Lattice construction or labeling failed.
    #[error("lattice operation failed: {0}")]
    Lattice(#[from] LatticeError),
    /// Tomography configuration or analysis failed.
    #[error("tomography operation failed: {0}")]
    Tomography(#[from] TomographyError),
}
