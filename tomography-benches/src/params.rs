//! Benchmark parameter types.

use std::fmt;

/// Parameters for a labeling or analysis benchmark run.
#[derive(Clone, Debug)]
pub struct LatticeBenchParams {
    /// Linear system size.
    pub size: usize,
    /// Percentage of occupied sites.
    pub density_percent: u8,
}

impl fmt::Display for LatticeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L={},p={}%", self.size, self.density_percent)
    }
}

/// Parameters for a binning or membership benchmark run.
#[derive(Clone, Debug)]
pub struct ParticleBenchParams {
    /// Number of particles in the cloud.
    pub particle_count: usize,
    /// Linear system size.
    pub size: usize,
}

impl fmt::Display for ParticleBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},L={}", self.particle_count, self.size)
    }
}
