//! Benchmark support crate for tomography.
//!
//! Provides seeded synthetic lattices and particle clouds plus parameter
//! types used by the Criterion benchmarks for bond extraction, cluster
//! labeling, and the full tomography pipeline.

pub mod error;
pub mod params;
pub mod source;
