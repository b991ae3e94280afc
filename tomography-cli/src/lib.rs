//! Support library for the `tomography` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and tests can
//! drive the commands without spawning a subprocess.

pub mod cli;
pub mod logging;
