//! Bond extraction and Hoshen–Kopelman labeling benchmarks.
//!
//! Measures the two stages separately on seeded percolation lattices near
//! and away from the square-lattice site threshold, so the union-find cost
//! of spanning clusters shows up against the sparse baseline.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use tomography_benches::{
    params::LatticeBenchParams,
    source::{LatticeConfig, SyntheticLattice},
};
use tomography_core::{Boundary, BondRule, Lattice, extract_bonds, label_clusters};

/// Seed used for all synthetic lattices in this benchmark.
const SEED: u64 = 42;

/// Linear lattice sizes to benchmark.
const SIZES: &[usize] = &[64, 256, 512];

/// Occupation percentages: sparse, near threshold, and dense.
const DENSITIES: &[u8] = &[30, 59, 80];

fn lattice(size: usize, density_percent: u8) -> SyntheticLattice {
    SyntheticLattice::generate(&LatticeConfig {
        size,
        density_percent,
        seed: SEED,
    })
    .expect("synthetic lattice generation must succeed")
}

fn bond_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("bond_extraction");
    group.sample_size(20);

    for &size in SIZES {
        let grid = lattice(size, 59);
        let shape = [size, size];
        let params = LatticeBenchParams {
            size,
            density_percent: 59,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            grid.occupancy(),
            |b, occupancy| {
                b.iter(|| {
                    extract_bonds(occupancy, &shape, BondRule::Occupied)
                        .expect("bond extraction must succeed")
                });
            },
        );
    }

    group.finish();
}

fn cluster_labeling(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_labeling");
    group.sample_size(20);

    for &size in SIZES {
        let periodic = Lattice::square(size, [Boundary::Periodic, Boundary::Periodic])
            .expect("square lattice must be valid");
        for &density_percent in DENSITIES {
            let grid = lattice(size, density_percent);
            let bonds = extract_bonds(grid.occupancy(), &[size, size], BondRule::Occupied)
                .expect("bond extraction must succeed");
            let params = LatticeBenchParams {
                size,
                density_percent,
            };
            group.bench_with_input(BenchmarkId::from_parameter(&params), &bonds, |b, harvested| {
                b.iter(|| label_clusters(harvested, &periodic, false).expect("labeling must succeed"));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bond_extraction, cluster_labeling);
criterion_main!(benches);
