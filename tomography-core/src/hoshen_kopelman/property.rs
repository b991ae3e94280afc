//! Property-based checks of the labeler against a breadth-first oracle.
//!
//! Random lattices of up to three axes with random bonds and boundary
//! conditions are labeled, and the resulting partition is compared with the
//! connected components found by walking the same bond graph explicitly.

use std::collections::VecDeque;

use proptest::prelude::*;

use crate::{
    bonds::Bonds,
    lattice::{Boundary, Lattice},
    test_utils::suite_proptest_config,
    union_find::find,
};

use super::label_clusters;

#[derive(Debug, Clone)]
struct LatticeFixture {
    shape: Vec<usize>,
    boundaries: Vec<Boundary>,
    bonds: Vec<Vec<bool>>,
}

fn boundary_strategy() -> impl Strategy<Value = Boundary> {
    prop_oneof![Just(Boundary::Open), Just(Boundary::Periodic)]
}

fn fixture_strategy() -> impl Strategy<Value = LatticeFixture> {
    prop::collection::vec(1_usize..=5, 1..=3)
        .prop_flat_map(|shape| {
            let sites: usize = shape.iter().product();
            let dims = shape.len();
            (
                Just(shape),
                prop::collection::vec(boundary_strategy(), dims),
                prop::collection::vec(prop::collection::vec(any::<bool>(), sites), dims),
            )
        })
        .prop_map(|(shape, boundaries, bonds)| LatticeFixture {
            shape,
            boundaries,
            bonds,
        })
}

/// Lists every bond the labeler is expected to honour as an undirected edge.
fn edges(lattice: &Lattice, bonds: &Bonds) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for (coords, site) in lattice.coordinates() {
        for (axis, &coord) in coords.iter().enumerate() {
            if !bonds.is_active(axis, site) {
                continue;
            }
            let stride = lattice.strides()[axis];
            if coord != 0 {
                edges.push((site, site - stride));
            } else if lattice.boundaries()[axis].is_periodic() {
                edges.push((site, site + stride * (lattice.shape()[axis] - 1)));
            }
        }
    }
    edges
}

fn components(sites: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut adjacency = vec![Vec::new(); sites];
    for &(left, right) in edges {
        adjacency[left].push(right);
        adjacency[right].push(left);
    }
    let mut component = vec![usize::MAX; sites];
    for start in 0..sites {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = start;
        let mut queue = VecDeque::from([start]);
        while let Some(site) = queue.pop_front() {
            for &next in &adjacency[site] {
                if component[next] == usize::MAX {
                    component[next] = start;
                    queue.push_back(next);
                }
            }
        }
    }
    component
}

fn build(fixture: &LatticeFixture) -> (Lattice, Bonds) {
    let lattice = Lattice::new(fixture.shape.clone(), fixture.boundaries.clone())
        .expect("fixture shapes are valid");
    let bonds =
        Bonds::from_axes(fixture.shape.clone(), fixture.bonds.clone()).expect("fixture bonds");
    (lattice, bonds)
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn partition_matches_connected_components(fixture in fixture_strategy()) {
        let (lattice, bonds) = build(&fixture);
        let labels = label_clusters(&bonds, &lattice, false).expect("labeling succeeds");
        let oracle = components(lattice.sites(), &edges(&lattice, &bonds));
        let labels = labels.as_slice();
        for left in 0..lattice.sites() {
            for right in 0..lattice.sites() {
                prop_assert_eq!(
                    labels[left] == labels[right],
                    oracle[left] == oracle[right],
                    "sites {} and {} disagree",
                    left,
                    right
                );
            }
        }
    }

    #[test]
    fn canonical_labels_are_idempotent(fixture in fixture_strategy()) {
        let (lattice, bonds) = build(&fixture);
        let labels = label_clusters(&bonds, &lattice, false).expect("labeling succeeds");
        let labels = labels.as_slice();
        let resolved: Vec<usize> = (0..labels.len())
            .map(|site| find(labels, site).expect("labels resolve"))
            .collect();
        prop_assert_eq!(resolved.as_slice(), labels);
    }

    #[test]
    fn reduced_labels_are_a_bijection_onto_a_dense_range(fixture in fixture_strategy()) {
        let (lattice, bonds) = build(&fixture);
        let roots = label_clusters(&bonds, &lattice, false).expect("labeling succeeds");
        let reduced = label_clusters(&bonds, &lattice, true).expect("labeling succeeds");
        let count = roots.cluster_count();
        prop_assert_eq!(reduced.cluster_count(), count);
        prop_assert!(reduced.as_slice().iter().all(|&label| label < count));
        for site in 0..roots.len() {
            for other in 0..roots.len() {
                prop_assert_eq!(
                    roots.as_slice()[site] == roots.as_slice()[other],
                    reduced.as_slice()[site] == reduced.as_slice()[other]
                );
            }
        }
    }
}
