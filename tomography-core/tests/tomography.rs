mod common;

use common::occupancy;
use rstest::{fixture, rstest};
use tomography_core::{
    BondRule, LargestClusterPolicy, LatticeError, TomographyBuilder, TomographyError,
    bin_positions,
};
use tomography_test_support::tracing::RecordingLayer;
use tracing::Level;

/// Vertical bar filling column 0 of a 4 × 4 grid.
#[fixture]
fn bar() -> Vec<u8> {
    occupancy(4, &[(0, 0), (1, 0), (2, 0), (3, 0)])
}

#[rstest]
#[case::include(LargestClusterPolicy::Include, vec![3.5, 0.5, 0.0, 0.0], 0.0625)]
#[case::exclude(LargestClusterPolicy::Exclude, vec![4.0, 0.0, 0.0, 0.0], 0.0)]
fn bar_observables(
    bar: Vec<u8>,
    #[case] policy: LargestClusterPolicy,
    #[case] gaps: Vec<f64>,
    #[case] corner: f64,
) {
    let tomography = TomographyBuilder::new()
        .with_size(4)
        .with_largest_cluster(policy)
        .build()
        .expect("valid configuration");
    let report = tomography.analyse(&bar).expect("analysis succeeds");
    assert_eq!(report.largest_cluster_size, 4);
    assert_eq!(report.gap_statistics.values(), gaps.as_slice());
    assert_eq!(report.corner, corner);
}

#[rstest]
fn open_boundaries_drop_the_wrap_gaps(bar: Vec<u8>) {
    let tomography = TomographyBuilder::new()
        .with_size(4)
        .with_boundaries("oo")
        .with_largest_cluster(LargestClusterPolicy::Include)
        .build()
        .expect("valid configuration");
    let report = tomography.analyse(&bar).expect("analysis succeeds");
    assert_eq!(report.largest_cluster_size, 4);
    assert_eq!(report.gap_statistics.values(), &[0.0, 0.375, 0.0, 0.0]);
}

#[test]
fn same_state_rule_clusters_vacant_sites() {
    let tomography = TomographyBuilder::new()
        .with_size(3)
        .with_bond_rule(BondRule::SameState)
        .build()
        .expect("valid configuration");
    let report = tomography
        .analyse(&[0_u8; 9])
        .expect("analysis succeeds");
    assert_eq!(report.largest_cluster_size, 9);
}

#[rstest]
fn analyse_records_nested_spans(bar: Vec<u8>) {
    let tomography = TomographyBuilder::new()
        .with_size(4)
        .build()
        .expect("valid configuration");
    let (layer, _guard) = RecordingLayer::install();
    tomography.analyse(&bar).expect("analysis succeeds");

    let analyse = layer.span_named("core.analyse").expect("core.analyse span");
    assert_eq!(analyse.field("size"), Some("4"));
    assert_eq!(analyse.field("sites"), Some("16"));
    assert_eq!(analyse.field("largest_cluster"), Some("exclude"));
    assert_eq!(analyse.field("rule"), Some("one"));

    let bonds = layer
        .span_named("core.extract_bonds")
        .expect("core.extract_bonds span");
    assert_eq!(bonds.field("sites"), Some("16"));

    let labeling = layer
        .span_named("core.label_clusters")
        .expect("core.label_clusters span");
    assert_eq!(labeling.field("shape"), Some("[4, 4]"));
    assert_eq!(labeling.field("boundaries"), Some("pp"));
    assert_eq!(labeling.field("reduce"), Some("false"));

    let gaps = layer
        .span_named("core.gap_statistics")
        .expect("core.gap_statistics span");
    assert_eq!(gaps.field("boundary"), Some("p"));
    assert_eq!(gaps.field("directions"), Some("Both"));

    let completed = layer.events_with_message("labeling completed");
    assert_eq!(completed.len(), 1);
    // One bar plus twelve vacant singletons.
    assert_eq!(
        completed[0].fields.get("clusters").map(String::as_str),
        Some("13")
    );
}

#[test]
fn failures_are_logged_on_the_failing_span() {
    let tomography = TomographyBuilder::new()
        .with_size(4)
        .build()
        .expect("valid configuration");
    let (layer, _guard) = RecordingLayer::install();
    let err = tomography.analyse(&[1_u8; 3]).expect_err("grid is too small");
    assert_eq!(
        err,
        TomographyError::Lattice(LatticeError::ShapeMismatch {
            what: "state array",
            expected: 16,
            got: 3,
        })
    );

    assert!(layer.span_named("core.label_clusters").is_none());
    assert!(layer.events().iter().any(|event| {
        event.level == Level::ERROR
            && event
                .fields
                .get("error")
                .is_some_and(|value| value.contains("state array has 3 entries"))
    }));
}

#[test]
fn membership_round_trip_from_positions() {
    let tomography = TomographyBuilder::new()
        .with_size(4)
        .build()
        .expect("valid configuration");
    // Particles 0-2 sit in a horizontal run on row 1; particle 3 wraps onto
    // the run's right-hand neighbour at column 3; particle 4 is isolated.
    let positions = [[1.2, 0.4], [1.7, 1.1], [1.1, 2.9], [5.5, -0.5], [3.5, 1.5]];
    let binned = bin_positions(&positions, 4).expect("finite positions");
    let membership = tomography.membership(&binned).expect("membership succeeds");
    assert_eq!(membership.clusters(), &[vec![0, 1, 2, 3]]);
    assert_eq!(membership.largest_cluster_size(), 4);
    assert_eq!(membership.flatten(), vec![0, 1, 2, 3]);
}
