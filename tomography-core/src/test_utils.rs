//! Shared test utilities for `tomography-core`.

use proptest::test_runner::Config as ProptestConfig;
use tomography_test_support::ci::property_test_profile::ProptestRunProfile;

/// Builds the proptest configuration for a property suite, honouring the
/// `PROGTEST_CASES` and `TOMOGRAPHY_PBT_FORK` overrides.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Occupancy grid with every site set.
#[must_use]
pub(crate) fn filled(size: usize) -> Vec<u8> {
    vec![1; size * size]
}
