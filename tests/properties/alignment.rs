//! Tests for timestamp alignment.

use lutfit_rs::align::{align, align_measurements, locate, UnmatchedPolicy};
use lutfit_rs::measurement::MeasurementSet;
use ndarray::array;

use crate::test_helpers::timeline;

#[test]
fn unmatched_timestamp_defaults_to_index_zero() {
    let idx = align(array![2.0, 5.0, 5.0, 11.0].view(), timeline(10).view());
    assert_eq!(idx, vec![2, 5, 5, 0]);
}

#[test]
fn explicit_outcome_distinguishes_index_zero_from_a_miss() {
    let slots = locate(array![0.0, 11.0].view(), timeline(10).view());
    assert_eq!(slots, vec![Some(0), None]);

    // The aliased form cannot tell the two apart.
    let idx = align(array![0.0, 11.0].view(), timeline(10).view());
    assert_eq!(idx, vec![0, 0]);
}

#[test]
fn unsorted_and_repeated_timestamps() {
    let idx = align(array![9.0, 1.0, 9.0, 3.0].view(), timeline(10).view());
    assert_eq!(idx, vec![9, 1, 9, 3]);
}

#[test]
fn alignment_length_matches_measurements() {
    let set = MeasurementSet::unweighted(array![7.0, 2.0, 40.0], array![0.0, 0.0, 0.0]).unwrap();
    for policy in [UnmatchedPolicy::AliasFirst, UnmatchedPolicy::Drop] {
        let aligned = align_measurements(&set, timeline(10).view(), policy).unwrap();
        assert_eq!(aligned.indices.len(), aligned.values.len());
        assert_eq!(aligned.indices.len(), aligned.weights.len());
        assert_eq!(aligned.unmatched, vec![2]);
    }
}
