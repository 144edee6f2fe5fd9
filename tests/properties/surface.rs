//! Properties of the weighted RMSE surface.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use lutfit_rs::align::UnmatchedPolicy;
use lutfit_rs::grid::ParameterGrid;
use lutfit_rs::measurement::MeasurementSet;
use lutfit_rs::surface::{find_minimum, lut_rmse, EvalStrategy, RmseSurface};
use lutfit_rs::{LutError, QuadraticModel};
use ndarray::{array, Array1};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::test_helpers::{noiseless, random_measurements, small_grid, timeline};

#[test]
fn surface_is_non_negative() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let grid = ParameterGrid::from_axes(
        Array1::linspace(-5.0, 5.0, 7),
        Array1::linspace(-0.01, 0.01, 9),
    )
    .unwrap();

    for _ in 0..20 {
        let meas = random_measurements(&mut rng, 12, 30);
        for strategy in [EvalStrategy::Vectorized, EvalStrategy::Parallel] {
            let rmse = RmseSurface::new(QuadraticModel)
                .with_strategy(strategy)
                .evaluate(&grid, timeline(30).view(), &meas)
                .unwrap();
            assert!(rmse.iter().all(|&v| v >= 0.0));
        }
    }
}

#[test]
fn noiseless_measurements_vanish_at_true_cell() {
    let grid = small_grid();
    let meas = noiseless(array![1.0, 3.0, 6.0, 9.0], 10.0, 0.001);

    let rmse = lut_rmse(&grid, timeline(10).view(), &meas).unwrap();
    assert_eq!(rmse[[2, 2]], 0.0);
    for ((i, j), &v) in rmse.indexed_iter() {
        if (i, j) != (2, 2) {
            assert!(v > 0.0, "cell ({i}, {j}) should be positive, got {v}");
        }
    }
}

#[test]
fn perturbing_a_measurement_increases_rmse_at_true_cell() {
    let grid = small_grid();
    let meas = noiseless(array![0.0, 4.0, 8.0], 5.0, 0.0005);
    let base = lut_rmse(&grid, timeline(10).view(), &meas).unwrap()[[1, 1]];

    for delta in [1e-3, -0.5, 2.0] {
        let perturbed = meas.with_value(1, meas.values()[1] + delta).unwrap();
        let rmse = lut_rmse(&grid, timeline(10).view(), &perturbed).unwrap()[[1, 1]];
        assert!(rmse > base, "delta {delta}: {rmse} should exceed {base}");
    }
}

#[test]
fn scaling_weights_scales_surface() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let meas = random_measurements(&mut rng, 8, 10);
    let base = lut_rmse(&small_grid(), timeline(10).view(), &meas).unwrap();

    for c in [0.5, 3.0, 1e3] {
        let scaled = lut_rmse(
            &small_grid(),
            timeline(10).view(),
            &meas.with_scaled_weights(c),
        )
        .unwrap();
        for (&s, &b) in scaled.iter().zip(base.iter()) {
            assert_relative_eq!(s, c * b, max_relative = 1e-12);
        }
    }
}

#[test]
fn surface_shape_follows_grid() {
    let grid = ParameterGrid::from_axes(array![0.0, 1.0, 2.0], array![0.0, 0.1, 0.2, 0.3]).unwrap();
    let meas = MeasurementSet::new(
        array![0.0, 1.0, 2.0, 5.0, 7.0, 9.0],
        array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        array![1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    )
    .unwrap();

    let rmse = lut_rmse(&grid, timeline(10).view(), &meas).unwrap();
    assert_eq!(rmse.shape(), &[3, 4]);
}

#[test]
fn end_to_end_three_by_three() {
    let grid = small_grid();
    let meas = noiseless(array![0.0, 4.0, 8.0], 5.0, 0.0005);

    for strategy in [EvalStrategy::Vectorized, EvalStrategy::Parallel] {
        let rmse = RmseSurface::new(QuadraticModel)
            .with_strategy(strategy)
            .evaluate(&grid, timeline(10).view(), &meas)
            .unwrap();
        let best = find_minimum(&rmse, &grid).unwrap();

        assert_eq!(best.cell, (1, 1));
        assert_eq!(best.flat_index, 4);
        assert_abs_diff_eq!(best.rmse, 0.0, epsilon = 1e-12);
        assert_eq!(best.params(), [5.0, 0.0005]);
    }
}

#[test]
fn weights_emphasize_measurements() {
    // One measurement sits on p0 = 0, the other on p0 = 10. The heavier weight wins.
    let grid = ParameterGrid::from_axes(array![0.0, 10.0], array![0.0]).unwrap();
    let meas = MeasurementSet::new(array![1.0, 2.0], array![0.0, 10.0], array![1.0, 4.0]).unwrap();

    let rmse = lut_rmse(&grid, timeline(5).view(), &meas).unwrap();
    assert_eq!(find_minimum(&rmse, &grid).unwrap().cell, (1, 0));
}

/// Known limitation: with the default policy a timestamp missing from the
/// timeline is scored against the model at `timeline[0]`, which skews the
/// surface instead of failing.
#[test]
fn aliased_timestamp_skews_surface() {
    let grid = small_grid();
    let clean = noiseless(array![0.0, 4.0, 8.0], 5.0, 0.0005);
    let with_stray = MeasurementSet::unweighted(
        array![0.0, 4.0, 8.0, 20.0],
        array![5.0, 5.008, 5.032, 5.2],
    )
    .unwrap();

    let before = lut_rmse(&grid, timeline(10).view(), &clean).unwrap();
    let after = lut_rmse(&grid, timeline(10).view(), &with_stray).unwrap();
    assert_eq!(before[[1, 1]], 0.0);
    assert!(after[[1, 1]] > 0.09);

    // t = 20 was compared against model(0) = p0, i.e. residual 0.2 at (1, 1).
    assert_relative_eq!(after[[1, 1]], (0.2f64 * 0.2 / 4.0).sqrt(), max_relative = 1e-9);
}

#[test]
fn drop_policy_matches_evaluating_only_matched_measurements() {
    let grid = small_grid();
    let with_stray = MeasurementSet::new(
        array![0.0, 20.0, 4.0, 8.0],
        array![5.1, 7.0, 4.9, 5.3],
        array![1.0, 2.0, 0.5, 1.5],
    )
    .unwrap();
    let matched = MeasurementSet::new(
        array![0.0, 4.0, 8.0],
        array![5.1, 4.9, 5.3],
        array![1.0, 0.5, 1.5],
    )
    .unwrap();

    let dropped = RmseSurface::new(QuadraticModel)
        .with_unmatched_policy(UnmatchedPolicy::Drop)
        .evaluate(&grid, timeline(10).view(), &with_stray)
        .unwrap();
    let expected = lut_rmse(&grid, timeline(10).view(), &matched).unwrap();

    for (&a, &b) in dropped.iter().zip(expected.iter()) {
        assert_relative_eq!(a, b, max_relative = 1e-12);
    }
}

#[test]
fn reject_policy_fails_the_run() {
    let meas = noiseless(array![0.0, 20.0], 5.0, 0.0005);
    let result = RmseSurface::new(QuadraticModel)
        .with_unmatched_policy(UnmatchedPolicy::Reject)
        .evaluate(&small_grid(), timeline(10).view(), &meas);

    match result {
        Err(LutError::UnmatchedTimestamp { index, timestamp }) => {
            assert_eq!(index, 1);
            assert_eq!(timestamp, 20.0);
        }
        other => panic!("expected UnmatchedTimestamp, got {other:?}"),
    }
}
