//! End-to-end grid searches.

use approx::assert_abs_diff_eq;
use lutfit_rs::grid::{gen_lut, GridConfig};
use lutfit_rs::measurement::{gen_meas, gen_meas_with, MeasurementConfig, NoiseKind};
use lutfit_rs::model::GridModel;
use lutfit_rs::runner::{run, RunConfig};
use lutfit_rs::surface::{find_minimum, EvalStrategy, RmseSurface};
use ndarray::Array1;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn coarse_config() -> RunConfig {
    RunConfig {
        grid: GridConfig::new((0.0, 10.0, 0.25), (0.0, 0.001, 0.000025)),
        ..RunConfig::default()
    }
}

#[test]
fn noisy_run_lands_near_true_parameters() {
    let report = run(&coarse_config()).unwrap();
    let [p0, p1] = report.minimum.params();

    // Uniform noise of amplitude 5 over ~90 samples.
    assert!((p0 - 0.4).abs() < 2.0, "p0 = {p0}");
    assert!((p1 - 0.0002).abs() < 5e-5, "p1 = {p1}");
    assert_eq!(report.rmse.dim(), report.grid.shape());
}

#[test]
fn runs_are_reproducible_for_a_seed() {
    let a = run(&coarse_config()).unwrap();
    let b = run(&coarse_config()).unwrap();
    assert_eq!(a.minimum, b.minimum);
    assert_eq!(a.rmse, b.rmse);

    let other = run(&RunConfig {
        seed: 1,
        ..coarse_config()
    })
    .unwrap();
    assert_ne!(a.rmse, other.rmse);
}

#[test]
fn strategies_report_the_same_minimum() {
    let vectorized = run(&RunConfig {
        strategy: EvalStrategy::Vectorized,
        ..coarse_config()
    })
    .unwrap();
    let parallel = run(&RunConfig {
        strategy: EvalStrategy::Parallel,
        ..coarse_config()
    })
    .unwrap();

    assert_eq!(vectorized.minimum.cell, parallel.minimum.cell);
    assert_abs_diff_eq!(vectorized.minimum.rmse, parallel.minimum.rmse, epsilon = 1e-9);
}

#[test]
fn default_measurement_has_expected_layout() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let meas = gen_meas(&MeasurementConfig::default(), &mut rng).unwrap();

    // 0, 4, ..., 364
    assert_eq!(meas.len(), 92);
    assert!(meas.weights().iter().all(|&w| (1.5..1.75).contains(&w)));
}

struct Linear;

impl GridModel for Linear {
    fn eval_point(&self, driver: f64, p0: f64, p1: f64) -> f64 {
        p0 + p1 * driver
    }

    fn name(&self) -> &str {
        "linear"
    }
}

#[test]
fn custom_model_recovers_its_own_parameters() {
    let grid = gen_lut(&GridConfig::new((0.0, 4.0, 0.5), (0.0, 0.1, 0.0125))).unwrap();
    let config = MeasurementConfig {
        noise: NoiseKind::None,
        ..MeasurementConfig::with_true_params(grid.p0_axis()[3], grid.p1_axis()[5])
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let meas = gen_meas_with(&Linear, &config, &mut rng).unwrap();

    let timeline = Array1::range(0.0, 365.0, 1.0);
    let rmse = RmseSurface::new(Linear)
        .evaluate(&grid, timeline.view(), &meas)
        .unwrap();
    let best = find_minimum(&rmse, &grid).unwrap();

    assert_eq!(best.cell, (3, 5));
    assert_abs_diff_eq!(best.rmse, 0.0, epsilon = 1e-9);
}
