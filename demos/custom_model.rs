//! Example of grid search with a user-defined two-parameter model.

use lutfit_rs::grid::{gen_lut, GridConfig};
use lutfit_rs::measurement::{gen_meas_with, MeasurementConfig, NoiseKind};
use lutfit_rs::model::GridModel;
use lutfit_rs::surface::{find_minimum, EvalStrategy, RmseSurface};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seasonal cycle `p0 * sin(2 pi t / 365 + p1)`.
struct Seasonal;

impl GridModel for Seasonal {
    fn eval_point(&self, driver: f64, p0: f64, p1: f64) -> f64 {
        p0 * (2.0 * std::f64::consts::PI * driver / 365.0 + p1).sin()
    }

    fn name(&self) -> &str {
        "seasonal"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let timeline = Array1::range(0.0, 365.0, 1.0);
    let grid = gen_lut(&GridConfig::new((0.0, 4.0, 0.125), (-1.5, 1.5, 0.0625)))?;

    let config = MeasurementConfig {
        true_params: [2.5, 0.5],
        t_step: 7.0,
        noise: NoiseKind::Gaussian { sigma: 0.2 },
        ..MeasurementConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(11);
    let measurements = gen_meas_with(&Seasonal, &config, &mut rng)?;

    let rmse = RmseSurface::new(Seasonal)
        .with_strategy(EvalStrategy::Parallel)
        .evaluate(&grid, timeline.view(), &measurements)?;
    let best = find_minimum(&rmse, &grid)?;

    println!("model: {}", Seasonal.name());
    println!("original parameters: {:?}", config.true_params);
    println!("{best}");

    Ok(())
}
