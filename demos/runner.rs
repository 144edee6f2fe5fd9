//! Example of a full LUT grid search.
//!
//! Generates a pseudo-measurement, evaluates the RMSE surface over the default
//! LUT and prints the parameters at its minimum. A second run uses different
//! true parameters.

use lutfit_rs::measurement::MeasurementConfig;
use lutfit_rs::runner::{run, RunConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("LUT grid search example");
    println!("=======================\n");

    let config = RunConfig::default();
    let report = run(&config)?;
    println!("{report}\n");

    // Print a coarse view of the surface along the p0 axis at the best p1.
    let (_, j) = report.minimum.cell;
    println!("RMSE along p0 at p1 = {}:", report.minimum.p1);
    for i in (0..report.grid.shape().0).step_by(20) {
        println!(
            "  p0 = {:>6.2}  rmse = {:.4}",
            report.grid.p0_axis()[i],
            report.rmse[[i, j]]
        );
    }

    println!("\nDifferent pseudo-measurement");
    println!("----------------------------");
    let config = RunConfig {
        measurement: MeasurementConfig::with_true_params(6.5, 0.0007),
        seed: 7,
        ..RunConfig::default()
    };
    let report = run(&config)?;
    println!("{report}");

    Ok(())
}
