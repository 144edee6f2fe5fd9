//! End-to-end grid search.
//!
//! The runner wires the pieces together: it builds the driver timeline and the
//! LUT, draws a pseudo-measurement, evaluates the RMSE surface and reports the
//! parameters at its minimum.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::align::UnmatchedPolicy;
use crate::error::{LutError, Result};
use crate::grid::{arange, gen_lut, GridConfig, ParameterGrid};
use crate::measurement::{gen_meas, MeasurementConfig, MeasurementSet};
use crate::model::QuadraticModel;
use crate::surface::{find_minimum, EvalStrategy, GridMinimum, RmseSurface};

/// The dense driver timeline `[start, stop)` sampled every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Default: 0
    pub start: f64,
    /// Default: 365
    pub stop: f64,
    /// Default: 1
    pub step: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: 365.0,
            step: 1.0,
        }
    }
}

impl TimelineConfig {
    /// Build the timeline array.
    pub fn build(&self) -> Result<Array1<f64>> {
        let timeline = arange(self.start, self.stop, self.step)?;
        if timeline.is_empty() {
            return Err(LutError::InvalidConfig(format!(
                "timeline [{}, {}) has no samples",
                self.start, self.stop
            )));
        }
        Ok(timeline)
    }
}

/// Configuration for [`run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub measurement: MeasurementConfig,
    pub timeline: TimelineConfig,
    pub strategy: EvalStrategy,
    pub unmatched: UnmatchedPolicy,
    /// Seed for the pseudo-measurement noise and weights. Default: 42
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            measurement: MeasurementConfig::default(),
            timeline: TimelineConfig::default(),
            strategy: EvalStrategy::Parallel,
            unmatched: UnmatchedPolicy::default(),
            seed: 42,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Save the configuration to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// The configuration as a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub true_params: [f64; 2],
    pub minimum: GridMinimum,
    pub grid: ParameterGrid,
    pub timeline: Array1<f64>,
    pub measurements: MeasurementSet,
    pub rmse: Array2<f64>,
}

/// Serializable summary of a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub true_params: [f64; 2],
    pub minimum: GridMinimum,
    pub grid_shape: (usize, usize),
    pub timeline_len: usize,
    pub measurement_count: usize,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            true_params: self.true_params,
            minimum: self.minimum,
            grid_shape: self.grid.shape(),
            timeline_len: self.timeline.len(),
            measurement_count: self.measurements.len(),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (np0, np1) = self.grid.shape();
        writeln!(
            f,
            "original parameters: [{}, {}]",
            self.true_params[0], self.true_params[1]
        )?;
        writeln!(
            f,
            "grid: {} x {}, timeline: {}, measurements: {}",
            np0,
            np1,
            self.timeline.len(),
            self.measurements.len()
        )?;
        write!(f, "{}", self.minimum)
    }
}

/// Run the full grid search described by `config`.
///
/// # Returns
///
/// * The report holding the surface, the grid, the measurements and the minimum
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let timeline = config.timeline.build()?;
    let grid = gen_lut(&config.grid)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let measurements = gen_meas(&config.measurement, &mut rng)?;

    let rmse = RmseSurface::new(QuadraticModel)
        .with_strategy(config.strategy)
        .with_unmatched_policy(config.unmatched)
        .evaluate(&grid, timeline.view(), &measurements)?;

    let minimum = find_minimum(&rmse, &grid)?;

    info!(
        rmse = minimum.rmse,
        p0 = minimum.p0,
        p1 = minimum.p1,
        flat_index = minimum.flat_index,
        "grid search complete"
    );

    Ok(RunReport {
        true_params: config.measurement.true_params,
        minimum,
        grid,
        timeline,
        measurements,
        rmse,
    })
}
