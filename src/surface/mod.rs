//! Weighted RMSE surfaces over the parameter LUT.
//!
//! For every grid cell `(i, j)` the evaluator computes
//!
//! ```text
//! rmse[i, j] = sqrt( mean_k( ((model(t[idx_k], p0[i, j], p1[i, j]) - y_k) * w_k)^2 ) )
//! ```
//!
//! where `idx_k` is the timeline position of measurement `k` (see
//! [`crate::align`]). The vectorized strategy materializes the model over the
//! whole `GRID_ROW x GRID_COL x timeline` block and gathers along the last
//! axis; the parallel strategy visits cells independently and only evaluates
//! the model at measured positions.

use ndarray::{Array2, Array3, ArrayView1, Axis, Ix3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{align_measurements, AlignedSamples, UnmatchedPolicy};
use crate::error::{LutError, Result};
use crate::grid::ParameterGrid;
use crate::measurement::MeasurementSet;
use crate::model::{GridModel, QuadraticModel};

pub mod minimum;
mod parallel;

pub use minimum::{find_minimum, GridMinimum};

/// Axis of the p0 samples.
pub const GRID_ROW: Axis = Axis(0);
/// Axis of the p1 samples.
pub const GRID_COL: Axis = Axis(1);
/// Timeline / measurement axis of the 3D intermediate arrays.
pub const SAMPLE: Axis = Axis(2);

/// How the surface is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalStrategy {
    /// One broadcast model evaluation over grid x timeline, then gather and reduce.
    #[default]
    Vectorized,

    /// Per-cell evaluation spread over the rayon thread pool.
    Parallel,
}

/// Configurable RMSE surface evaluator.
#[derive(Debug, Clone)]
pub struct RmseSurface<M: GridModel = QuadraticModel> {
    model: M,
    strategy: EvalStrategy,
    policy: UnmatchedPolicy,
}

impl Default for RmseSurface<QuadraticModel> {
    fn default() -> Self {
        Self::new(QuadraticModel)
    }
}

impl<M: GridModel> RmseSurface<M> {
    /// Create an evaluator for `model` with the vectorized strategy and
    /// `UnmatchedPolicy::AliasFirst`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            strategy: EvalStrategy::default(),
            policy: UnmatchedPolicy::default(),
        }
    }

    /// Set the evaluation strategy.
    pub fn with_strategy(mut self, strategy: EvalStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set how unmatched measurement timestamps are handled.
    pub fn with_unmatched_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The model evaluated at every cell.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The configured evaluation strategy.
    pub fn strategy(&self) -> EvalStrategy {
        self.strategy
    }

    /// How timestamps missing from the timeline are handled.
    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.policy
    }

    /// Evaluate the weighted RMSE for every cell of `grid`.
    ///
    /// # Arguments
    ///
    /// * `grid` - Parameter LUT of shape `(Np0, Np1)`
    /// * `timeline` - Dense driver timeline of length `Nt`
    /// * `measurements` - Measurement set of length `Nm`
    ///
    /// # Returns
    ///
    /// * The `(Np0, Np1)` RMSE surface
    pub fn evaluate(
        &self,
        grid: &ParameterGrid,
        timeline: ArrayView1<'_, f64>,
        measurements: &MeasurementSet,
    ) -> Result<Array2<f64>> {
        let samples = align_measurements(measurements, timeline, self.policy)?;

        let (np0, np1) = grid.shape();
        debug!(
            model = self.model.name(),
            np0,
            np1,
            nt = timeline.len(),
            nm = samples.len(),
            strategy = ?self.strategy,
            "evaluating RMSE surface"
        );

        match self.strategy {
            EvalStrategy::Vectorized => vectorized(&self.model, grid, timeline, &samples),
            EvalStrategy::Parallel => parallel::per_cell(&self.model, grid, timeline, &samples),
        }
    }
}

/// Weighted RMSE surface of [`QuadraticModel`] over `grid`.
///
/// Uses the vectorized strategy and aliases unmatched timestamps to timeline
/// index 0.
///
/// # Examples
///
/// ```
/// use lutfit_rs::grid::ParameterGrid;
/// use lutfit_rs::measurement::MeasurementSet;
/// use lutfit_rs::surface::lut_rmse;
/// use ndarray::{array, Array1};
///
/// let grid = ParameterGrid::from_axes(array![0.0, 1.0], array![0.0, 1.0]).unwrap();
/// let timeline = Array1::range(0.0, 5.0, 1.0);
/// let meas = MeasurementSet::unweighted(array![1.0, 2.0], array![2.0, 5.0]).unwrap();
///
/// let rmse = lut_rmse(&grid, timeline.view(), &meas).unwrap();
/// assert_eq!(rmse.shape(), &[2, 2]);
/// assert_eq!(rmse[[1, 1]], 0.0);
/// ```
pub fn lut_rmse(
    grid: &ParameterGrid,
    timeline: ArrayView1<'_, f64>,
    measurements: &MeasurementSet,
) -> Result<Array2<f64>> {
    RmseSurface::new(QuadraticModel).evaluate(grid, timeline, measurements)
}

fn vectorized<M: GridModel>(
    model: &M,
    grid: &ParameterGrid,
    timeline: ArrayView1<'_, f64>,
    samples: &AlignedSamples,
) -> Result<Array2<f64>> {
    // (Np0, Np1, 1) parameters against a (1, 1, Nt) timeline.
    let p0 = grid.p0().view().insert_axis(SAMPLE);
    let p1 = grid.p1().view().insert_axis(SAMPLE);
    let t = timeline.insert_axis(GRID_ROW).insert_axis(GRID_COL);

    let output: Array3<f64> = model
        .eval(t.into_dyn(), p0.into_dyn(), p1.into_dyn())?
        .into_dimensionality::<Ix3>()?;

    // (Np0, Np1, Nm)
    let sampled = output.select(SAMPLE, &samples.indices);

    let measured = samples.values.view().insert_axis(GRID_ROW).insert_axis(GRID_COL);
    let weights = samples.weights.view().insert_axis(GRID_ROW).insert_axis(GRID_COL);

    let error = ((&sampled - &measured) * &weights).mapv_into(|e| e * e);

    let mse = error.mean_axis(SAMPLE).ok_or_else(|| {
        LutError::EmptyInput("no measurements left to reduce over".to_string())
    })?;

    Ok(mse.mapv_into(f64::sqrt))
}
