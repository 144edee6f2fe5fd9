//! Per-cell RMSE evaluation on the rayon thread pool.
//!
//! Each grid cell is independent, so the cells are split across threads. The
//! model is only evaluated at the gathered driver values rather than the whole
//! timeline, which keeps memory at `O(Np0 * Np1 + Nm)`.

use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;

use crate::align::AlignedSamples;
use crate::error::{LutError, Result};
use crate::grid::ParameterGrid;
use crate::model::GridModel;

pub(super) fn per_cell<M: GridModel>(
    model: &M,
    grid: &ParameterGrid,
    timeline: ArrayView1<'_, f64>,
    samples: &AlignedSamples,
) -> Result<Array2<f64>> {
    if samples.is_empty() {
        return Err(LutError::EmptyInput(
            "no measurements left to reduce over".to_string(),
        ));
    }

    let drivers: Array1<f64> = samples
        .indices
        .iter()
        .map(|&i| {
            timeline.get(i).copied().ok_or_else(|| {
                LutError::DimensionMismatch(format!(
                    "alignment index {i} out of range for timeline of length {}",
                    timeline.len()
                ))
            })
        })
        .collect::<Result<_>>()?;

    let (np0, np1) = grid.shape();
    let p0 = grid.p0();
    let p1 = grid.p1();

    let cells: Vec<f64> = (0..np0 * np1)
        .into_par_iter()
        .map(|k| {
            let (i, j) = (k / np1, k % np1);
            cell_rmse(model, p0[[i, j]], p1[[i, j]], &drivers, samples)
        })
        .collect();

    Ok(Array2::from_shape_vec((np0, np1), cells)?)
}

fn cell_rmse<M: GridModel>(
    model: &M,
    p0: f64,
    p1: f64,
    drivers: &Array1<f64>,
    samples: &AlignedSamples,
) -> f64 {
    let sum: f64 = drivers
        .iter()
        .zip(samples.values.iter())
        .zip(samples.weights.iter())
        .map(|((&t, &y), &w)| {
            let e = (model.eval_point(t, p0, p1) - y) * w;
            e * e
        })
        .sum();

    (sum / drivers.len() as f64).sqrt()
}
