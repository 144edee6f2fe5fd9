//! Locating the best grid cell on an RMSE surface.

use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};
use crate::grid::ParameterGrid;

/// The grid cell with the smallest RMSE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMinimum {
    /// Position in the row-major flattening of the surface.
    pub flat_index: usize,

    /// `(i, j)` cell of the minimum.
    pub cell: (usize, usize),

    /// RMSE at the minimum.
    pub rmse: f64,

    /// p0 of the minimizing cell.
    pub p0: f64,

    /// p1 of the minimizing cell.
    pub p1: f64,
}

impl GridMinimum {
    /// The minimizing parameters as `[p0, p1]`.
    pub fn params(&self) -> [f64; 2] {
        [self.p0, self.p1]
    }
}

impl fmt::Display for GridMinimum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "min rmse: {}", self.rmse)?;
        writeln!(f, "index: {}: {},{}", self.flat_index, self.p0, self.p1)?;
        write!(f, "parameters: {} {}", self.p0, self.p1)
    }
}

/// Find the first global minimum of `surface` in row-major order.
///
/// Ties resolve to the lowest flattened index, i.e. the lowest p0 index and
/// then the lowest p1 index. NaN cells are ignored.
///
/// # Arguments
///
/// * `surface` - RMSE surface of shape `(Np0, Np1)`
/// * `grid` - The grid the surface was evaluated on
///
/// # Returns
///
/// * The minimizing cell, `LutError::DimensionMismatch` if the shapes differ, or
///   `LutError::EmptyInput` if every cell is NaN
pub fn find_minimum(surface: &Array2<f64>, grid: &ParameterGrid) -> Result<GridMinimum> {
    let (np0, np1) = grid.shape();
    if surface.dim() != (np0, np1) {
        return Err(LutError::DimensionMismatch(format!(
            "surface shape {:?} does not match grid shape {:?}",
            surface.shape(),
            (np0, np1)
        )));
    }

    let mut best: Option<((usize, usize), f64)> = None;
    for (cell, &value) in surface.indexed_iter() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((cell, value)),
        }
    }

    let Some(((i, j), rmse)) = best else {
        return Err(LutError::EmptyInput(
            "RMSE surface has no finite cells".to_string(),
        ));
    };

    Ok(GridMinimum {
        flat_index: i * np1 + j,
        cell: (i, j),
        rmse,
        p0: grid.p0()[[i, j]],
        p1: grid.p1()[[i, j]],
    })
}
