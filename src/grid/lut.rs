//! LUT construction.

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::{LutError, Result};
use crate::grid::config::{validate_axis, GridConfig};

/// Upper limit on the number of samples [`arange`] will produce.
pub const MAX_AXIS_SAMPLES: usize = 1 << 24;

/// Upper limit on the number of cells [`ParameterGrid::from_axes`] will build.
pub const MAX_GRID_CELLS: usize = 1 << 28;

/// A regular 2D lattice over `(p0, p1)` parameter space.
///
/// Both grids have shape `(Np0, Np1)`. Axis 0 varies p0 and axis 1 varies p1,
/// matching `mgrid`/`meshgrid(..., indexing="ij")` conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    p0_axis: Array1<f64>,
    p1_axis: Array1<f64>,
    p0: Array2<f64>,
    p1: Array2<f64>,
}

impl ParameterGrid {
    /// Build a grid from explicit axis samples.
    ///
    /// # Arguments
    ///
    /// * `p0_axis` - Finite, strictly increasing samples along axis 0 (length `Np0`)
    /// * `p1_axis` - Finite, strictly increasing samples along axis 1 (length `Np1`)
    ///
    /// # Returns
    ///
    /// * The grid, `LutError::EmptyInput` if either axis has no samples, or
    ///   `LutError::InvalidConfig` if an axis is not finite and strictly increasing
    ///   or the grid would exceed [`MAX_GRID_CELLS`]
    pub fn from_axes(p0_axis: Array1<f64>, p1_axis: Array1<f64>) -> Result<Self> {
        if p0_axis.is_empty() || p1_axis.is_empty() {
            return Err(LutError::EmptyInput(format!(
                "parameter axes must be non-empty, got {} x {}",
                p0_axis.len(),
                p1_axis.len()
            )));
        }
        check_increasing("p0", &p0_axis)?;
        check_increasing("p1", &p1_axis)?;

        match p0_axis.len().checked_mul(p1_axis.len()) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(LutError::InvalidConfig(format!(
                    "grid of {} x {} cells exceeds the limit of {MAX_GRID_CELLS}",
                    p0_axis.len(),
                    p1_axis.len()
                )))
            }
        }

        let shape = (p0_axis.len(), p1_axis.len());
        let p0 = Array2::from_shape_fn(shape, |(i, _)| p0_axis[i]);
        let p1 = Array2::from_shape_fn(shape, |(_, j)| p1_axis[j]);

        Ok(Self {
            p0_axis,
            p1_axis,
            p0,
            p1,
        })
    }

    /// The p0 value of every grid cell.
    pub fn p0(&self) -> &Array2<f64> {
        &self.p0
    }

    /// The p1 value of every grid cell.
    pub fn p1(&self) -> &Array2<f64> {
        &self.p1
    }

    /// The distinct p0 samples, one per grid row.
    pub fn p0_axis(&self) -> &Array1<f64> {
        &self.p0_axis
    }

    /// The distinct p1 samples, one per grid column.
    pub fn p1_axis(&self) -> &Array1<f64> {
        &self.p1_axis
    }

    /// `(Np0, Np1)`
    pub fn shape(&self) -> (usize, usize) {
        (self.p0_axis.len(), self.p1_axis.len())
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.p0_axis.len() * self.p1_axis.len()
    }

    /// Always false: a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `(p0, p1)` pair at cell `(i, j)`, if it exists.
    pub fn cell(&self, i: usize, j: usize) -> Option<(f64, f64)> {
        Some((*self.p0_axis.get(i)?, *self.p1_axis.get(j)?))
    }

    /// Consume the grid and return `(p0_grid, p1_grid)`.
    pub fn into_arrays(self) -> (Array2<f64>, Array2<f64>) {
        (self.p0, self.p1)
    }
}

/// Evenly spaced values within the half-open interval `[start, stop)`.
///
/// The number of samples is `ceil((stop - start) / step)` and sample `k` is
/// `start + k * step`, the same convention as `numpy.arange`. An empty array is
/// returned when `stop <= start`; more than [`MAX_AXIS_SAMPLES`] samples is
/// `LutError::InvalidConfig`.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Array1<f64>> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) || step <= 0.0 {
        return Err(LutError::InvalidConfig(format!(
            "arange requires finite bounds and a positive step: \
             start={start}, stop={stop}, step={step}"
        )));
    }

    let n = ((stop - start) / step).ceil();
    if !n.is_finite() || n > MAX_AXIS_SAMPLES as f64 {
        return Err(LutError::InvalidConfig(format!(
            "[{start}, {stop}) with step {step} exceeds the limit of {MAX_AXIS_SAMPLES} samples"
        )));
    }
    let n = if n > 0.0 { n as usize } else { 0 };

    Ok(Array1::from_iter((0..n).map(|k| start + k as f64 * step)))
}

/// Generate the 2D parameter LUT described by `config`.
///
/// Axis 0 samples `[p0_min, p0_max + p0_step)` and axis 1 samples
/// `[p1_min, p1_max + p1_step)`. Whether `max` itself lands on the grid depends
/// on floating-point rounding when `step` does not divide the range evenly.
///
/// # Arguments
///
/// * `config` - Axis bounds and steps
///
/// # Returns
///
/// * The parameter grid, or `LutError::InvalidConfig` if the configuration is invalid
///
/// # Examples
///
/// ```
/// use lutfit_rs::grid::{gen_lut, GridConfig};
///
/// let grid = gen_lut(&GridConfig::new((0.0, 10.0, 5.0), (0.0, 1.0, 0.25))).unwrap();
/// assert_eq!(grid.shape(), (3, 5));
/// ```
pub fn gen_lut(config: &GridConfig) -> Result<ParameterGrid> {
    config.validate()?;

    let p0_axis = axis_samples("p0", config.p0_min, config.p0_max, config.p0_step)?;
    let p1_axis = axis_samples("p1", config.p1_min, config.p1_max, config.p1_step)?;

    debug!(
        np0 = p0_axis.len(),
        np1 = p1_axis.len(),
        "generated parameter LUT"
    );

    ParameterGrid::from_axes(p0_axis, p1_axis)
}

/// Generate the LUT for the default configuration
/// (p0 in `[0, 10]` step `0.05`, p1 in `[0, 0.001]` step `5e-6`).
pub fn gen_lut_default() -> Result<ParameterGrid> {
    gen_lut(&GridConfig::default())
}

fn check_increasing(name: &str, axis: &Array1<f64>) -> Result<()> {
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(LutError::InvalidConfig(format!(
            "{name} axis contains non-finite samples"
        )));
    }
    if let Some(k) = (1..axis.len()).find(|&k| axis[k] <= axis[k - 1]) {
        return Err(LutError::InvalidConfig(format!(
            "{name} axis must be strictly increasing, but sample {k} ({}) follows {}",
            axis[k],
            axis[k - 1]
        )));
    }
    Ok(())
}

fn axis_samples(name: &str, min: f64, max: f64, step: f64) -> Result<Array1<f64>> {
    validate_axis(name, min, max, step)?;
    arange(min, max + step, step)
}
