//! Two-parameter models evaluated over the LUT.
//!
//! A [`GridModel`] maps a driver value and a parameter pair `(p0, p1)` to a
//! modelled value. The provided [`GridModel::eval`] lifts that scalar kernel to
//! arrays of any broadcast-compatible shapes, which is what lets the surface
//! evaluator run the model once over `(Np0, Np1, 1)` parameter grids and a
//! `(1, 1, Nt)` timeline.

use ndarray::{ArrayD, ArrayViewD, Zip};

use crate::error::Result;

mod broadcast;

pub use broadcast::broadcast_shape;
use broadcast::broadcast_to;

/// A parametric model with exactly two parameters.
pub trait GridModel: Sync {
    /// Evaluate the model at a single driver value.
    fn eval_point(&self, driver: f64, p0: f64, p1: f64) -> f64;

    /// Short human-readable name used in logs and reports.
    fn name(&self) -> &str {
        "model"
    }

    /// Evaluate the model element-wise under broadcasting.
    ///
    /// # Arguments
    ///
    /// * `driver` - Driver values of any shape
    /// * `p0` - First parameter, any shape broadcast-compatible with the others
    /// * `p1` - Second parameter, any shape broadcast-compatible with the others
    ///
    /// # Returns
    ///
    /// * An array of the broadcast shape, or `LutError::DimensionMismatch`
    fn eval(
        &self,
        driver: ArrayViewD<'_, f64>,
        p0: ArrayViewD<'_, f64>,
        p1: ArrayViewD<'_, f64>,
    ) -> Result<ArrayD<f64>> {
        let shape = broadcast_shape(&[driver.shape(), p0.shape(), p1.shape()])?;

        let driver = broadcast_to(&driver, &shape)?;
        let p0 = broadcast_to(&p0, &shape)?;
        let p1 = broadcast_to(&p1, &shape)?;

        Ok(Zip::from(&driver)
            .and(&p0)
            .and(&p1)
            .map_collect(|&t, &a, &b| self.eval_point(t, a, b)))
    }
}

/// The quadratic-in-driver model `p0 + p1 * driver^2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticModel;

impl GridModel for QuadraticModel {
    #[inline]
    fn eval_point(&self, driver: f64, p0: f64, p1: f64) -> f64 {
        p0 + p1 * driver * driver
    }

    fn name(&self) -> &str {
        "p0 + p1 * t^2"
    }
}

/// Evaluate [`QuadraticModel`] at `driver` for `param = [p0, p1]`.
///
/// # Examples
///
/// ```
/// use lutfit_rs::model::model;
/// use ndarray::{arr0, array};
///
/// let t = array![0.0, 1.0, 2.0].into_dyn();
/// let out = model(t.view(), [arr0(1.0).into_dyn().view(), arr0(0.5).into_dyn().view()]).unwrap();
/// assert_eq!(out.as_slice().unwrap(), &[1.0, 1.5, 3.0]);
/// ```
pub fn model(driver: ArrayViewD<'_, f64>, param: [ArrayViewD<'_, f64>; 2]) -> Result<ArrayD<f64>> {
    let [p0, p1] = param;
    QuadraticModel.eval(driver, p0, p1)
}
