//! Grid bounds configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};

/// Bounds and step sizes for the two parameter axes of the LUT.
///
/// Each axis samples the half-open range `[min, max + step)` in increments of
/// `step`, so `max` is included when `step` divides `max - min` evenly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Lower bound of the p0 axis. Default: 0.0
    pub p0_min: f64,

    /// Upper bound of the p0 axis. Default: 10.0
    pub p0_max: f64,

    /// Spacing of the p0 axis. Default: 0.05
    pub p0_step: f64,

    /// Lower bound of the p1 axis. Default: 0.0
    pub p1_min: f64,

    /// Upper bound of the p1 axis. Default: 0.001
    pub p1_max: f64,

    /// Spacing of the p1 axis. Default: 0.000005
    pub p1_step: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            p0_min: 0.0,
            p0_max: 10.0,
            p0_step: 0.05,
            p1_min: 0.0,
            p1_max: 0.001,
            p1_step: 0.000005,
        }
    }
}

impl GridConfig {
    /// Create a grid configuration from explicit bounds and steps.
    pub fn new(p0: (f64, f64, f64), p1: (f64, f64, f64)) -> Self {
        Self {
            p0_min: p0.0,
            p0_max: p0.1,
            p0_step: p0.2,
            p1_min: p1.0,
            p1_max: p1.1,
            p1_step: p1.2,
        }
    }

    /// Check that both axes describe a finite, non-empty range.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration can produce a grid, or
    ///   `LutError::InvalidConfig` naming the offending axis
    pub fn validate(&self) -> Result<()> {
        validate_axis("p0", self.p0_min, self.p0_max, self.p0_step)?;
        validate_axis("p1", self.p1_min, self.p1_max, self.p1_step)
    }
}

pub(crate) fn validate_axis(name: &str, min: f64, max: f64, step: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        return Err(LutError::InvalidConfig(format!(
            "{name} axis must be finite: min={min}, max={max}, step={step}"
        )));
    }
    if step <= 0.0 {
        return Err(LutError::InvalidConfig(format!(
            "{name} step must be positive, got {step}"
        )));
    }
    if max < min {
        return Err(LutError::InvalidConfig(format!(
            "{name} max ({max}) must not be less than min ({min})"
        )));
    }
    Ok(())
}
