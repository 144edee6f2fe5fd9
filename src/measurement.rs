//! Measurement sets and pseudo-measurement generation.
//!
//! A [`MeasurementSet`] holds three parallel arrays: the driver value at which
//! each measurement was taken, the measured value, and its weight.
//! [`gen_meas`] synthesizes such a set from a model with known parameters plus
//! zero-centred noise, which is how the grid search is exercised end to end.

use ndarray::{arr0, Array1};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LutError, Result};
use crate::grid::arange;
use crate::model::{GridModel, QuadraticModel};

/// Measurements sampled at (a subset of) the driver timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSet {
    timestamps: Array1<f64>,
    values: Array1<f64>,
    weights: Array1<f64>,
}

impl MeasurementSet {
    /// Create a measurement set from parallel arrays.
    ///
    /// Weights are not checked for sign; negative or zero weights are accepted.
    ///
    /// # Returns
    ///
    /// * The set, `LutError::DimensionMismatch` if the arrays differ in length,
    ///   or `LutError::EmptyInput` if they are empty
    pub fn new(timestamps: Array1<f64>, values: Array1<f64>, weights: Array1<f64>) -> Result<Self> {
        if timestamps.len() != values.len() || timestamps.len() != weights.len() {
            return Err(LutError::DimensionMismatch(format!(
                "measurement arrays differ in length: timestamps={}, values={}, weights={}",
                timestamps.len(),
                values.len(),
                weights.len()
            )));
        }
        if timestamps.is_empty() {
            return Err(LutError::EmptyInput("measurement set is empty".to_string()));
        }

        Ok(Self {
            timestamps,
            values,
            weights,
        })
    }

    /// Create a set where every measurement has weight 1.
    pub fn unweighted(timestamps: Array1<f64>, values: Array1<f64>) -> Result<Self> {
        let weights = Array1::ones(timestamps.len());
        Self::new(timestamps, values, weights)
    }

    pub fn timestamps(&self) -> &Array1<f64> {
        &self.timestamps
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Number of measurements `Nm`.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// A copy of this set with every weight multiplied by `factor`.
    pub fn with_scaled_weights(&self, factor: f64) -> Self {
        Self {
            timestamps: self.timestamps.clone(),
            values: self.values.clone(),
            weights: &self.weights * factor,
        }
    }

    /// A copy of this set with measurement `index` replaced by `value`.
    pub fn with_value(&self, index: usize, value: f64) -> Result<Self> {
        if index >= self.len() {
            return Err(LutError::DimensionMismatch(format!(
                "measurement index {index} out of range for {} measurements",
                self.len()
            )));
        }
        let mut values = self.values.clone();
        values[index] = value;
        Ok(Self {
            timestamps: self.timestamps.clone(),
            values,
            weights: self.weights.clone(),
        })
    }

    /// Consume the set and return `(timestamps, values, weights)`.
    pub fn into_arrays(self) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        (self.timestamps, self.values, self.weights)
    }
}

/// Noise added to the modelled values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseKind {
    /// `amplitude * (U[0, 1) - 0.5)`
    Uniform { amplitude: f64 },

    /// `N(0, sigma)`
    Gaussian { sigma: f64 },

    /// Noiseless measurements.
    None,
}

impl Default for NoiseKind {
    fn default() -> Self {
        NoiseKind::Uniform { amplitude: 5.0 }
    }
}

/// Settings for [`gen_meas`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Parameters `[p0, p1]` the measurements are drawn from. Default: `[0.4, 0.0002]`
    pub true_params: [f64; 2],

    /// First measurement time. Default: 0
    pub t_start: f64,

    /// Measurement times stop before this value. Default: 365
    pub t_stop: f64,

    /// Spacing between measurements. Default: 4
    pub t_step: f64,

    /// Noise model. Default: uniform with amplitude 5
    pub noise: NoiseKind,

    /// Weights are `weight_offset + (weight_base + U[0, 1)) / weight_scale`.
    /// Default: 1
    pub weight_offset: f64,

    /// Default: 2
    pub weight_base: f64,

    /// Default: 4
    pub weight_scale: f64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            true_params: [0.4, 0.0002],
            t_start: 0.0,
            t_stop: 365.0,
            t_step: 4.0,
            noise: NoiseKind::default(),
            weight_offset: 1.0,
            weight_base: 2.0,
            weight_scale: 4.0,
        }
    }
}

impl MeasurementConfig {
    /// Same defaults, drawn from different true parameters.
    pub fn with_true_params(p0: f64, p1: f64) -> Self {
        Self {
            true_params: [p0, p1],
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.weight_scale == 0.0 || !self.weight_scale.is_finite() {
            return Err(LutError::InvalidConfig(format!(
                "weight_scale must be finite and non-zero, got {}",
                self.weight_scale
            )));
        }
        match self.noise {
            NoiseKind::Gaussian { sigma } if !(sigma.is_finite() && sigma >= 0.0) => {
                Err(LutError::InvalidConfig(format!(
                    "gaussian noise sigma must be finite and non-negative, got {sigma}"
                )))
            }
            NoiseKind::Uniform { amplitude } if !amplitude.is_finite() => {
                Err(LutError::InvalidConfig(format!(
                    "uniform noise amplitude must be finite, got {amplitude}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Generate a pseudo-measurement from [`QuadraticModel`].
///
/// # Arguments
///
/// * `config` - Sampling times, true parameters, noise and weight settings
/// * `rng` - Random number generator; a seeded generator gives reproducible output
///
/// # Returns
///
/// * The generated measurement set
pub fn gen_meas(config: &MeasurementConfig, rng: &mut impl Rng) -> Result<MeasurementSet> {
    gen_meas_with(&QuadraticModel, config, rng)
}

/// Generate a pseudo-measurement from an arbitrary model.
pub fn gen_meas_with<M: GridModel>(
    model: &M,
    config: &MeasurementConfig,
    rng: &mut impl Rng,
) -> Result<MeasurementSet> {
    config.validate()?;

    let timestamps = arange(config.t_start, config.t_stop, config.t_step)?;
    if timestamps.is_empty() {
        return Err(LutError::InvalidConfig(format!(
            "no measurement times in [{}, {})",
            config.t_start, config.t_stop
        )));
    }

    let [p0, p1] = config.true_params;
    let clean = model
        .eval(
            timestamps.view().into_dyn(),
            arr0(p0).into_dyn().view(),
            arr0(p1).into_dyn().view(),
        )?
        .into_dimensionality::<ndarray::Ix1>()?;

    let noise = sample_noise(config.noise, timestamps.len(), rng)?;
    let values = clean + noise;

    let weights = Array1::from_shape_fn(timestamps.len(), |_| {
        config.weight_offset + (config.weight_base + rng.gen::<f64>()) / config.weight_scale
    });

    debug!(
        count = timestamps.len(),
        p0, p1, "generated pseudo-measurements"
    );

    MeasurementSet::new(timestamps, values, weights)
}

fn sample_noise(noise: NoiseKind, n: usize, rng: &mut impl Rng) -> Result<Array1<f64>> {
    let samples = match noise {
        NoiseKind::Uniform { amplitude } => {
            Array1::from_shape_fn(n, |_| amplitude * (rng.gen::<f64>() - 0.5))
        }
        NoiseKind::Gaussian { sigma } => {
            let normal = Normal::new(0.0, sigma)
                .map_err(|e| LutError::InvalidConfig(format!("gaussian noise: {e}")))?;
            Array1::from_shape_fn(n, |_| normal.sample(&mut *rng))
        }
        NoiseKind::None => Array1::zeros(n),
    };
    Ok(samples)
}
