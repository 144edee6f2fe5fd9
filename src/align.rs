//! Alignment of measurement timestamps onto the driver timeline.
//!
//! The surface evaluator runs the model over the whole timeline and then
//! gathers the positions that were actually measured. This module computes the
//! gather indices.
//!
//! A timestamp that does not appear on the timeline has no meaningful index.
//! [`align`] keeps the historical behaviour of mapping such timestamps to index
//! 0; [`locate`] reports them explicitly, and [`UnmatchedPolicy`] lets callers of
//! the surface evaluator choose between aliasing, rejecting and dropping them.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LutError, Result};
use crate::measurement::MeasurementSet;

/// How unmatched measurement timestamps are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Map the measurement onto timeline index 0 and keep it in the reduction.
    ///
    /// This reproduces the reference behaviour and is a known limitation: the
    /// measurement is compared against the model at the first timeline position.
    #[default]
    AliasFirst,

    /// Fail with `LutError::UnmatchedTimestamp`.
    Reject,

    /// Leave the measurement out of the reduction.
    Drop,
}

/// Lowest index of an exact match for each timestamp, `None` where there is no match.
///
/// Timestamps need not be sorted or unique. NaN never matches.
pub fn locate(
    measure_timestamps: ArrayView1<'_, f64>,
    timeline: ArrayView1<'_, f64>,
) -> Vec<Option<usize>> {
    measure_timestamps
        .iter()
        .map(|&t| timeline.iter().position(|&x| x == t))
        .collect()
}

/// Lowest index of an exact match for each timestamp, defaulting to 0.
///
/// # Examples
///
/// ```
/// use lutfit_rs::align::align;
/// use ndarray::{array, Array1};
///
/// let timeline = Array1::range(0.0, 10.0, 1.0);
/// let idx = align(array![2.0, 5.0, 5.0, 11.0].view(), timeline.view());
/// assert_eq!(idx, vec![2, 5, 5, 0]);
/// ```
pub fn align(measure_timestamps: ArrayView1<'_, f64>, timeline: ArrayView1<'_, f64>) -> Vec<usize> {
    locate(measure_timestamps, timeline)
        .into_iter()
        .map(|slot| slot.unwrap_or(0))
        .collect()
}

/// Measurements resolved against a timeline under an [`UnmatchedPolicy`].
///
/// `indices`, `values` and `weights` are parallel: entry `k` says that the
/// retained measurement with value `values[k]` and weight `weights[k]` is
/// compared against timeline position `indices[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSamples {
    /// Timeline position each retained measurement is compared against.
    pub indices: Vec<usize>,
    /// Measured values of the retained measurements.
    pub values: Array1<f64>,
    /// Weights of the retained measurements.
    pub weights: Array1<f64>,
    /// Positions (in the original measurement set) that had no exact match.
    pub unmatched: Vec<usize>,
}

impl AlignedSamples {
    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when no sample was retained.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Resolve a measurement set against `timeline`.
///
/// # Arguments
///
/// * `measurements` - Timestamps, values and weights
/// * `timeline` - Dense driver timeline
/// * `policy` - What to do with timestamps missing from the timeline
///
/// # Returns
///
/// * The gather indices with the retained values and weights, or an error if
///   the policy rejects the input or nothing is left to compare against
pub fn align_measurements(
    measurements: &MeasurementSet,
    timeline: ArrayView1<'_, f64>,
    policy: UnmatchedPolicy,
) -> Result<AlignedSamples> {
    if timeline.is_empty() {
        return Err(LutError::EmptyInput("driver timeline is empty".to_string()));
    }

    let slots = locate(measurements.timestamps().view(), timeline);
    let unmatched: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter_map(|(k, slot)| slot.is_none().then_some(k))
        .collect();

    let aligned = match policy {
        UnmatchedPolicy::AliasFirst => {
            if !unmatched.is_empty() {
                warn!(
                    count = unmatched.len(),
                    first = measurements.timestamps()[unmatched[0]],
                    "measurement timestamps not on the timeline were aliased to index 0"
                );
            }
            AlignedSamples {
                indices: slots.iter().map(|slot| slot.unwrap_or(0)).collect(),
                values: measurements.values().clone(),
                weights: measurements.weights().clone(),
                unmatched,
            }
        }
        UnmatchedPolicy::Reject => {
            if let Some(&index) = unmatched.first() {
                return Err(LutError::UnmatchedTimestamp {
                    index,
                    timestamp: measurements.timestamps()[index],
                });
            }
            AlignedSamples {
                indices: slots.into_iter().flatten().collect(),
                values: measurements.values().clone(),
                weights: measurements.weights().clone(),
                unmatched,
            }
        }
        UnmatchedPolicy::Drop => {
            let keep: Vec<(usize, usize)> = slots
                .iter()
                .enumerate()
                .filter_map(|(k, slot)| slot.map(|i| (k, i)))
                .collect();
            if keep.is_empty() {
                return Err(LutError::EmptyInput(
                    "no measurement timestamp lies on the driver timeline".to_string(),
                ));
            }
            AlignedSamples {
                indices: keep.iter().map(|&(_, i)| i).collect(),
                values: keep.iter().map(|&(k, _)| measurements.values()[k]).collect(),
                weights: keep.iter().map(|&(k, _)| measurements.weights()[k]).collect(),
                unmatched,
            }
        }
    };

    Ok(aligned)
}
