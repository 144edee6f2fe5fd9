//! Broadcasting helpers.
//!
//! ndarray's arithmetic operators panic when shapes are incompatible. The
//! model evaluator instead resolves the common shape up front so that a bad
//! combination comes back as `LutError::DimensionMismatch`.

use ndarray::{ArrayViewD, IxDyn};

use crate::error::{LutError, Result};

/// Compute the shape that all `shapes` broadcast to.
///
/// Shapes are aligned on their trailing dimensions. Along each dimension the
/// sizes must either agree or be 1; missing leading dimensions count as 1.
///
/// # Examples
///
/// ```
/// use lutfit_rs::model::broadcast_shape;
///
/// let shape = broadcast_shape(&[&[4, 5, 1], &[1, 1, 10]]).unwrap();
/// assert_eq!(shape, vec![4, 5, 10]);
///
/// assert!(broadcast_shape(&[&[3], &[4]]).is_err());
/// ```
pub fn broadcast_shape(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1usize; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        for (k, &len) in shape.iter().enumerate() {
            let slot = &mut out[offset + k];
            if *slot == len || len == 1 {
                continue;
            }
            if *slot == 1 {
                *slot = len;
            } else {
                return Err(LutError::DimensionMismatch(format!(
                    "cannot broadcast shapes {:?} together",
                    shapes
                )));
            }
        }
    }

    Ok(out)
}

/// Broadcast a view to `shape`, reporting failure as a dimension mismatch.
pub(crate) fn broadcast_to<'a>(
    view: &'a ArrayViewD<'_, f64>,
    shape: &[usize],
) -> Result<ArrayViewD<'a, f64>> {
    view.broadcast(IxDyn(shape)).ok_or_else(|| {
        LutError::DimensionMismatch(format!(
            "cannot broadcast shape {:?} to {:?}",
            view.shape(),
            shape
        ))
    })
}
