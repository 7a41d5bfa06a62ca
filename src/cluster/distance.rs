//! Euclidean distance over fixed-dimension vectors.

use crate::error::{Error, Result};
use ndarray::ArrayView1;

/// Squared Euclidean distance.
///
/// Nearest-centroid searches compare this directly; the square root does not
/// change the ordering.
#[inline]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    squared_row_distance(ArrayView1::from(a), ArrayView1::from(b))
}

/// Euclidean distance `sqrt(Σ (a[i] - b[i])²)`.
///
/// # Panics
///
/// Panics if `a` and `b` have different lengths. Use [`try_euclidean`] when the
/// inputs have not been validated.
#[inline]
pub fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "euclidean: vectors must have the same dimension"
    );
    squared_euclidean(a, b).sqrt()
}

/// Euclidean distance, reporting a length mismatch as an error.
pub fn try_euclidean(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(squared_euclidean(a, b).sqrt())
}

/// Squared distance between two matrix rows.
#[inline]
pub(crate) fn squared_row_distance(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Distance between two matrix rows.
#[inline]
pub(crate) fn row_distance(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    squared_row_distance(a, b).sqrt()
}
