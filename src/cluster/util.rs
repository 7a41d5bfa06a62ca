use crate::error::{Error, Result};
use ndarray::Array2;

/// Check that `data` is a well-formed dataset and return its dimensionality.
///
/// Well-formed: non-empty, at least one dimension, equal row lengths, and
/// only finite values.
pub(crate) fn validate_dataset(data: &[Vec<f32>]) -> Result<usize> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let d = first.len();
    if d == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }
    for (row, point) in data.iter().enumerate() {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        if let Some(column) = point.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonNumeric { row, column });
        }
    }
    Ok(d)
}

/// Copy a validated dataset into a row-major `n x d` matrix.
pub(crate) fn to_matrix(data: &[Vec<f32>]) -> Result<Array2<f32>> {
    let d = validate_dataset(data)?;
    let n = data.len();

    let mut flat: Vec<f32> = Vec::with_capacity(n * d);
    for point in data {
        flat.extend_from_slice(point);
    }
    Array2::from_shape_vec((n, d), flat).map_err(|e| Error::Other(e.to_string()))
}
