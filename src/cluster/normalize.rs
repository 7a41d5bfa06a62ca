//! Min-max feature scaling.
//!
//! K-means is distance based, so a feature measured in thousands drowns out a
//! feature measured in fractions. Rescaling every dimension to `[0, 1]` before
//! clustering gives each one equal weight.
//!
//! ```text
//! x' = (x - min_d) / (max_d - min_d)
//! ```
//!
//! A dimension whose values are all equal has no range; every value in it maps
//! to `0.5`, the middle of the unit interval, so it sits at the same place for
//! every point and never skews early distance comparisons.

use super::util::validate_dataset;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value assigned to every entry of a zero-range dimension.
pub const DEGENERATE_VALUE: f32 = 0.5;

/// Per-dimension min-max bounds learned from a dataset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinMaxScaler {
    min: Vec<f32>,
    max: Vec<f32>,
}

impl MinMaxScaler {
    /// Learn the bounds of every dimension.
    ///
    /// # Errors
    ///
    /// Fails on an empty dataset, on rows with inconsistent dimensions, and on
    /// NaN or infinite values.
    pub fn fit(data: &[Vec<f32>]) -> Result<Self> {
        let d = validate_dataset(data)?;
        let mut min = vec![f32::INFINITY; d];
        let mut max = vec![f32::NEG_INFINITY; d];

        for point in data {
            for (column, &value) in point.iter().enumerate() {
                min[column] = min[column].min(value);
                max[column] = max[column].max(value);
            }
        }

        Ok(Self { min, max })
    }

    /// Number of dimensions the scaler was fitted on.
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// Smallest observed value per dimension.
    pub fn min(&self) -> &[f32] {
        &self.min
    }

    /// Largest observed value per dimension.
    pub fn max(&self) -> &[f32] {
        &self.max
    }

    /// Rescale rows with the fitted bounds.
    ///
    /// Values outside the fitted range land outside `[0, 1]`; only the data the
    /// scaler was fitted on is guaranteed to stay inside it.
    pub fn transform(&self, data: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        data.iter()
            .enumerate()
            .map(|(row, point)| self.transform_row(row, point))
            .collect()
    }

    fn transform_row(&self, row: usize, point: &[f32]) -> Result<Vec<f32>> {
        self.check_dim(point.len())?;
        point
            .iter()
            .enumerate()
            .map(|(column, &value)| {
                if !value.is_finite() {
                    return Err(Error::NonNumeric { row, column });
                }
                let (min, range) = self.bounds(column);
                if range == 0.0 {
                    Ok(DEGENERATE_VALUE)
                } else {
                    Ok(((f64::from(value) - min) / range) as f32)
                }
            })
            .collect()
    }

    /// Map normalized vectors (for example final centroids) back to raw units.
    ///
    /// A zero-range dimension maps back to its single observed value.
    pub fn inverse_transform(&self, data: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        data.iter()
            .map(|point| {
                self.check_dim(point.len())?;
                Ok(point
                    .iter()
                    .enumerate()
                    .map(|(column, &value)| {
                        let (min, range) = self.bounds(column);
                        if range == 0.0 {
                            self.min[column]
                        } else {
                            (f64::from(value) * range + min) as f32
                        }
                    })
                    .collect())
            })
            .collect()
    }

    // Widened to f64: the span of two finite f32 values can exceed f32::MAX.
    fn bounds(&self, column: usize) -> (f64, f64) {
        let min = f64::from(self.min[column]);
        (min, f64::from(self.max[column]) - min)
    }

    fn check_dim(&self, found: usize) -> Result<()> {
        if found != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found,
            });
        }
        Ok(())
    }
}

/// Min-max normalize a dataset to `[0, 1]` per dimension.
///
/// ```rust
/// use kcluster::normalize_min_max;
///
/// let scaled = normalize_min_max(&[vec![0.0, 7.0], vec![10.0, 7.0]]).unwrap();
/// assert_eq!(scaled, vec![vec![0.0, 0.5], vec![1.0, 0.5]]);
/// ```
pub fn normalize_min_max(data: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
    MinMaxScaler::fit(data)?.transform(data)
}

/// Parse raw cell values into numeric rows.
///
/// Cells are trimmed before parsing. The header row, if any, must already be
/// stripped by the caller.
///
/// # Errors
///
/// Returns [`Error::NonNumeric`] for the first cell that is not a finite
/// number, and [`Error::DimensionMismatch`] if rows differ in length.
pub fn parse_numeric_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Vec<Vec<f32>>> {
    let parsed: Vec<Vec<f32>> = rows
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| match cell.as_ref().trim().parse::<f32>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(Error::NonNumeric { row, column }),
                })
                .collect::<Result<Vec<f32>>>()
        })
        .collect::<Result<_>>()?;

    validate_dataset(&parsed)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescales_each_dimension_independently() {
        let data = vec![vec![0.0, 100.0], vec![5.0, 300.0], vec![10.0, 200.0]];
        let out = normalize_min_max(&data).unwrap();
        assert_eq!(out[0], vec![0.0, 0.0]);
        assert_eq!(out[1], vec![0.5, 1.0]);
        assert_eq!(out[2], vec![1.0, 0.5]);
    }

    #[test]
    fn zero_range_dimension_maps_to_half() {
        let data = vec![vec![3.0, 1.0], vec![3.0, 2.0], vec![3.0, 3.0]];
        let out = normalize_min_max(&data).unwrap();
        for row in &out {
            assert_eq!(row[0], 0.5);
        }
    }

    #[test]
    fn single_point_is_all_half() {
        let out = normalize_min_max(&[vec![4.0, -2.0, 9.0]]).unwrap();
        assert_eq!(out, vec![vec![0.5, 0.5, 0.5]]);
    }

    #[test]
    fn rejects_nan_with_position() {
        let data = vec![vec![1.0, 2.0], vec![3.0, f32::NAN]];
        assert!(matches!(
            normalize_min_max(&data),
            Err(Error::NonNumeric { row: 1, column: 1 })
        ));
    }

    #[test]
    fn range_wider_than_f32_max_stays_in_unit_interval() {
        let data = vec![vec![-3e38], vec![0.0], vec![3e38]];
        let out = normalize_min_max(&data).unwrap();
        assert_eq!(out[0], vec![0.0]);
        assert!((out[1][0] - 0.5).abs() < 1e-6);
        assert_eq!(out[2], vec![1.0]);

        let scaler = MinMaxScaler::fit(&data).unwrap();
        let back = scaler.inverse_transform(&[vec![0.0], vec![1.0]]).unwrap();
        assert_eq!(back, vec![vec![-3e38], vec![3e38]]);
    }

    #[test]
    fn rejects_ragged_rows_and_empty_input() {
        assert!(matches!(
            normalize_min_max(&[vec![1.0, 2.0], vec![3.0]]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(normalize_min_max(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn inverse_transform_recovers_raw_units() {
        let data = vec![vec![10.0, 5.0], vec![20.0, 5.0]];
        let scaler = MinMaxScaler::fit(&data).unwrap();
        let back = scaler
            .inverse_transform(&scaler.transform(&data).unwrap())
            .unwrap();
        assert_eq!(back, data);

        let mid = scaler.inverse_transform(&[vec![0.5, 0.5]]).unwrap();
        assert_eq!(mid, vec![vec![15.0, 5.0]]);
    }

    #[test]
    fn transform_checks_dimension() {
        let scaler = MinMaxScaler::fit(&[vec![0.0, 1.0], vec![1.0, 2.0]]).unwrap();
        assert!(scaler.transform(&[vec![0.5]]).is_err());
        assert!(scaler.inverse_transform(&[vec![0.5, 0.5, 0.5]]).is_err());
    }

    #[test]
    fn parses_cells_and_trims_whitespace() {
        let rows = vec![vec!["1.5", " 2 "], vec!["-3", "4e1"]];
        let parsed = parse_numeric_rows(&rows).unwrap();
        assert_eq!(parsed, vec![vec![1.5, 2.0], vec![-3.0, 40.0]]);
    }

    #[test]
    fn parse_rejects_non_numeric_cell() {
        let rows = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), "n/a".to_string()],
        ];
        assert!(matches!(
            parse_numeric_rows(&rows),
            Err(Error::NonNumeric { row: 1, column: 1 })
        ));
        assert!(matches!(
            parse_numeric_rows(&[vec!["inf"]]),
            Err(Error::NonNumeric { row: 0, column: 0 })
        ));
    }
}
