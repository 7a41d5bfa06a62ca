//! The two halves of a Lloyd iteration.
//!
//! - [`assign`] moves every point to its nearest centroid.
//! - [`update`] moves every centroid to the center of its points, either the
//!   mean or the per-dimension median.

use super::distance::squared_row_distance;
use ndarray::{Array2, ArrayView2, Axis};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a centroid is recomputed from its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpdateRule {
    /// Per-dimension arithmetic mean (classic k-means).
    #[default]
    Mean,
    /// Per-dimension median. Less sensitive to outliers than the mean.
    Median,
}

/// Assign every row of `data` to its nearest centroid.
///
/// Ties go to the lowest centroid index. `assignments` holds the previous
/// assignment (`None` = never assigned) and is overwritten in place.
///
/// Returns `true` if any point's cluster changed.
pub fn assign(
    data: ArrayView2<'_, f32>,
    centroids: ArrayView2<'_, f32>,
    assignments: &mut [Option<usize>],
) -> bool {
    debug_assert_eq!(data.nrows(), assignments.len());
    debug_assert_eq!(data.ncols(), centroids.ncols());

    let mut changed = false;
    for (point, slot) in data.rows().into_iter().zip(assignments.iter_mut()) {
        let mut best_cluster = 0;
        let mut best_dist = f32::INFINITY;

        for (c, centroid) in centroids.rows().into_iter().enumerate() {
            let dist = squared_row_distance(point, centroid);
            if dist < best_dist {
                best_dist = dist;
                best_cluster = c;
            }
        }

        if *slot != Some(best_cluster) {
            changed = true;
            *slot = Some(best_cluster);
        }
    }
    changed
}

/// Group point indices by cluster id.
///
/// Unassigned points are skipped.
pub fn clusters_from_assignments(assignments: &[Option<usize>], k: usize) -> Vec<Vec<usize>> {
    let mut clusters = vec![Vec::new(); k];
    for (i, label) in assignments.iter().enumerate() {
        if let Some(c) = *label {
            clusters[c].push(i);
        }
    }
    clusters
}

/// Recompute centroids from their members.
///
/// `clusters[c]` lists the rows of `data` assigned to cluster `c`. A cluster
/// with no members keeps its previous centroid.
pub fn update(
    data: ArrayView2<'_, f32>,
    clusters: &[Vec<usize>],
    previous: ArrayView2<'_, f32>,
    rule: UpdateRule,
) -> Array2<f32> {
    debug_assert_eq!(clusters.len(), previous.nrows());

    let mut next = previous.to_owned();
    for (c, members) in clusters.iter().enumerate() {
        if members.is_empty() {
            trace!(cluster = c, "empty cluster keeps its centroid");
            continue;
        }

        let subset = data.select(Axis(0), members);
        let mut row = next.row_mut(c);
        match rule {
            UpdateRule::Mean => {
                if let Some(mean) = subset.mean_axis(Axis(0)) {
                    row.assign(&mean);
                }
            }
            UpdateRule::Median => {
                for (j, column) in subset.columns().into_iter().enumerate() {
                    let mut values = column.to_vec();
                    row[j] = median(&mut values);
                }
            }
        }
    }
    next
}

/// Median of a non-empty slice; even lengths average the two middle values.
fn median(values: &mut [f32]) -> f32 {
    debug_assert!(!values.is_empty());
    values.sort_unstable_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
