//! Silhouette score (Rousseeuw, 1987).
//!
//! For a point i in cluster C:
//!
//! ```text
//! a(i) = mean distance from i to the other members of C
//! b(i) = min over other non-empty clusters C' of mean distance from i to C'
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//! ```
//!
//! `s(i)` near 1 means i sits well inside its cluster, near 0 means it lies on
//! a boundary, negative means it is closer to another cluster. The overall
//! score is the mean of `s(i)`.
//!
//! Conventions for the undefined cases:
//!
//! - fewer than two points or fewer than two clusters: the score is `0.0`;
//! - a point alone in its cluster scores `0` (there is no cohesion to measure);
//! - a point with no other non-empty cluster to compare against scores `0`;
//! - `a(i) = b(i) = 0` scores `0`.
//!
//! A `0.0` result therefore means "not computed" as often as "boundary";
//! callers should not read it as the worst possible value.
//!
//! Cost is O(n²) distance evaluations.

use super::distance::row_distance;
use ndarray::ArrayView2;

/// Mean silhouette over all rows of `data`.
///
/// `labels[i]` is the cluster of row `i`, each `< k`.
///
/// # Panics
///
/// Panics if `labels.len() != data.nrows()`, or (with `k >= 2` and at least
/// two rows) if any label is `>= k`.
pub fn silhouette_score(data: ArrayView2<'_, f32>, labels: &[usize], k: usize) -> f32 {
    let samples = silhouette_samples(data, labels, k);
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

/// Per-point silhouette values.
///
/// All zeros when the score is undefined (fewer than two points or clusters).
///
/// # Panics
///
/// Same conditions as [`silhouette_score`].
pub fn silhouette_samples(data: ArrayView2<'_, f32>, labels: &[usize], k: usize) -> Vec<f32> {
    let n = data.nrows();
    assert_eq!(labels.len(), n, "silhouette: expected one label per row");
    if n < 2 || k < 2 {
        return vec![0.0; n];
    }
    if let Some(&bad) = labels.iter().find(|&&l| l >= k) {
        panic!("silhouette: label {bad} out of range for k = {k}");
    }

    let mut sizes = vec![0usize; k];
    for &l in labels {
        sizes[l] += 1;
    }

    let mut sums = vec![0.0f32; k];
    (0..n)
        .map(|i| {
            let own = labels[i];
            if sizes[own] <= 1 {
                return 0.0;
            }

            sums.fill(0.0);
            let point = data.row(i);
            for (j, &l) in labels.iter().enumerate() {
                if j != i {
                    sums[l] += row_distance(point, data.row(j));
                }
            }

            let a = sums[own] / (sizes[own] - 1) as f32;
            let b = (0..k)
                .filter(|&c| c != own && sizes[c] > 0)
                .map(|c| sums[c] / sizes[c] as f32)
                .fold(f32::INFINITY, f32::min);

            if b.is_infinite() {
                return 0.0;
            }
            let denom = a.max(b);
            if denom == 0.0 {
                0.0
            } else {
                (b - a) / denom
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn well_separated_clusters_score_near_one() {
        let data = array![[0.0f32, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
        let s = silhouette_score(data.view(), &[0, 0, 1, 1], 2);
        assert!(s > 0.9, "got {s}");
        assert!(s <= 1.0);
    }

    #[test]
    fn hand_computed_value() {
        // 1-D: cluster 0 = {0, 2}, cluster 1 = {5}.
        let data = array![[0.0f32], [2.0], [5.0]];
        let samples = silhouette_samples(data.view(), &[0, 0, 1], 2);
        // Point 0: a = 2, b = 5 -> 0.6. Point 1: a = 2, b = 3 -> 1/3. Point 2: singleton -> 0.
        assert!((samples[0] - 0.6).abs() < 1e-6);
        assert!((samples[1] - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(samples[2], 0.0);

        let s = silhouette_score(data.view(), &[0, 0, 1], 2);
        assert!((s - (0.6 + 1.0 / 3.0) / 3.0).abs() < 1e-6);
    }

    #[test]
    fn bad_partition_is_negative() {
        let data = array![[0.0f32], [10.0], [0.1], [10.1]];
        let s = silhouette_score(data.view(), &[0, 0, 1, 1], 2);
        assert!(s < 0.0, "got {s}");
        assert!(s >= -1.0);
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        let one = array![[1.0f32, 2.0]];
        assert_eq!(silhouette_score(one.view(), &[0], 2), 0.0);

        let data = array![[0.0f32], [1.0], [2.0]];
        assert_eq!(silhouette_score(data.view(), &[0, 0, 0], 1), 0.0);
    }

    #[test]
    fn all_singletons_score_zero() {
        let data = array![[0.0f32], [1.0], [7.0]];
        assert_eq!(silhouette_score(data.view(), &[0, 1, 2], 3), 0.0);
    }

    #[test]
    fn empty_clusters_are_skipped() {
        // Cluster 1 is empty; every point still compares against cluster 2.
        let data = array![[0.0f32], [1.0], [10.0], [11.0]];
        let with_gap = silhouette_score(data.view(), &[0, 0, 2, 2], 3);
        let dense = silhouette_score(data.view(), &[0, 0, 1, 1], 2);
        assert!((with_gap - dense).abs() < 1e-6);
    }

    #[test]
    fn no_other_nonempty_cluster_scores_zero() {
        let data = array![[0.0f32], [1.0], [2.0]];
        assert_eq!(silhouette_score(data.view(), &[1, 1, 1], 2), 0.0);
    }

    #[test]
    #[should_panic(expected = "one label per row")]
    fn short_labels_panic() {
        let data = array![[0.0f32], [1.0], [2.0]];
        silhouette_score(data.view(), &[0, 1], 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn label_at_or_above_k_panics() {
        let data = array![[0.0f32], [1.0], [2.0]];
        silhouette_samples(data.view(), &[0, 1, 2], 2);
    }

    #[test]
    fn identical_points_score_zero() {
        let data = array![[1.0f32], [1.0], [1.0], [1.0]];
        assert_eq!(silhouette_score(data.view(), &[0, 0, 1, 1], 2), 0.0);
    }
}
