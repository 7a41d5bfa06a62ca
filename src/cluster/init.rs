//! Centroid seeding.
//!
//! Lloyd iterations only find a local optimum, so where they start matters.
//! Two strategies are provided:
//!
//! - **Random**: k distinct points drawn uniformly without replacement.
//! - **Farthest point** (also known as Rapid Centroid Estimation, RCE): the
//!   first centroid is a random point; each next centroid is the point whose
//!   distance to its nearest already-chosen centroid is largest. This is the
//!   deterministic cousin of k-means++ (which samples proportionally to D(x)²
//!   instead of taking the maximum), and spreads seeds across the data.
//!
//! Both take the random source as an argument so a seeded RNG makes the whole
//! run reproducible.

use super::distance::row_distance;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, Axis};
use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the initial centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitStrategy {
    /// k distinct data points chosen uniformly at random.
    Random,
    /// Random first point, then repeatedly the point farthest from its nearest
    /// chosen centroid.
    #[default]
    FarthestPoint,
}

/// Produce `k` initial centroids (a `k x d` matrix) from the rows of `data`.
///
/// # Errors
///
/// Fails if `k == 0`, `data` has no rows, or `k` exceeds the number of rows.
pub fn init_centroids<R: Rng + ?Sized>(
    data: ArrayView2<'_, f32>,
    k: usize,
    strategy: InitStrategy,
    rng: &mut R,
) -> Result<Array2<f32>> {
    let n = data.nrows();
    if n == 0 {
        return Err(Error::EmptyInput);
    }
    if k == 0 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        });
    }
    if k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    let picks = match strategy {
        InitStrategy::Random => random_indices(n, k, rng),
        InitStrategy::FarthestPoint => farthest_point_indices(data, k, rng),
    };

    Ok(data.select(Axis(0), &picks))
}

fn random_indices<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k).into_vec()
}

/// Greedy max-min selection. Ties keep the lowest point index.
fn farthest_point_indices<R: Rng + ?Sized>(
    data: ArrayView2<'_, f32>,
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = data.nrows();
    let mut picks = Vec::with_capacity(k);
    picks.push(rng.random_range(0..n));

    // Distance from each point to its nearest chosen centroid, updated
    // incrementally as centroids are added.
    let mut nearest = vec![f32::INFINITY; n];

    while picks.len() < k {
        let last = data.row(picks[picks.len() - 1]);
        let mut best = 0usize;
        let mut best_dist = f32::NEG_INFINITY;

        for (i, slot) in nearest.iter_mut().enumerate() {
            let d = row_distance(data.row(i), last);
            if d < *slot {
                *slot = d;
            }
            if *slot > best_dist {
                best_dist = *slot;
                best = i;
            }
        }

        picks.push(best);
    }

    picks
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashSet;

    #[test]
    fn random_picks_distinct_points() {
        let data = array![[0.0f32, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let mut rng = StdRng::seed_from_u64(7);
        let c = init_centroids(data.view(), 5, InitStrategy::Random, &mut rng).unwrap();

        let firsts: HashSet<i64> = c.column(0).iter().map(|&x| x as i64).collect();
        assert_eq!(firsts.len(), 5, "every point picked exactly once");
    }

    #[test]
    fn farthest_point_spreads_seeds() {
        // Whatever the first pick, the second seed must come from the other
        // group because the groups are far apart.
        let data = array![[0.0f32, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let c =
                init_centroids(data.view(), 2, InitStrategy::FarthestPoint, &mut rng).unwrap();
            let near_origin = |r: usize| c[[r, 0]] < 5.0;
            assert_ne!(near_origin(0), near_origin(1), "seed {seed}");
        }
    }

    #[test]
    fn farthest_point_is_deterministic_after_first_pick() {
        let data = array![[0.0f32], [1.0], [5.0], [9.0], [10.0]];
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        let ca = init_centroids(data.view(), 3, InitStrategy::FarthestPoint, &mut a).unwrap();
        let cb = init_centroids(data.view(), 3, InitStrategy::FarthestPoint, &mut b).unwrap();
        assert_eq!(ca, cb);
    }

    #[test]
    fn farthest_point_follows_max_min_rule() {
        let data = array![[0.0f32], [1.0], [5.0], [9.0], [10.0]];
        let picks = farthest_point_indices(data.view(), 3, &mut ZeroRng);
        // From 0.0 the farthest is 10.0; then 5.0 is 5 away from both.
        assert_eq!(picks, vec![0, 4, 2]);
    }

    #[test]
    fn farthest_point_ties_keep_lowest_index() {
        let data = array![[0.0f32], [2.0], [-2.0]];
        let picks = farthest_point_indices(data.view(), 2, &mut ZeroRng);
        assert_eq!(picks, vec![0, 1]);
    }

    #[test]
    fn k_equal_to_n_with_farthest_point_uses_every_point() {
        let data = array![[0.0f32, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0]];
        let mut rng = StdRng::seed_from_u64(11);
        let c = init_centroids(data.view(), 4, InitStrategy::FarthestPoint, &mut rng).unwrap();
        let mut rows: Vec<(i64, i64)> = c
            .rows()
            .into_iter()
            .map(|r| (r[0] as i64, r[1] as i64))
            .collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![(0, 0), (0, 1), (1, 0), (5, 5)]);
    }

    #[test]
    fn validation_errors() {
        let data = array![[0.0f32], [1.0]];
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in [InitStrategy::Random, InitStrategy::FarthestPoint] {
            assert!(matches!(
                init_centroids(data.view(), 0, strategy, &mut rng),
                Err(Error::InvalidParameter { name: "k", .. })
            ));
            assert!(matches!(
                init_centroids(data.view(), 3, strategy, &mut rng),
                Err(Error::InvalidClusterCount {
                    requested: 3,
                    n_items: 2
                })
            ));
            let empty = Array2::<f32>::zeros((0, 1));
            assert!(matches!(
                init_centroids(empty.view(), 1, strategy, &mut rng),
                Err(Error::EmptyInput)
            ));
        }
    }

    /// Always draws zero, so `random_range(0..n)` picks index 0.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }
}
