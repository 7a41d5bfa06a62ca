//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS). The foundational clustering algorithm, dating to 1957 (Lloyd).
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centroids ([`InitStrategy`])
//! 2. **Assign**: each point → nearest centroid
//! 3. **Update**: each centroid → mean or median of its points ([`UpdateRule`])
//! 4. Repeat until the [`Convergence`] policy says stop
//!
//! WCSS never increases under mean updates, and there are finitely many
//! partitions, so assignments eventually stop changing. Median updates
//! minimize the L1 objective per dimension instead and converge the same way
//! in practice; the iteration cap bounds both.
//!
//! # Engine lifecycle
//!
//! ```text
//! Kmeans (config) --engine()--> Initialized --step()--> Iterating
//!                                                  |--> Converged
//!                                                  '--> MaxIterationsReached
//! ```
//!
//! Validation happens once, when the engine is built. After that nothing can
//! fail: [`KmeansEngine::run`] and [`KmeansEngine::step`] are infallible.
//!
//! # Empty clusters
//!
//! A cluster that loses all of its points keeps its previous centroid rather
//! than being re-seeded. The slot stays alive and can win points back later.

use super::distance::squared_row_distance;
use super::init::{init_centroids, InitStrategy};
use super::silhouette;
use super::step::{assign, clusters_from_assignments, update, UpdateRule};
use super::traits::Clustering;
use super::util::to_matrix;
use crate::error::{Error, Result};
use ndarray::Array2;
use rand::prelude::*;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When the iteration loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Convergence {
    /// Stop once an assignment step changes nothing (never on the first
    /// iteration).
    #[default]
    AssignmentsStable,
    /// Always run `max_iter` iterations, e.g. to record every intermediate
    /// state for visualization.
    FixedIterations,
    /// Stop when assignments are stable or when the total squared centroid
    /// movement of an iteration drops below the tolerance.
    CentroidShift(f32),
}

/// Observable engine states.
///
/// The configuration ([`Kmeans`]) is the uninitialized state; an engine only
/// exists once validation and seeding have succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EngineState {
    /// Centroids seeded, no iteration run yet.
    Initialized,
    /// At least one iteration run, no stopping condition reached.
    Iterating,
    /// The convergence policy stopped the loop.
    Converged,
    /// The iteration cap was hit first.
    MaxIterationsReached,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// The convergence policy stopped the loop.
    Converged,
    /// The loop ran `max_iter` iterations.
    MaxIterationsReached,
}

/// K-means configuration.
///
/// ```rust
/// use kcluster::{Convergence, InitStrategy, Kmeans, UpdateRule};
///
/// let data = vec![
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 10.0],
///     vec![10.0, 11.0],
/// ];
///
/// let fit = Kmeans::new(2)
///     .with_init(InitStrategy::FarthestPoint)
///     .with_update(UpdateRule::Mean)
///     .with_convergence(Convergence::AssignmentsStable)
///     .with_max_iter(10)
///     .with_seed(42)
///     .fit(&data)
///     .unwrap();
///
/// assert_eq!(fit.assignments[0], fit.assignments[1]);
/// assert_ne!(fit.assignments[0], fit.assignments[2]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Seeding strategy.
    init: InitStrategy,
    /// Centroid update rule.
    update: UpdateRule,
    /// Stopping policy.
    convergence: Convergence,
    /// Random seed.
    seed: Option<u64>,
    /// Whether `run` also computes the silhouette score.
    score_silhouette: bool,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            init: InitStrategy::default(),
            update: UpdateRule::default(),
            convergence: Convergence::default(),
            seed: None,
            score_silhouette: false,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the seeding strategy.
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    /// Set the centroid update rule.
    pub fn with_update(mut self, update: UpdateRule) -> Self {
        self.update = update;
        self
    }

    /// Set the stopping policy.
    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    /// Compute the silhouette score as part of every run.
    pub fn with_silhouette(mut self, enabled: bool) -> Self {
        self.score_silhouette = enabled;
        self
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Maximum iterations.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Validate `data`, seed centroids, and return a ready engine.
    ///
    /// Uses the configured seed, or the thread RNG when none is set.
    pub fn engine(&self, data: &[Vec<f32>]) -> Result<KmeansEngine> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.engine_with_rng(data, &mut rng)
    }

    /// Like [`Kmeans::engine`], drawing the seeding randomness from `rng`.
    ///
    /// The configured seed is ignored.
    pub fn engine_with_rng<R: Rng + ?Sized>(
        &self,
        data: &[Vec<f32>],
        rng: &mut R,
    ) -> Result<KmeansEngine> {
        self.validate()?;
        let data = to_matrix(data)?;
        let initial = init_centroids(data.view(), self.k, self.init, rng)?;

        debug!(
            n = data.nrows(),
            d = data.ncols(),
            k = self.k,
            init = ?self.init,
            update = ?self.update,
            "k-means engine initialized"
        );

        Ok(KmeansEngine::new(self.clone(), data, initial))
    }

    /// Build an engine and run it once.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        Ok(self.engine(data)?.run())
    }

    fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if let Convergence::CentroidShift(tol) = self.convergence {
            if tol.is_nan() || tol < 0.0 {
                return Err(Error::InvalidParameter {
                    name: "tolerance",
                    message: "must be a non-negative number",
                });
            }
        }
        Ok(())
    }
}

impl Default for Kmeans {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.assignments)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KmeansFit {
    /// `cluster_id -> point indices`, ascending within each cluster.
    pub clusters: Vec<Vec<usize>>,
    /// `point index -> cluster_id`.
    pub assignments: Vec<usize>,
    /// Final centroids, one row per cluster.
    pub centroids: Array2<f32>,
    /// Cluster sizes after every iteration.
    pub history: Vec<Vec<usize>>,
    /// How the run ended.
    pub termination: Termination,
    /// Number of iterations run.
    pub iterations: usize,
    /// First iteration (1-based) whose assignment step changed nothing.
    ///
    /// Under [`Convergence::FixedIterations`] the loop keeps going past this
    /// point; the field still tells when the partition had settled.
    pub stable_at: Option<usize>,
    /// Within-cluster sum of squared distances to the centroids.
    pub inertia: f32,
    /// Silhouette score, when requested with [`Kmeans::with_silhouette`].
    pub silhouette: Option<f32>,
}

impl KmeansFit {
    /// Number of points per cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }
}

/// A validated, seeded k-means run over an owned copy of the dataset.
///
/// The engine owns its centroids and assignment; `step` and `run` take
/// `&mut self`, so one engine is never driven from two places at once.
#[derive(Debug, Clone)]
pub struct KmeansEngine {
    config: Kmeans,
    data: Array2<f32>,
    initial: Array2<f32>,
    centroids: Array2<f32>,
    assignments: Vec<Option<usize>>,
    // Cache derived from `assignments`; rebuilt by every assignment step.
    clusters: Vec<Vec<usize>>,
    history: Vec<Vec<usize>>,
    iteration: usize,
    stable_at: Option<usize>,
    // Total squared centroid movement of the latest iteration.
    last_shift: f32,
    state: EngineState,
}

impl KmeansEngine {
    fn new(config: Kmeans, data: Array2<f32>, initial: Array2<f32>) -> Self {
        let n = data.nrows();
        let k = config.k;
        Self {
            config,
            data,
            centroids: initial.clone(),
            initial,
            assignments: vec![None; n],
            clusters: vec![Vec::new(); k],
            history: Vec::new(),
            iteration: 0,
            stable_at: None,
            last_shift: f32::INFINITY,
            state: EngineState::Initialized,
        }
    }

    /// Restore the seeded centroids and forget all assignments.
    pub fn reset(&mut self) {
        self.centroids.assign(&self.initial);
        self.assignments.fill(None);
        self.clusters.iter_mut().for_each(Vec::clear);
        self.history.clear();
        self.iteration = 0;
        self.stable_at = None;
        self.last_shift = f32::INFINITY;
        self.state = EngineState::Initialized;
    }

    /// Run one assignment step and one update step.
    ///
    /// Records a history entry and returns whether any assignment changed.
    /// Calling `step` past a stopping condition is allowed and keeps
    /// iterating; the state is left to [`KmeansEngine::run`] to settle.
    pub fn step(&mut self) -> bool {
        let changed = assign(self.data.view(), self.centroids.view(), &mut self.assignments);
        self.clusters = clusters_from_assignments(&self.assignments, self.config.k);

        let next = update(
            self.data.view(),
            &self.clusters,
            self.centroids.view(),
            self.config.update,
        );
        let shift: f32 = self
            .centroids
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        self.centroids = next;

        self.iteration += 1;
        self.history.push(self.cluster_sizes());
        if !changed && self.iteration > 1 && self.stable_at.is_none() {
            self.stable_at = Some(self.iteration);
        }
        if self.state == EngineState::Initialized {
            self.state = EngineState::Iterating;
        }

        debug!(
            iteration = self.iteration,
            changed,
            shift,
            sizes = ?self.history.last(),
            "k-means iteration"
        );

        self.last_shift = shift;
        changed
    }

    /// Run from the seeded centroids until the convergence policy or the
    /// iteration cap stops the loop.
    pub fn run(&mut self) -> KmeansFit {
        self.reset();

        let mut termination = Termination::MaxIterationsReached;
        while self.iteration < self.config.max_iter {
            let changed = self.step();
            if self.should_stop(changed) {
                termination = Termination::Converged;
                break;
            }
        }

        self.state = match termination {
            Termination::Converged => EngineState::Converged,
            Termination::MaxIterationsReached => EngineState::MaxIterationsReached,
        };
        debug!(?termination, iterations = self.iteration, "k-means finished");

        KmeansFit {
            clusters: self.clusters.clone(),
            assignments: self.assignments.iter().flatten().copied().collect(),
            centroids: self.centroids.clone(),
            history: self.history.clone(),
            termination,
            iterations: self.iteration,
            stable_at: self.stable_at,
            inertia: self.inertia(),
            silhouette: self
                .config
                .score_silhouette
                .then(|| self.silhouette_score()),
        }
    }

    fn should_stop(&self, changed: bool) -> bool {
        // Never stop on the first iteration: its assignment step always
        // changes against the unassigned sentinel.
        let settled = !changed && self.iteration > 1;
        match self.config.convergence {
            Convergence::AssignmentsStable => settled,
            Convergence::FixedIterations => false,
            Convergence::CentroidShift(tol) => {
                settled || (self.iteration > 1 && self.last_shift < tol)
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Iterations run since the last reset.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Current centroids, one row per cluster.
    pub fn centroids(&self) -> &Array2<f32> {
        &self.centroids
    }

    /// Current assignment per point (`None` before the first iteration).
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    /// Current members per cluster.
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Cluster sizes recorded after each iteration.
    pub fn history(&self) -> &[Vec<usize>] {
        &self.history
    }

    /// Number of points per cluster, index-aligned with cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// Each input point with its current cluster id.
    pub fn labeled_points(&self) -> Vec<(Vec<f32>, Option<usize>)> {
        self.data
            .rows()
            .into_iter()
            .zip(self.assignments.iter())
            .map(|(row, &label)| (row.to_vec(), label))
            .collect()
    }

    /// Within-cluster sum of squared distances (0 before the first iteration).
    pub fn inertia(&self) -> f32 {
        self.data
            .rows()
            .into_iter()
            .zip(self.assignments.iter())
            .filter_map(|(row, label)| {
                label.map(|c| squared_row_distance(row, self.centroids.row(c)))
            })
            .sum()
    }

    /// Silhouette score of the current partition.
    ///
    /// Returns `0.0` before the first iteration, and whenever the score is
    /// undefined (fewer than two points or clusters).
    pub fn silhouette_score(&self) -> f32 {
        if self.assignments.iter().any(Option::is_none) {
            return 0.0;
        }
        let labels: Vec<usize> = self.assignments.iter().flatten().copied().collect();
        silhouette::silhouette_score(self.data.view(), &labels, self.config.k)
    }
}
