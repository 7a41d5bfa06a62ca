//! K-means clustering and the pieces it is built from.
//!
//! ## Pipeline
//!
//! ```text
//! raw rows --normalize--> [0,1]^d --init--> centroids
//!                                   '--> assign <-> update (engine loop)
//!                                                   '--> silhouette
//! ```
//!
//! - [`distance`]: Euclidean distance.
//! - [`normalize`]: min-max scaling, so no feature dominates the distance.
//! - [`init`]: random or farthest-point (RCE) centroid seeding.
//! - [`step`]: the assignment and update halves of a Lloyd iteration.
//! - [`Kmeans`] / [`KmeansEngine`]: configuration and the iteration loop.
//! - [`silhouette`]: cluster quality in `[-1, 1]`.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the center of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! ## Usage
//!
//! ```rust
//! use kcluster::cluster::{normalize_min_max, Clustering, InitStrategy, Kmeans, UpdateRule};
//!
//! let raw = vec![
//!     vec![0.0, 100.0],
//!     vec![0.5, 110.0],
//!     vec![9.0, 900.0],
//!     vec![9.5, 950.0],
//! ];
//! let data = normalize_min_max(&raw).unwrap();
//!
//! let labels = Kmeans::new(2)
//!     .with_init(InitStrategy::Random)
//!     .with_update(UpdateRule::Median)
//!     .with_seed(7)
//!     .fit_predict(&data)
//!     .unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! let mut engine = Kmeans::new(2).with_seed(7).engine(&data).unwrap();
//! let fit = engine.run();
//! assert_eq!(fit.cluster_sizes(), engine.cluster_sizes());
//! assert!(engine.silhouette_score() > 0.5);
//! ```

pub mod distance;
pub mod init;
mod kmeans;
pub mod normalize;
pub mod silhouette;
pub mod step;
mod traits;
mod util;

pub use distance::{euclidean, squared_euclidean, try_euclidean};
pub use init::{init_centroids, InitStrategy};
pub use kmeans::{Convergence, EngineState, Kmeans, KmeansEngine, KmeansFit, Termination};
pub use normalize::{normalize_min_max, parse_numeric_rows, MinMaxScaler};
pub use silhouette::{silhouette_samples, silhouette_score};
pub use step::UpdateRule;
pub use traits::Clustering;
