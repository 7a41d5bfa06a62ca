//! K-means clustering for dense vectors.
//!
//! `kcluster` partitions N-dimensional points into k groups by Lloyd
//! iterations and scores the result with the silhouette coefficient.
//!
//! The primary public API is under [`cluster`], which provides:
//! - min-max normalization of raw features
//! - random and farthest-point (RCE) centroid seeding
//! - mean and median centroid updates
//! - an iteration engine with convergence-driven or fixed-length runs and a
//!   per-iteration history of cluster sizes
//! - the silhouette score

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    euclidean, normalize_min_max, parse_numeric_rows, silhouette_samples, silhouette_score,
    Clustering, Convergence, EngineState, InitStrategy, Kmeans, KmeansEngine, KmeansFit,
    MinMaxScaler, Termination, UpdateRule,
};
pub use error::{Error, Result};
