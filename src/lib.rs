//! Classical clustering algorithms in Rust: K-Means, K-Medoids and agglomerative hierarchical
//! clustering ("HCA"). Generic over floating point numeric types.
//!
//! * K-Means and K-Medoids share one partitional driver. K centers are placed at random
//!   inside the bounding box of the data, using a generator seeded afresh on every call so
//!   results are reproducible. Then, for a fixed number of rounds, every point is assigned to
//!   its nearest center and the centers are recalculated. K-Means moves centers to the mean
//!   of their points; K-Medoids moves them to the medoid, the member point with the smallest
//!   total distance to the rest of its group.
//! * HCA starts with every point as its own cluster and repeatedly merges the closest pair,
//!   using average linkage to update distances. It can stop once K clusters remain, or run
//!   to a single cluster and return the full merge history as a dendrogram.
//!
//! All distances are Euclidean. Results keep the input order of the data, so labels can be
//! joined back onto the original records by position. The [`spread`] metrics help choose K,
//! and [`GroupStatistics`] summarises categorical columns per group.
//!
//! # Examples
//! ```
//!use kclust::{ClusterHyperParams, Hca, KMeans, Partitional};
//!
//!let data: Vec<Vec<f32>> = vec![
//!    vec![1.5, 2.2],
//!    vec![1.0, 1.1],
//!    vec![1.2, 1.4],
//!    vec![0.8, 1.0],
//!    vec![3.7, 4.0],
//!    vec![3.9, 3.9],
//!    vec![3.6, 4.1],
//!    vec![3.8, 3.9],
//!];
//!let hp = ClusterHyperParams::builder().groups(2).build();
//!
//!let partition = Partitional::new(&data, hp.clone(), KMeans).cluster().unwrap();
//!let labels = partition.labels();
//!assert!(labels[..4].iter().all(|&label| label == labels[0]));
//!assert!(labels[4..].iter().all(|&label| label == labels[4]));
//!
//!let partition = Hca::new(&data, hp).cluster_until_k().unwrap();
//!assert_eq!(vec![0, 0, 0, 0, 1, 1, 1, 1], partition.labels());
//! ```

pub use crate::centers::{centroid, medoid, Center};
pub use crate::data_wrappers::{LabelledPoint, MergeEvent, Partition};
pub use crate::distance::distance;
pub use crate::error::ClusterError;
pub use crate::hca::{hca, hca_dendrogram, Dendrogram, Hca};
pub use crate::hyper_parameters::{ClusterHyperParams, HyperParamBuilder};
pub use crate::method::Method;
pub use crate::partitional::{
    init_centers, kmeans, kmedoids, KMeans, KMedoids, Partitional, UpdateStrategy,
};
pub use crate::report::GroupStatistics;
pub use crate::spread::{knee_sweep, spread, Spread};

mod centers;
mod data_wrappers;
mod distance;
mod distance_matrix;
mod error;
mod hca;
mod hyper_parameters;
mod method;
mod partitional;
mod report;
mod spread;
mod validation;
