//! k-medoids clustering for 2D points.
//!
//! `medoid` implements partitioning around medoids (PAM) in its alternating form: points
//! are assigned to their nearest medoid, each cluster then elects the member with the
//! smallest total Manhattan distance to the rest, and the two steps repeat until the
//! medoid set stops changing.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`Session`]: owned clustering state with step-by-step control and observer hooks
//! - [`Kmedoids`]: a one-shot estimator implementing [`Clustering`]

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    distance, ClusterObserver, ClusterView, Clustering, Clusters, Dataset, Kmedoids, KmedoidsFit,
    Point, Session,
};
pub use error::{Error, Result};
