//! k-medoids clustering of 2D points.
//!
//! ## K-medoids vs k-means
//!
//! K-means represents each cluster by the mean of its points, which is usually not a data
//! point at all. **K-medoids** represents each cluster by a *medoid*: the member whose total
//! distance to the other members is smallest. Medoids are always real inputs, work with any
//! dissimilarity, and are less pulled around by outliers.
//!
//! ## The algorithm
//!
//! This crate implements the alternating form of PAM (partitioning around medoids):
//!
//! 1. Pick `k` distinct random points as medoids.
//! 2. Assign every point to its nearest medoid.
//! 3. In every cluster, elect the member with minimum total distance to the others. Empty
//!    clusters keep their medoid.
//! 4. If the elected medoids are the same points as before (in any order), stop. Otherwise
//!    go back to 2.
//!
//! **Objective**: the total deviation
//!
//! ```text
//! TD = Σ_k Σ_{x ∈ C_k} d(x, m_k)
//! ```
//!
//! never increases from one iteration to the next.
//!
//! **Distance**: Manhattan, `d(p, q) = |p.x - q.x| + |p.y - q.y|`.
//!
//! **Ties**: a point equidistant from several medoids joins the earliest one, and an
//! election tie goes to the member that comes first in pool order.
//!
//! ## Usage
//!
//! ```rust
//! use medoid::cluster::{Clustering, Kmedoids, Point, Session};
//!
//! let data: Vec<Point> = [(0, 0), (0, 1), (10, 10), (10, 11), (10, 9)]
//!     .into_iter()
//!     .map(Point::from)
//!     .collect();
//!
//! // One-shot
//! let labels = Kmedoids::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! // Step by step
//! let mut session = Session::new();
//! session.add_points(data);
//! session.seed_medoids_at(&[0, 2]).unwrap();
//! assert!(!session.step_once()); // already at the fixed point
//! assert_eq!(session.snapshot()[1].members.len(), 3);
//! ```

mod assign;
mod dataset;
mod kmedoids;
mod observer;
mod point;
mod seed;
mod session;
mod traits;
mod util;

pub use assign::{Clusters, Slot};
pub use dataset::Dataset;
pub use kmedoids::{Kmedoids, KmedoidsFit};
pub use observer::ClusterObserver;
pub use point::{distance, Point};
pub use session::{ClusterView, Session};
pub use traits::Clustering;
pub use util::{nearest_medoid, rank_by_total_distance, Ranked};
