use super::assign::Clusters;
use super::point::Point;

/// Receives notifications when a [`Session`](super::Session) changes its clusters.
///
/// This is the hook for a view layer: redraw on every call. All methods default to no-ops.
pub trait ClusterObserver {
    /// Medoids were (re)seeded and the first assignment pass ran.
    fn on_seeded(&mut self, _pool: &[Point], _clusters: &Clusters) {}

    /// An iteration changed the medoid set and points were reassigned.
    fn on_reassigned(&mut self, _pool: &[Point], _clusters: &Clusters) {}

    /// The convergence loop reached its fixed point after `n_iter` changing iterations.
    fn on_converged(&mut self, _pool: &[Point], _clusters: &Clusters, _n_iter: usize) {}
}
