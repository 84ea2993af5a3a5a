//! Stateful k-medoids runs.
//!
//! A [`Session`] owns the point pool, the current medoid set and the cluster mapping. A run
//! looks like:
//!
//! 1. [`Session::add_dataset`] / [`Session::add_points`] fill the pool.
//! 2. [`Session::seed_medoids`] picks `k` random pool points and assigns every point.
//! 3. [`Session::step_once`] elects a new medoid per cluster and reassigns, or reports that
//!    nothing changed. [`Session::run_to_convergence`] repeats it until then.
//!
//! Medoids are stored as pool indices, so a medoid is always a real input point.

use std::fmt;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::assign::{self, Clusters};
use super::dataset::Dataset;
use super::observer::ClusterObserver;
use super::point::Point;
use super::seed::random_medoids;
use super::util::{rank_by_total_distance, same_medoid_set};
use crate::error::{Error, Result};

/// A cluster materialized as coordinates, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterView {
    /// The cluster's medoid.
    pub medoid: Point,
    /// Member points, in pool order.
    pub members: Vec<Point>,
}

/// Clustering state for one pool of points.
pub struct Session {
    points: Vec<Point>,
    datasets: Vec<(String, Range<usize>)>,
    medoids: Vec<usize>,
    clusters: Clusters,
    k: usize,
    rng: StdRng,
    max_iter: Option<usize>,
    observer: Option<Box<dyn ClusterObserver>>,
}

impl Session {
    /// Create an empty session with an entropy-seeded RNG and no iteration cap.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            datasets: Vec::new(),
            medoids: Vec::new(),
            clusters: Clusters::default(),
            k: 0,
            rng: StdRng::from_rng(&mut rand::rng()),
            max_iter: None,
            observer: None,
        }
    }

    /// Seed the RNG used for medoid seeding, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Cap the number of medoid-changing iterations in [`Session::run_to_convergence`].
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Attach an observer that is told about every change to the clusters.
    pub fn with_observer(mut self, observer: impl ClusterObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Append points to the pool. Duplicates are kept.
    ///
    /// The pool changed, so the current medoids and clusters are discarded.
    pub fn add_points(&mut self, points: impl IntoIterator<Item = Point>) {
        let before = self.points.len();
        self.points.extend(points);
        debug!(added = self.points.len() - before, total = self.points.len(), "Points added");
        self.reset();
    }

    /// Append a named dataset to the pool.
    pub fn add_dataset(&mut self, dataset: Dataset) {
        let (name, points) = dataset.into_parts();
        let start = self.points.len();
        self.add_points(points);
        let range = start..self.points.len();
        debug!(dataset = %name, len = range.len(), "Dataset added");
        self.datasets.push((name, range));
    }

    /// Drop the medoid set and cluster mapping, keeping the pool.
    pub fn reset(&mut self) {
        self.medoids.clear();
        self.clusters = Clusters::default();
    }

    /// Drop everything, including the pool.
    pub fn clear(&mut self) {
        self.points.clear();
        self.datasets.clear();
        self.k = 0;
        self.reset();
    }

    /// Start a run: choose `min(k, pool size)` distinct random points as medoids, then assign.
    pub fn seed_medoids(&mut self, k: usize) -> Result<()> {
        if k == 0 {
            return Err(Error::InvalidClusterCount { requested: k });
        }
        if self.points.is_empty() {
            warn!(k, "Cannot seed medoids: no data");
            return Err(Error::EmptyPointPool);
        }
        if k > self.points.len() {
            debug!(k, pool = self.points.len(), "Cluster count capped at pool size");
        }

        let medoids = random_medoids(&mut self.rng, self.points.len(), k);
        self.start_run(k, medoids);
        Ok(())
    }

    /// Start a run from explicit pool indices instead of random ones.
    pub fn seed_medoids_at(&mut self, indices: &[usize]) -> Result<()> {
        if self.points.is_empty() {
            return Err(Error::EmptyPointPool);
        }
        if indices.is_empty() {
            return Err(Error::InvalidClusterCount { requested: 0 });
        }
        for (pos, &index) in indices.iter().enumerate() {
            if index >= self.points.len() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: self.points.len(),
                });
            }
            if indices[..pos].contains(&index) {
                return Err(Error::DuplicateMedoid { index });
            }
        }

        self.start_run(indices.len(), indices.to_vec());
        Ok(())
    }

    fn start_run(&mut self, k: usize, medoids: Vec<usize>) {
        self.reset();
        self.k = k;
        self.medoids = medoids;
        info!(k = self.medoids.len(), pool = self.points.len(), "Medoids seeded");

        self.assign_all();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_seeded(&self.points, &self.clusters);
        }
    }

    /// Assign every pool point to its nearest medoid, replacing the previous mapping.
    ///
    /// Returns `false`, leaving state untouched, when there are no points or no medoids.
    pub fn assign_all(&mut self) -> bool {
        if self.points.is_empty() || self.medoids.is_empty() {
            warn!(
                points = self.points.len(),
                medoids = self.medoids.len(),
                "Nothing to assign"
            );
            return false;
        }
        self.clusters = assign::assign_all(&self.points, &self.medoids);
        true
    }

    /// Run one medoid-update iteration.
    ///
    /// Every cluster elects the member with the smallest total distance to the other members;
    /// an empty cluster keeps its medoid. If the elected set holds the same coordinates as
    /// the current one, nothing changes and `false` is returned. Otherwise the new medoids are
    /// committed, points are reassigned, and `true` is returned.
    pub fn step_once(&mut self) -> bool {
        if self.medoids.is_empty() {
            debug!("No medoids to update");
            return false;
        }

        let mut candidates: Vec<usize> = self
            .clusters
            .iter()
            .map(|slot| {
                let members: Vec<Point> = slot.members.iter().map(|&i| self.points[i]).collect();
                rank_by_total_distance(&members)
                    .first()
                    .map_or(slot.medoid, |best| slot.members[best.index])
            })
            .collect();
        self.resolve_collisions(&mut candidates);

        let old: Vec<Point> = self.medoid_points();
        let new: Vec<Point> = candidates.iter().map(|&i| self.points[i]).collect();
        if same_medoid_set(&old, &new) {
            debug!(k = self.medoids.len(), "Medoid set unchanged");
            return false;
        }

        self.medoids = candidates;
        self.assign_all();
        debug!(cost = self.cost(), "Medoids updated");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_reassigned(&self.points, &self.clusters);
        }
        true
    }

    // Only an empty slot can collide: it kept a medoid that shares coordinates with an
    // earlier medoid, and that cluster just elected the very same index. The empty slot
    // moves to the first pool index no slot uses.
    fn resolve_collisions(&self, candidates: &mut [usize]) {
        for (pos, slot) in self.clusters.iter().enumerate() {
            if !slot.members.is_empty() {
                continue;
            }
            let kept = candidates[pos];
            let taken = candidates
                .iter()
                .enumerate()
                .any(|(other, &c)| other != pos && c == kept);
            if !taken {
                continue;
            }
            if let Some(free) = (0..self.points.len()).find(|i| !candidates.contains(i)) {
                debug!(slot = pos, from = kept, to = free, "Empty cluster moved off a shared medoid");
                candidates[pos] = free;
            }
        }
    }

    /// Repeat [`Session::step_once`] until the medoid set stops changing.
    ///
    /// Returns the number of iterations that changed the medoids. Without a cap set through
    /// [`Session::with_max_iter`] the loop is unbounded; with one, exceeding it is an error.
    pub fn run_to_convergence(&mut self) -> Result<usize> {
        let mut n_iter = 0;
        while self.step_once() {
            n_iter += 1;
            if let Some(max_iter) = self.max_iter {
                if n_iter > max_iter {
                    warn!(max_iter, "Convergence loop exceeded its iteration cap");
                    return Err(Error::ConvergenceTimeout { max_iter });
                }
            }
        }

        if !self.medoids.is_empty() {
            info!(n_iter, cost = self.cost(), "Converged");
            if let Some(observer) = self.observer.as_mut() {
                observer.on_converged(&self.points, &self.clusters, n_iter);
            }
        }
        Ok(n_iter)
    }

    /// The current cluster mapping.
    pub fn current_clusters(&self) -> &Clusters {
        &self.clusters
    }

    /// The current clusters as coordinates.
    pub fn snapshot(&self) -> Vec<ClusterView> {
        self.clusters
            .iter()
            .map(|slot| ClusterView {
                medoid: self.points[slot.medoid],
                members: slot.members.iter().map(|&i| self.points[i]).collect(),
            })
            .collect()
    }

    /// Medoid set as pool indices.
    pub fn medoids(&self) -> &[usize] {
        &self.medoids
    }

    /// Medoid set as points.
    pub fn medoid_points(&self) -> Vec<Point> {
        self.medoids.iter().map(|&i| self.points[i]).collect()
    }

    /// The point pool.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Named datasets and their points, in the order they were added.
    pub fn datasets(&self) -> impl Iterator<Item = (&str, &[Point])> + '_ {
        self.datasets
            .iter()
            .map(|(name, range)| (name.as_str(), &self.points[range.clone()]))
    }

    /// Cluster count requested for the current run (before capping), or 0 if none.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Sum of distances from every assigned point to its medoid.
    pub fn cost(&self) -> f64 {
        self.clusters.cost(&self.points)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("points", &self.points.len())
            .field("datasets", &self.datasets)
            .field("medoids", &self.medoids)
            .field("clusters", &self.clusters)
            .field("k", &self.k)
            .field("max_iter", &self.max_iter)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scenario_pool() -> Vec<Point> {
        [(0, 0), (0, 1), (10, 10), (10, 11), (10, 9)]
            .into_iter()
            .map(Point::from)
            .collect()
    }

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[derive(Default)]
    struct Counts {
        seeded: usize,
        reassigned: usize,
        converged: Option<usize>,
    }

    struct Recorder(Rc<RefCell<Counts>>);

    impl ClusterObserver for Recorder {
        fn on_seeded(&mut self, _pool: &[Point], _clusters: &Clusters) {
            self.0.borrow_mut().seeded += 1;
        }

        fn on_reassigned(&mut self, _pool: &[Point], _clusters: &Clusters) {
            self.0.borrow_mut().reassigned += 1;
        }

        fn on_converged(&mut self, _pool: &[Point], _clusters: &Clusters, n_iter: usize) {
            self.0.borrow_mut().converged = Some(n_iter);
        }
    }

    #[test]
    fn test_scenario_converges_immediately() {
        let mut session = Session::new().with_seed(42);
        session.add_points(scenario_pool());
        session.seed_medoids_at(&[0, 2]).unwrap();

        let view = session.snapshot();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].medoid, Point::new(0.0, 0.0));
        assert_eq!(view[0].members, pts(&[(0, 0), (0, 1)]));
        assert_eq!(view[1].medoid, Point::new(10.0, 10.0));
        assert_eq!(view[1].members, pts(&[(10, 10), (10, 11), (10, 9)]));

        assert!(!session.step_once());
        assert_eq!(session.medoids(), &[0, 2]);
    }

    #[test]
    fn test_step_moves_off_centre_medoid() {
        let mut session = Session::new();
        session.add_points(scenario_pool());
        // (10, 11) is not the centre of its cluster.
        session.seed_medoids_at(&[0, 3]).unwrap();

        assert!(session.step_once());
        assert_eq!(session.medoid_points(), pts(&[(0, 0), (10, 10)]));
        assert!(!session.step_once());
    }

    #[test]
    fn test_run_to_convergence_counts_iterations() {
        let mut session = Session::new();
        session.add_points(scenario_pool());
        session.seed_medoids_at(&[1, 4]).unwrap();

        let n_iter = session.run_to_convergence().unwrap();
        assert!(n_iter >= 1);
        assert!(!session.step_once());
    }

    #[test]
    fn test_seed_empty_pool() {
        let mut session = Session::new();
        let err = session.seed_medoids(3).unwrap_err();
        assert!(matches!(err, Error::EmptyPointPool));
        assert!(session.medoids().is_empty());
        assert!(session.current_clusters().is_empty());
    }

    #[test]
    fn test_seed_zero_k() {
        let mut session = Session::new();
        session.add_points(scenario_pool());
        assert!(matches!(
            session.seed_medoids(0),
            Err(Error::InvalidClusterCount { requested: 0 })
        ));
    }

    #[test]
    fn test_seed_caps_at_pool_size() {
        let mut session = Session::new().with_seed(3);
        session.add_points(scenario_pool());
        session.seed_medoids(10).unwrap();

        let mut medoids = session.medoids().to_vec();
        medoids.sort_unstable();
        assert_eq!(medoids, vec![0, 1, 2, 3, 4]);
        assert_eq!(session.k(), 10);
        assert_eq!(session.cost(), 0.0);
    }

    #[test]
    fn test_seed_at_validates_indices() {
        let mut session = Session::new();
        session.add_points(scenario_pool());
        assert!(matches!(
            session.seed_medoids_at(&[0, 5]),
            Err(Error::IndexOutOfBounds { index: 5, len: 5 })
        ));
        assert!(matches!(
            session.seed_medoids_at(&[2, 2]),
            Err(Error::DuplicateMedoid { index: 2 })
        ));
        assert!(session.seed_medoids_at(&[]).is_err());
        assert!(session.medoids().is_empty());
    }

    #[test]
    fn test_assign_and_step_without_medoids_are_noops() {
        let mut session = Session::new();
        assert!(!session.assign_all());
        assert!(!session.step_once());
        assert_eq!(session.run_to_convergence().unwrap(), 0);

        session.add_points(scenario_pool());
        assert!(!session.assign_all());
        assert!(session.current_clusters().is_empty());
    }

    #[test]
    fn test_adding_points_resets_run() {
        let mut session = Session::new().with_seed(1);
        session.add_points(scenario_pool());
        session.seed_medoids(2).unwrap();
        assert_eq!(session.medoids().len(), 2);

        session.add_points(pts(&[(5, 5)]));
        assert!(session.medoids().is_empty());
        assert!(session.current_clusters().is_empty());
        assert_eq!(session.points().len(), 6);
    }

    #[test]
    fn test_datasets_are_flattened() {
        let mut session = Session::new();
        session.add_dataset(Dataset::new("left", pts(&[(0, 0), (0, 1)])));
        session.add_dataset(Dataset::new("right", pts(&[(10, 10)])));

        let names: Vec<&str> = session.datasets().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(session.datasets().nth(1).unwrap().1, &pts(&[(10, 10)])[..]);
        assert_eq!(session.points().len(), 3);

        session.clear();
        assert!(session.points().is_empty());
        assert_eq!(session.datasets().count(), 0);
    }

    #[test]
    fn test_empty_cluster_keeps_medoid() {
        let mut session = Session::new();
        // Index 0 and 1 share coordinates, so slot 1 never wins a point.
        session.add_points(pts(&[(0, 0), (0, 0), (1, 0), (20, 20)]));
        session.seed_medoids_at(&[0, 1]).unwrap();
        assert!(session.current_clusters().slots()[1].members.is_empty());

        session.run_to_convergence().unwrap();
        assert_eq!(session.current_clusters().len(), 2);
    }

    #[test]
    fn test_step_keeps_medoid_indices_distinct() {
        let mut session = Session::new();
        session.add_points(pts(&[(0, 0), (0, 0), (1, 0), (20, 0), (21, 0), (22, 0)]));
        // Slot 1 starts on a copy of slot 0's medoid and wins nothing; slot 0 then
        // elects index 0, the index slot 1 is holding.
        session.seed_medoids_at(&[1, 0, 3]).unwrap();
        assert!(session.current_clusters().slots()[1].members.is_empty());

        assert!(session.step_once());
        assert_eq!(session.medoids(), &[0, 1, 4]);

        let mut medoids = session.medoids().to_vec();
        medoids.sort_unstable();
        medoids.dedup();
        assert_eq!(medoids.len(), 3);
        assert_eq!(session.current_clusters().len(), 3);

        assert!(!session.step_once());
        assert_eq!(session.medoids(), &[0, 1, 4]);
    }

    #[test]
    fn test_observer_notifications() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut session = Session::new().with_observer(Recorder(Rc::clone(&counts)));
        session.add_points(scenario_pool());
        session.seed_medoids_at(&[0, 3]).unwrap();
        let n_iter = session.run_to_convergence().unwrap();

        let counts = counts.borrow();
        assert_eq!(counts.seeded, 1);
        assert_eq!(counts.reassigned, n_iter);
        assert_eq!(counts.converged, Some(n_iter));
    }

    #[test]
    fn test_max_iter_timeout() {
        let mut session = Session::new().with_max_iter(0);
        session.add_points(scenario_pool());
        session.seed_medoids_at(&[0, 3]).unwrap();
        assert!(matches!(
            session.run_to_convergence(),
            Err(Error::ConvergenceTimeout { max_iter: 0 })
        ));
    }

    #[test]
    fn test_max_iter_allows_converged_run() {
        let mut session = Session::new().with_max_iter(0);
        session.add_points(scenario_pool());
        session.seed_medoids_at(&[0, 2]).unwrap();
        assert_eq!(session.run_to_convergence().unwrap(), 0);
    }
}
