use super::assign::Clusters;
use super::point::Point;
use super::session::Session;
use super::traits::Clustering;
use crate::error::{Error, Result};

/// One-shot k-medoids estimator.
///
/// Wraps a [`Session`]: seed `k` random medoids, then iterate to the fixed point.
#[derive(Debug, Clone)]
pub struct Kmedoids {
    k: usize,
    seed: Option<u64>,
    max_iter: Option<usize>,
}

/// Result of [`Kmedoids::fit`].
#[derive(Debug, Clone)]
pub struct KmedoidsFit {
    /// Medoids as indices into the fitted data.
    pub medoids: Vec<usize>,
    /// Cluster label per point; labels index into `medoids`.
    pub labels: Vec<usize>,
    /// Sum of distances from each point to its medoid.
    pub cost: f64,
    /// Iterations that changed the medoid set.
    pub n_iter: usize,
    /// Full cluster mapping.
    pub clusters: Clusters,
}

impl Kmedoids {
    /// Create an estimator for `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: None,
            max_iter: None,
        }
    }

    /// Fix the RNG seed used to pick initial medoids.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fail with [`Error::ConvergenceTimeout`] instead of iterating past `max_iter`.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Cluster `data`.
    pub fn fit(&self, data: &[Point]) -> Result<KmedoidsFit> {
        if data.is_empty() {
            return Err(Error::EmptyPointPool);
        }
        if self.k == 0 {
            return Err(Error::InvalidClusterCount { requested: self.k });
        }

        let mut session = Session::new();
        if let Some(seed) = self.seed {
            session = session.with_seed(seed);
        }
        if let Some(max_iter) = self.max_iter {
            session = session.with_max_iter(max_iter);
        }
        session.add_points(data.iter().copied());
        session.seed_medoids(self.k)?;
        let n_iter = session.run_to_convergence()?;

        let clusters = session.current_clusters().clone();
        let labels = clusters
            .labels(data.len())
            .into_iter()
            .enumerate()
            .map(|(index, label)| label.ok_or(Error::UnassignedPoint { index }))
            .collect::<Result<Vec<_>>>()?;
        Ok(KmedoidsFit {
            medoids: clusters.medoids(),
            labels,
            cost: session.cost(),
            n_iter,
            clusters,
        })
    }
}

impl Clustering for Kmedoids {
    fn fit_predict(&self, data: &[Point]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
