use thiserror::Error;

/// Errors returned by the clustering routines in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Clustering was requested on an empty point pool.
    #[error("no data: the point pool is empty")]
    EmptyPointPool,

    /// Requested cluster count is not usable.
    #[error("invalid cluster count: requested {requested}, must be at least 1")]
    InvalidClusterCount {
        /// Number of clusters that was requested.
        requested: usize,
    },

    /// A point coordinate is not a finite number.
    #[error("invalid point ({x}, {y}): coordinates must be finite")]
    InvalidPoint {
        /// X coordinate as given.
        x: f64,
        /// Y coordinate as given.
        y: f64,
    },

    /// An explicit medoid index does not address a pool point.
    #[error("medoid index {index} out of bounds for a pool of {len} points")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Pool size.
        len: usize,
    },

    /// The same pool index was given twice as a medoid.
    #[error("duplicate medoid index {index}")]
    DuplicateMedoid {
        /// Repeated index.
        index: usize,
    },

    /// A point ended up outside every cluster after assignment.
    #[error("point {index} was not assigned to any cluster")]
    UnassignedPoint {
        /// Pool index of the point.
        index: usize,
    },

    /// The convergence loop hit its configured iteration cap.
    #[error("no convergence after {max_iter} iterations")]
    ConvergenceTimeout {
        /// Iteration cap that was exceeded.
        max_iter: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
