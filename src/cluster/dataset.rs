use super::point::Point;
use crate::error::Result;

/// A named, ordered group of points contributed to a clustering run.
///
/// Datasets only exist for bookkeeping: a [`Session`](super::Session) flattens every dataset
/// into a single pool and clusters that.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    points: Vec<Point>,
}

impl Dataset {
    /// Wrap already-built points.
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Build a dataset from raw coordinate pairs, validating every pair.
    pub fn from_pairs(name: impl Into<String>, pairs: &[(f64, f64)]) -> Result<Self> {
        let points = pairs
            .iter()
            .map(|&(x, y)| Point::try_new(x, y))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, points))
    }

    /// Dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Point>) {
        (self.name, self.points)
    }
}
