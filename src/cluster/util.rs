use super::point::{distance, Point};

/// A point's position in a ranked slice together with its total distance to the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Index into the slice that was ranked.
    pub index: usize,
    /// Sum of distances from this point to every other point in the slice.
    pub total: f64,
}

/// Rank points by their total distance to the rest of the slice, smallest first.
///
/// This is the medoid-update rule: the first entry is the most central point. The sort is
/// stable, so among tied totals the point that comes first in `points` wins.
pub fn rank_by_total_distance(points: &[Point]) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = points
        .iter()
        .enumerate()
        .map(|(index, p)| Ranked {
            index,
            total: points.iter().map(|q| distance(p, q)).sum(),
        })
        .collect();
    ranked.sort_by(|a, b| a.total.total_cmp(&b.total));
    ranked
}

/// Position of the medoid closest to `point`, or `None` if there are no medoids.
///
/// Ties go to the earliest medoid.
pub fn nearest_medoid(point: &Point, medoids: &[Point]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, m) in medoids.iter().enumerate() {
        let d = distance(point, m);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Whether two medoid sets hold the same coordinates, ignoring order and repeats.
pub(crate) fn same_medoid_set(old: &[Point], new: &[Point]) -> bool {
    let old = distinct(old);
    let new = distinct(new);
    old.len() == new.len() && new.iter().all(|p| old.contains(p))
}

fn distinct(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if !out.contains(p) {
            out.push(*p);
        }
    }
    out
}
