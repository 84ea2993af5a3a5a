use super::point::{distance, Point};
use super::util::nearest_medoid;

/// One cluster: a medoid and the points assigned to it, all as pool indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Pool index of the medoid.
    pub medoid: usize,
    /// Pool indices of the member points, in pool order.
    ///
    /// May be empty. The medoid usually appears here too, since it is its own nearest medoid.
    pub members: Vec<usize>,
}

/// Cluster mapping: one [`Slot`] per medoid, in medoid-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clusters {
    slots: Vec<Slot>,
}

impl Clusters {
    /// All slots, in medoid-set order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Iterate over the slots.
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Number of clusters (including empty ones).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no assignment has been made.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Medoid pool indices, in slot order.
    pub fn medoids(&self) -> Vec<usize> {
        self.slots.iter().map(|s| s.medoid).collect()
    }

    /// Slot label for each of the first `n` pool points.
    ///
    /// Points that are not assigned (only possible before an assignment pass) get `None`.
    pub fn labels(&self, n: usize) -> Vec<Option<usize>> {
        let mut labels = vec![None; n];
        for (slot_idx, slot) in self.slots.iter().enumerate() {
            for &m in &slot.members {
                if let Some(l) = labels.get_mut(m) {
                    *l = Some(slot_idx);
                }
            }
        }
        labels
    }

    /// Total deviation: sum over slots of member distances to the slot medoid.
    pub fn cost(&self, pool: &[Point]) -> f64 {
        self.slots
            .iter()
            .map(|s| {
                let medoid = &pool[s.medoid];
                s.members
                    .iter()
                    .map(|&m| distance(&pool[m], medoid))
                    .sum::<f64>()
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Clusters {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// Assign every pool point to its nearest medoid.
///
/// `medoids` are pool indices and must be in range. Every medoid gets a slot, even one that
/// ends up with no members.
pub(crate) fn assign_all(pool: &[Point], medoids: &[usize]) -> Clusters {
    let medoid_points: Vec<Point> = medoids.iter().map(|&i| pool[i]).collect();
    let mut slots: Vec<Slot> = medoids
        .iter()
        .map(|&medoid| Slot {
            medoid,
            members: Vec::new(),
        })
        .collect();

    for (idx, point) in pool.iter().enumerate() {
        // Only `None` when there are no medoids at all.
        if let Some(slot) = nearest_medoid(point, &medoid_points) {
            slots[slot].members.push(idx);
        }
    }

    Clusters { slots }
}
