//! Exhaustive nearest neighbor search.

use crate::distance::{DistanceValue, Metric};
use crate::error::{Result, VpTreeError};
use crate::util::Ordered;
use crate::{NearestNeighbors, Neighbor};

/// A [`NearestNeighbors`] implementation that does exhaustive search.
///
/// Every query measures the distance to every point.  This is the reference that
/// [VpTree](crate::VpTree) results are checked against.
#[derive(Debug)]
pub struct ExhaustiveSearch<T, M> {
    items: Vec<T>,
    metric: M,
}

impl<T, M: Metric<T>> ExhaustiveSearch<T, M> {
    /// Create an ExhaustiveSearch index.
    pub fn new<I: IntoIterator<Item = T>>(items: I, metric: M) -> Self {
        Self {
            items: items.into_iter().collect(),
            metric,
        }
    }

    /// Get the size of this index.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this index is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rank every point by distance from `query`.
    ///
    /// The sort is stable, so equidistant points keep their insertion order.
    pub fn ranked(&self, query: &T) -> Vec<Neighbor<&T, DistanceValue<M, T>>> {
        let mut ranked: Vec<_> = self
            .items
            .iter()
            .map(|item| Neighbor::new(item, self.metric.distance(query, item)))
            .collect();
        ranked.sort_by_key(|n| Ordered::new(n.distance));
        ranked
    }
}

impl<T, M: Metric<T>> NearestNeighbors<T> for ExhaustiveSearch<T, M> {
    type Distance = M::Distance;

    fn k_nearest<'a>(&'a self, query: &T, k: usize) -> Result<Vec<Neighbor<&'a T, M::Distance>>>
    where
        T: 'a,
    {
        if k == 0 {
            return Err(VpTreeError::InvalidArgument { k });
        }

        let mut ranked = self.ranked(query);
        ranked.truncate(k);
        Ok(ranked)
    }

    fn nearest_within<'a>(
        &'a self,
        query: &T,
        max_distance: M::Distance,
    ) -> Vec<Neighbor<&'a T, M::Distance>>
    where
        T: 'a,
    {
        self.items
            .iter()
            .map(|item| Neighbor::new(item, self.metric.distance(query, item)))
            .filter(|n| n.distance < max_distance)
            .collect()
    }
}
