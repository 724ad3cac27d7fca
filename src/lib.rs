//! [Vantage-point trees] for exact nearest neighbor search in any [metric space].
//!
//! All a [VpTree] needs is a distance function.  Points can be anything: vectors, strings,
//! records with a single numeric field.
//!
//!     use vantage::VpTree;
//!
//!     let points = vec![1.0, 5.0, 2.0, 8.0, 3.0];
//!     let tree = VpTree::build(points, |x: &f64, y: &f64| (x - y).abs()).unwrap();
//!
//!     let nearest = tree.nearest_neighbor(&4.2);
//!     assert_eq!(*nearest.item, 5.0);
//!
//!     let neighbors = tree.nearest_neighbors(&4.2, 2).unwrap();
//!     assert_eq!(neighbors.iter().map(|n| *n.item).collect::<Vec<_>>(), vec![5.0, 3.0]);
//!
//!     let mut within = tree.neighbors_in_range(&0.0, 2.5);
//!     within.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap());
//!     assert_eq!(within.iter().map(|n| *n.item).collect::<Vec<_>>(), vec![1.0, 2.0]);
//!
//! [Vantage-point trees]: https://en.wikipedia.org/wiki/Vantage-point_tree
//! [metric space]: https://en.wikipedia.org/wiki/Metric_space

mod candidates;
pub mod coords;
pub mod distance;
pub mod error;
pub mod euclid;
pub mod exhaustive;
pub mod median;
mod util;
pub mod vp;

pub use coords::Coordinates;
pub use distance::{Metric, Value};
pub use error::VpTreeError;
pub use euclid::{euclidean_distance, Euclidean};
pub use exhaustive::ExhaustiveSearch;
pub use vp::{BuildOptions, VpTree};

/// A point found by a search, along with its distance from the query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Neighbor<V, R> {
    /// The found point.
    pub item: V,
    /// The distance from the query to the found point.
    pub distance: R,
}

impl<V, R> Neighbor<V, R> {
    /// Create a new Neighbor.
    pub fn new(item: V, distance: R) -> Self {
        Self { item, distance }
    }

    /// Convert this neighbor into a `(distance, item)` pair.
    pub fn into_tuple(self) -> (R, V) {
        (self.distance, self.item)
    }
}

/// A nearest neighbor search index over points of type `T`.
///
/// Implemented by [VpTree] and by the brute-force [ExhaustiveSearch], which makes the latter a
/// drop-in reference for checking the former.
pub trait NearestNeighbors<T> {
    /// The type of distances.
    type Distance: Value;

    /// Find the `k` nearest neighbors of `query`, closest first.
    ///
    /// Returns fewer than `k` neighbors if the index holds fewer than `k` points, and
    /// [VpTreeError::InvalidArgument] if `k` is zero.
    fn k_nearest<'a>(
        &'a self,
        query: &T,
        k: usize,
    ) -> error::Result<Vec<Neighbor<&'a T, Self::Distance>>>
    where
        T: 'a;

    /// Find all points strictly closer than `max_distance` to `query`, in no particular order.
    fn nearest_within<'a>(
        &'a self,
        query: &T,
        max_distance: Self::Distance,
    ) -> Vec<Neighbor<&'a T, Self::Distance>>
    where
        T: 'a;

    /// Find the nearest neighbor of `query`, if the index isn't empty.
    fn nearest<'a>(&'a self, query: &T) -> Option<Neighbor<&'a T, Self::Distance>>
    where
        T: 'a,
    {
        self.k_nearest(query, 1).ok()?.into_iter().next()
    }
}
