//! [Vantage-point trees](https://en.wikipedia.org/wiki/Vantage-point_tree).

use crate::candidates::Candidates;
use crate::distance::{DistanceValue, Metric, Value};
use crate::error::{Result, VpTreeError};
use crate::median::median;
use crate::{NearestNeighbors, Neighbor};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};

/// Index of the root node.
const ROOT: usize = 0;

/// Options for building a [VpTree].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildOptions {
    /// Nodes with fewer than this many points left after taking out the vantage point become
    /// leaves, which keep those points in a bucket and scan them linearly.
    pub leaf_size: usize,
    /// Seed for vantage point selection.  `None` uses the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            leaf_size: 1,
            seed: None,
        }
    }
}

impl BuildOptions {
    /// Set the leaf size.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Make construction deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A point tagged with its position in the input.
#[derive(Debug)]
struct Entry<T> {
    index: usize,
    item: T,
}

/// A node in a VP tree.
#[derive(Debug)]
struct VpNode<T, R> {
    /// The vantage point itself.
    item: T,
    /// The vantage point's position in the input, for breaking ties.
    index: usize,
    /// The median distance from the vantage point to the rest of this subtree's points, unless
    /// this is a leaf.
    median: Option<R>,
    /// The subtree closer than the median, if any.
    left: Option<usize>,
    /// The subtree at or beyond the median, if any.
    right: Option<usize>,
    /// Points kept in a leaf alongside the vantage point.
    bucket: Vec<Entry<T>>,
}

impl<T, R> VpNode<T, R> {
    /// Create a new leaf.
    fn leaf(vantage: Entry<T>, bucket: Vec<Entry<T>>) -> Self {
        Self {
            item: vantage.item,
            index: vantage.index,
            median: None,
            left: None,
            right: None,
            bucket,
        }
    }

    /// Check whether this node has no children.
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Which child slot of a parent a pending subtree will fill.
#[derive(Clone, Copy, Debug)]
enum Branch {
    Left,
    Right,
}

/// A subtree that still has to be built.
struct Pending<T> {
    items: Vec<Entry<T>>,
    parent: Option<(usize, Branch)>,
    depth: usize,
}

/// Search state shared by the different kinds of queries.
trait Neighborhood<'a, T, R> {
    /// Consider the point at input position `index`, at the given distance from the query.
    fn consider(&mut self, index: usize, item: &'a T, distance: R);

    /// Points at least this far from the query are of no interest.
    fn radius(&self) -> R;
}

impl<'a, T, R: Value> Neighborhood<'a, T, R> for Candidates<&'a T, R> {
    fn consider(&mut self, index: usize, item: &'a T, distance: R) {
        self.insert(distance, index, item);
    }

    fn radius(&self) -> R {
        Candidates::radius(self)
    }
}

/// The single closest point so far, earliest in the input on ties.
struct Nearest<'a, T, R> {
    best: Neighbor<&'a T, R>,
    index: usize,
}

impl<'a, T, R: Value> Neighborhood<'a, T, R> for Nearest<'a, T, R> {
    fn consider(&mut self, index: usize, item: &'a T, distance: R) {
        let best = self.best.distance;
        if distance < best || (distance == best && index < self.index) {
            self.best = Neighbor::new(item, distance);
            self.index = index;
        }
    }

    fn radius(&self) -> R {
        self.best.distance
    }
}

/// Every point within a fixed radius.
struct Within<'a, T, R> {
    max_distance: R,
    found: Vec<Neighbor<&'a T, R>>,
}

impl<'a, T, R: Value> Neighborhood<'a, T, R> for Within<'a, T, R> {
    fn consider(&mut self, _index: usize, item: &'a T, distance: R) {
        if distance < self.max_distance {
            self.found.push(Neighbor::new(item, distance));
        }
    }

    fn radius(&self) -> R {
        self.max_distance
    }
}

/// A [vantage-point tree](https://en.wikipedia.org/wiki/Vantage-point_tree).
///
/// Each node picks a random vantage point and splits the remaining points at the median of their
/// distances to it: closer points go left, the rest go right.  Searches skip subtrees that the
/// triangle inequality proves can't contain anything interesting.
///
/// The tree is immutable once built.  It owns all its points, and queries return references into
/// it.  Nodes live in a single vector and refer to their children by index.
pub struct VpTree<T, M: Metric<T>> {
    nodes: Vec<VpNode<T, M::Distance>>,
    metric: M,
    leaf_size: usize,
    len: usize,
    depth: usize,
}

impl<T, M: Metric<T>> VpTree<T, M> {
    /// Build a tree with the default [BuildOptions].
    ///
    /// Fails with [VpTreeError::EmptyInput] if there are no points.
    pub fn build<I: IntoIterator<Item = T>>(points: I, metric: M) -> Result<Self> {
        Self::build_with(points, metric, BuildOptions::default())
    }

    /// Build a tree with the given options.
    pub fn build_with<I: IntoIterator<Item = T>>(
        points: I,
        metric: M,
        options: BuildOptions,
    ) -> Result<Self> {
        match options.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::build_with_rng(points, metric, options.leaf_size, &mut rng)
            }
            None => Self::build_with_rng(points, metric, options.leaf_size, &mut rand::rng()),
        }
    }

    /// Build a tree, choosing vantage points with the given random number generator.
    pub fn build_with_rng<I, G>(points: I, metric: M, leaf_size: usize, rng: &mut G) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        G: Rng,
    {
        let items: Vec<_> = points
            .into_iter()
            .enumerate()
            .map(|(index, item)| Entry { index, item })
            .collect();
        if items.is_empty() {
            return Err(VpTreeError::EmptyInput);
        }

        Ok(Self::from_items(items, metric, leaf_size.max(1), rng))
    }

    /// Build the nodes top-down, without recursion so degenerate inputs can't blow the stack.
    #[tracing::instrument(skip_all, fields(points = items.len(), leaf_size = leaf_size))]
    fn from_items<G: Rng>(items: Vec<Entry<T>>, metric: M, leaf_size: usize, rng: &mut G) -> Self {
        let len = items.len();
        let mut nodes: Vec<VpNode<T, M::Distance>> = Vec::with_capacity(len);
        let mut depth = 0;

        let mut pending = vec![Pending {
            items,
            parent: None,
            depth: 1,
        }];

        while let Some(Pending { mut items, parent, depth: level }) = pending.pop() {
            let index = nodes.len();
            match parent {
                Some((p, Branch::Left)) => nodes[p].left = Some(index),
                Some((p, Branch::Right)) => nodes[p].right = Some(index),
                None => {}
            }
            depth = depth.max(level);

            let vantage = items.swap_remove(rng.random_range(0..items.len()));
            if items.len() < leaf_size {
                nodes.push(VpNode::leaf(vantage, items));
                continue;
            }

            let distances: Vec<_> = items
                .iter()
                .map(|x| metric.distance(&vantage.item, &x.item))
                .collect();
            let Some(threshold) = median(&distances) else {
                nodes.push(VpNode::leaf(vantage, items));
                continue;
            };

            let mut left = Vec::new();
            let mut right = Vec::new();
            for (entry, distance) in items.into_iter().zip(distances) {
                if distance < threshold {
                    left.push(entry);
                } else {
                    right.push(entry);
                }
            }

            nodes.push(VpNode {
                item: vantage.item,
                index: vantage.index,
                median: Some(threshold),
                left: None,
                right: None,
                bucket: Vec::new(),
            });

            for (items, branch) in [(right, Branch::Right), (left, Branch::Left)] {
                if !items.is_empty() {
                    pending.push(Pending {
                        items,
                        parent: Some((index, branch)),
                        depth: level + 1,
                    });
                }
            }
        }

        tracing::debug!(nodes = nodes.len(), depth, "built vantage-point tree");

        Self {
            nodes,
            metric,
            leaf_size,
            len,
            depth,
        }
    }

    /// Get the number of points in this tree.  Never zero.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, since a tree can't be built from zero points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the number of levels in this tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the leaf size this tree was built with.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Get the distance function.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Iterate over the points stored in this tree, in no particular order.
    pub fn iter(&self) -> Iter<'_, T, M::Distance> {
        self.into_iter()
    }

    /// Find the nearest neighbor of `query`.
    pub fn nearest_neighbor(&self, query: &T) -> Neighbor<&T, M::Distance> {
        let root = &self.nodes[ROOT];
        let mut nearest = Nearest {
            best: Neighbor::new(&root.item, self.metric.distance(query, &root.item)),
            index: root.index,
        };

        let visited = self.search(query, &mut nearest);
        tracing::trace!(visited, "nearest neighbor search");

        nearest.best
    }

    /// Find the `k` nearest neighbors of `query`, sorted by ascending distance.
    ///
    /// Returns all points if the tree holds fewer than `k`.  Fails with
    /// [VpTreeError::InvalidArgument] if `k` is zero.
    pub fn nearest_neighbors(&self, query: &T, k: usize) -> Result<Vec<Neighbor<&T, M::Distance>>> {
        if k == 0 {
            return Err(VpTreeError::InvalidArgument { k });
        }

        let mut candidates = Candidates::new(k.min(self.len));
        let visited = self.search(query, &mut candidates);

        let neighbors = candidates.into_sorted_vec();
        tracing::trace!(visited, found = neighbors.len(), "k-nearest neighbor search");

        Ok(neighbors)
    }

    /// Find every point strictly closer than `max_distance` to `query`, in no particular order.
    ///
    /// A non-positive `max_distance` gives an empty result.
    pub fn neighbors_in_range(
        &self,
        query: &T,
        max_distance: M::Distance,
    ) -> Vec<Neighbor<&T, M::Distance>> {
        let mut within = Within {
            max_distance,
            found: Vec::new(),
        };
        let visited = self.search(query, &mut within);
        tracing::trace!(visited, found = within.found.len(), "range search");

        within.found
    }

    /// Visit the tree breadth-first, pruning subtrees that can't hold anything within the
    /// neighborhood's radius.  Returns the number of nodes visited.
    fn search<'a, N>(&'a self, query: &T, neighborhood: &mut N) -> usize
    where
        N: Neighborhood<'a, T, M::Distance>,
    {
        let mut queue = VecDeque::from([ROOT]);
        let mut visited = 0;

        while let Some(index) = queue.pop_front() {
            let node = &self.nodes[index];
            visited += 1;

            let distance = self.metric.distance(query, &node.item);
            neighborhood.consider(node.index, &node.item, distance);
            for entry in &node.bucket {
                let d = self.metric.distance(query, &entry.item);
                neighborhood.consider(entry.index, &entry.item, d);
            }

            debug_assert_eq!(node.median.is_none(), node.is_leaf());
            let Some(median) = node.median else {
                continue;
            };

            // Points on the left are closer than the median to the vantage point, so by the
            // triangle inequality they're farther than distance - median from the query.
            // Likewise points on the right are farther than median - distance.  A point exactly
            // at the radius can still displace a tie with a higher index, so keep equality.
            let radius = neighborhood.radius();
            let left = node.left.filter(|_| distance < median + radius);
            let right = node.right.filter(|_| distance >= median - radius);

            if distance < median {
                queue.extend(left);
                queue.extend(right);
            } else {
                queue.extend(right);
                queue.extend(left);
            }
        }

        visited
    }
}

// Can't derive(Debug) due to https://github.com/rust-lang/rust/issues/26925
impl<T, M> Debug for VpTree<T, M>
where
    T: Debug,
    M: Metric<T> + Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("VpTree")
            .field("nodes", &self.nodes)
            .field("metric", &self.metric)
            .field("leaf_size", &self.leaf_size)
            .field("len", &self.len)
            .field("depth", &self.depth)
            .finish()
    }
}

impl<T, M: Metric<T>> NearestNeighbors<T> for VpTree<T, M> {
    type Distance = M::Distance;

    fn k_nearest<'a>(&'a self, query: &T, k: usize) -> Result<Vec<Neighbor<&'a T, M::Distance>>>
    where
        T: 'a,
    {
        self.nearest_neighbors(query, k)
    }

    fn nearest_within<'a>(
        &'a self,
        query: &T,
        max_distance: M::Distance,
    ) -> Vec<Neighbor<&'a T, M::Distance>>
    where
        T: 'a,
    {
        self.neighbors_in_range(query, max_distance)
    }

    fn nearest<'a>(&'a self, query: &T) -> Option<Neighbor<&'a T, M::Distance>>
    where
        T: 'a,
    {
        Some(self.nearest_neighbor(query))
    }
}

/// An iterator that moves points out of a VP tree.
pub struct IntoIter<T, R> {
    nodes: std::vec::IntoIter<VpNode<T, R>>,
    bucket: std::vec::IntoIter<Entry<T>>,
}

impl<T: Debug, R: Debug> Debug for IntoIter<T, R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("nodes", &self.nodes)
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl<T, R> Iterator for IntoIter<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(entry) = self.bucket.next() {
            return Some(entry.item);
        }

        self.nodes.next().map(|node| {
            self.bucket = node.bucket.into_iter();
            node.item
        })
    }
}

impl<T, M: Metric<T>> IntoIterator for VpTree<T, M> {
    type Item = T;
    type IntoIter = IntoIter<T, DistanceValue<M, T>>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            nodes: self.nodes.into_iter(),
            bucket: Vec::new().into_iter(),
        }
    }
}

/// An iterator over the points in a VP tree.
pub struct Iter<'a, T, R> {
    nodes: std::slice::Iter<'a, VpNode<T, R>>,
    bucket: std::slice::Iter<'a, Entry<T>>,
}

impl<T: Debug, R: Debug> Debug for Iter<'_, T, R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Iter")
            .field("nodes", &self.nodes)
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl<'a, T, R> Iterator for Iter<'a, T, R> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if let Some(entry) = self.bucket.next() {
            return Some(&entry.item);
        }

        self.nodes.next().map(|node| {
            self.bucket = node.bucket.iter();
            &node.item
        })
    }
}

impl<'a, T, M: Metric<T>> IntoIterator for &'a VpTree<T, M> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, DistanceValue<M, T>>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            nodes: self.nodes.iter(),
            bucket: <&[Entry<T>]>::default().iter(),
        }
    }
}
