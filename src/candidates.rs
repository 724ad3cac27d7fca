//! Bounded lists of the best k candidates seen so far.

use crate::distance::Value;
use crate::util::Ordered;
use crate::Neighbor;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A heap entry, ordered by distance and then by input position.
#[derive(Debug)]
struct Candidate<T, R> {
    distance: Ordered<R>,
    index: usize,
    item: T,
}

impl<T, R: PartialOrd + Copy> Candidate<T, R> {
    fn key(&self) -> (Ordered<R>, usize) {
        (self.distance, self.index)
    }
}

impl<T, R: PartialOrd + Copy> PartialEq for Candidate<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T, R: PartialOrd + Copy> Eq for Candidate<T, R> {}

impl<T, R: PartialOrd + Copy> PartialOrd for Candidate<T, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, R: PartialOrd + Copy> Ord for Candidate<T, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// The `k` closest candidates seen so far.
///
/// Backed by a max-heap, so the worst retained candidate is always on top and gets evicted
/// first.  The observable behavior is that of a list kept sorted by distance and truncated to
/// `k` entries after every insertion.  Equidistant candidates are ranked by their input index,
/// lowest first, which matches a stable sort of all points by distance.
#[derive(Debug)]
pub(crate) struct Candidates<T, R> {
    capacity: usize,
    heap: BinaryHeap<Candidate<T, R>>,
}

impl<T, R: Value> Candidates<T, R> {
    /// Create an empty list holding at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Check if no more candidates can be added without evicting one.
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The search radius: anything farther than this can't improve the list.
    ///
    /// This is infinite until the list is full, then the worst retained distance.  A point exactly
    /// this far away still gets in if its index is lower than the worst candidate's.
    pub fn radius(&self) -> R {
        if self.is_full() {
            self.heap
                .peek()
                .map_or_else(R::neg_infinity, |worst| worst.distance.into_inner())
        } else {
            R::infinity()
        }
    }

    /// Offer the point at input position `index`, evicting the current worst candidate if the
    /// list overflows.
    ///
    /// Returns whether the candidate was retained.
    pub fn insert(&mut self, distance: R, index: usize, item: T) -> bool {
        let candidate = Candidate {
            distance: Ordered::new(distance),
            index,
            item,
        };

        if self.is_full() {
            let improves = self.heap.peek().is_some_and(|worst| candidate < *worst);
            if !improves {
                return false;
            }
            self.heap.pop();
        }

        self.heap.push(candidate);
        true
    }

    /// Consume the list, returning the candidates sorted by ascending distance.
    pub fn into_sorted_vec(self) -> Vec<Neighbor<T, R>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor::new(c.item, c.distance.into_inner()))
            .collect()
    }
}
