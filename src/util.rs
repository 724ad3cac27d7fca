//! Internal utilities.

use std::cmp::Ordering;

/// A distance with a total order, for sorting and heaps.
///
/// Comparing NaN panics.  A NaN distance can only come from a broken distance function.
#[derive(Clone, Copy, Debug)]
pub struct Ordered<T>(T);

impl<T> Ordered<T> {
    /// Wrap a value.
    pub fn new(item: T) -> Self {
        Self(item)
    }

    /// Unwrap the value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: PartialOrd> Ord for Ordered<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .partial_cmp(&other.0)
            .expect("Comparison between unordered items")
    }
}

impl<T: PartialOrd> PartialOrd for Ordered<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: PartialOrd> PartialEq for Ordered<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: PartialOrd> Eq for Ordered<T> {}
