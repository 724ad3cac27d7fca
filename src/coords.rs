//! [Coordinate spaces](https://en.wikipedia.org/wiki/Cartesian_coordinate_system).
//!
//! The tree itself never looks at coordinates.  These are only for ready-made metrics like
//! [Euclidean](crate::euclid::Euclidean).

use crate::distance::Value;

/// A point with numbered coordinates.
pub trait Coordinates {
    /// The type of individual coordinates.
    type Value: Value;

    /// Get the number of dims this point has.
    fn dims(&self) -> usize;

    /// Get the `i`th coordinate of this point.
    fn coord(&self, i: usize) -> Self::Value;

    /// Iterate over the coordinates of this point.
    fn coords(&self) -> CoordIter<'_, Self> {
        CoordIter { point: self, i: 0 }
    }
}

/// An iterator over the coordinates of a point.
#[derive(Debug)]
pub struct CoordIter<'a, T: ?Sized> {
    point: &'a T,
    i: usize,
}

impl<T: ?Sized + Coordinates> Iterator for CoordIter<'_, T> {
    type Item = T::Value;

    fn next(&mut self) -> Option<T::Value> {
        if self.i < self.point.dims() {
            let value = self.point.coord(self.i);
            self.i += 1;
            Some(value)
        } else {
            None
        }
    }
}

/// [Coordinates] implementation for slices.
impl<T: Value> Coordinates for [T] {
    type Value = T;

    fn dims(&self) -> usize {
        self.len()
    }

    fn coord(&self, i: usize) -> T {
        self[i]
    }
}

/// [Coordinates] implementation for arrays.
impl<T: Value, const N: usize> Coordinates for [T; N] {
    type Value = T;

    fn dims(&self) -> usize {
        N
    }

    fn coord(&self, i: usize) -> T {
        self[i]
    }
}

/// [Coordinates] implemention for vectors.
impl<T: Value> Coordinates for Vec<T> {
    type Value = T;

    fn dims(&self) -> usize {
        self.len()
    }

    fn coord(&self, i: usize) -> T {
        self[i]
    }
}

/// Blanket [Coordinates] implementation for references.
impl<T: ?Sized + Coordinates> Coordinates for &T {
    type Value = T::Value;

    fn dims(&self) -> usize {
        (*self).dims()
    }

    fn coord(&self, i: usize) -> Self::Value {
        (*self).coord(i)
    }
}
