//! Abstract notions of distance.

use num_traits::Float;

use std::fmt::Debug;

/// A number type suitable for distance values.
///
/// This trait is automatically implemented for all floating-point types.  Pruning needs
/// `$+\infty$` and signed arithmetic (`$m - r$` may be negative), hence [Float].
pub trait Value: Float + Debug {}

/// Blanket [Value] implementation.
impl<T: Float + Debug> Value for T {}

/// A distance function over points of type `T`.
///
/// Search structures only prune correctly if the distance function is a [metric]: it must be
/// non-negative, symmetric, and obey the [triangle inequality].  Let `$d(x, y)$` be
/// `metric.distance(x, y)`.  Then for any points `$x$`, `$y$`, and `$z$`:
///
/// ```math
/// \begin{aligned}
/// d(x, y) &\ge 0 & \text{(non-negativity)} \\
/// d(x, y) &= d(y, x) & \text{(symmetry)} \\
/// d(x, z) &\le d(x, y) + d(y, z) & \text{(triangle inequality)}
/// \end{aligned}
/// ```
///
/// None of this is checked.  A distance function that breaks these rules gives wrong answers,
/// not panics.
///
/// Any `Fn(&T, &T) -> R` is a metric, so plain closures work:
///
///     use vantage::distance::Metric;
///
///     let metric = |x: &i32, y: &i32| (x - y).abs() as f64;
///     assert_eq!(metric.distance(&3, &-1), 4.0);
///
/// [metric]: https://en.wikipedia.org/wiki/Metric_space
/// [triangle inequality]: https://en.wikipedia.org/wiki/Triangle_inequality
pub trait Metric<T: ?Sized> {
    /// The type of distance values.
    type Distance: Value;

    /// Calculate the distance between two points.
    fn distance(&self, x: &T, y: &T) -> Self::Distance;
}

/// Blanket [Metric] implementation for distance functions.
impl<T, R, F> Metric<T> for F
where
    T: ?Sized,
    R: Value,
    F: Fn(&T, &T) -> R,
{
    type Distance = R;

    fn distance(&self, x: &T, y: &T) -> R {
        self(x, y)
    }
}

/// Shorthand for `M::Distance`.
pub type DistanceValue<M, T> = <M as Metric<T>>::Distance;
