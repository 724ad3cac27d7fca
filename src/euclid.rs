//! [Euclidean space](https://en.wikipedia.org/wiki/Euclidean_space).

use crate::coords::Coordinates;
use crate::distance::Metric;

use num_traits::{zero, Float};

/// The [Euclidean distance] metric over any [coordinate space].
///
///     use vantage::distance::Metric;
///     use vantage::euclid::Euclidean;
///
///     assert_eq!(Euclidean.distance(&[0.0f64, 0.0], &[3.0, 4.0]), 5.0);
///
/// [Euclidean distance]: euclidean_distance
/// [coordinate space]: Coordinates
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Euclidean;

/// Compute the [Euclidean distance] between two points.
///
/// ```math
/// \begin{aligned}
/// \mathrm{euclidean\_distance}(x, y) &= \|x - y\|_2 \\
/// &= \sqrt{\sum_i (x_i - y_i)^2}
/// \end{aligned}
/// ```
///
/// [Euclidean distance]: https://en.wikipedia.org/wiki/Euclidean_distance
pub fn euclidean_distance<T, U>(x: T, y: U) -> T::Value
where
    T: Coordinates,
    U: Coordinates<Value = T::Value>,
{
    debug_assert!(x.dims() == y.dims());

    let sum: T::Value = x.coords().zip(y.coords()).fold(zero(), |sum, (a, b)| {
        let diff = a - b;
        sum + diff * diff
    });

    sum.sqrt()
}

/// Euclidean distance is a metric.
impl<T: ?Sized + Coordinates> Metric<T> for Euclidean {
    type Distance = T::Value;

    fn distance(&self, x: &T, y: &T) -> T::Value {
        euclidean_distance(x, y)
    }
}
