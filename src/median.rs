//! Median selection.

use crate::distance::Value;
use crate::util::Ordered;

/// Compute the [median] of a list of values.
///
/// For even lengths this is the average of the two middle values.  Runs in expected linear time
/// using quickselect rather than a full sort.  Returns `None` for an empty list.
///
///     use vantage::median::median;
///
///     assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
///     assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
///     assert_eq!(median::<f64>(&[]), None);
///
/// [median]: https://en.wikipedia.org/wiki/Median
pub fn median<R: Value>(values: &[R]) -> Option<R> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mut scratch: Vec<_> = values.iter().copied().map(Ordered::new).collect();
    let (lower, upper, _) = scratch.select_nth_unstable(n / 2);
    let upper = upper.into_inner();

    if n % 2 == 1 {
        return Some(upper);
    }

    // Everything before the selected element is <= it, so the other middle value is their max
    lower
        .iter()
        .copied()
        .max()
        .map(|lower| (lower.into_inner() + upper) / (R::one() + R::one()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small() {
        assert_eq!(median(&[1.0]), Some(1.0));
        assert_eq!(median(&[2.0, 1.0]), Some(1.5));
        assert_eq!(median(&[1.0, 1.0, 5.0]), Some(1.0));
        assert_eq!(median(&[0.0f32, 0.0, 0.0, 0.0]), Some(0.0));
    }

    #[test]
    fn test_against_sort() {
        let values = [2.0, 0.0, 4.0, 6.0, 5.0, 1.0, 3.0, 9.0, 7.0, 8.0, 2.0];
        for len in 1..=values.len() {
            let mut sorted = values[..len].to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let expected = if len % 2 == 1 {
                sorted[len / 2]
            } else {
                (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
            };
            assert_eq!(median(&values[..len]), Some(expected), "len = {}", len);
        }
    }
}
