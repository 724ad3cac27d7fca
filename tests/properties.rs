//! Property tests: the tree must agree with brute force on arbitrary inputs.

use proptest::prelude::*;

use vantage::{euclidean_distance, BuildOptions, Euclidean, ExhaustiveSearch, NearestNeighbors, VpTree};

fn point_sets(dims: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(-100.0f64..100.0, dims), 1..300)
}

/// All distances from `query`, ascending.
fn brute_force(points: &[Vec<f64>], query: &[f64]) -> Vec<f64> {
    let mut distances: Vec<f64> = points.iter().map(|p| euclidean_distance(query, p)).collect();
    distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
    distances
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn k_nearest_matches_brute_force(
        points in point_sets(3),
        query in prop::collection::vec(-120.0f64..120.0, 3),
        k in 1usize..400,
        leaf_size in 1usize..12,
        seed in any::<u64>(),
    ) {
        let expected = brute_force(&points, &query);
        let options = BuildOptions::default().with_leaf_size(leaf_size).with_seed(seed);
        let tree = VpTree::build_with(points, Euclidean, options).unwrap();

        let found: Vec<f64> = tree
            .nearest_neighbors(&query, k)
            .unwrap()
            .into_iter()
            .map(|n| n.distance)
            .collect();

        prop_assert_eq!(found.len(), k.min(expected.len()));
        prop_assert_eq!(&found[..], &expected[..found.len()]);
        prop_assert_eq!(tree.nearest_neighbor(&query).distance, expected[0]);
    }

    #[test]
    fn range_matches_brute_force(
        points in point_sets(2),
        query in prop::collection::vec(-120.0f64..120.0, 2),
        max_distance in -10.0f64..150.0,
        seed in any::<u64>(),
    ) {
        let expected: Vec<f64> = brute_force(&points, &query)
            .into_iter()
            .filter(|d| *d < max_distance)
            .collect();
        let options = BuildOptions::default().with_seed(seed);
        let tree = VpTree::build_with(points, Euclidean, options).unwrap();

        let mut found: Vec<f64> = tree
            .neighbors_in_range(&query, max_distance)
            .into_iter()
            .map(|n| n.distance)
            .collect();
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn ties_match_brute_force_order(
        values in prop::collection::vec(0i8..8, 1..120),
        query in 0i8..8,
        k in 1usize..130,
        leaf_size in 1usize..6,
        seed in any::<u64>(),
    ) {
        // Few distinct values, so most distances are tied
        let points: Vec<(usize, i8)> = values.into_iter().enumerate().collect();
        let metric = |a: &(usize, i8), b: &(usize, i8)| f64::from(a.1.abs_diff(b.1));
        let query = (usize::MAX, query);

        let reference = ExhaustiveSearch::new(points.clone(), metric);
        let expected: Vec<usize> = reference
            .k_nearest(&query, k)
            .unwrap()
            .into_iter()
            .map(|n| n.item.0)
            .collect();

        let options = BuildOptions::default().with_leaf_size(leaf_size).with_seed(seed);
        let tree = VpTree::build_with(points, metric, options).unwrap();
        let found: Vec<usize> = tree
            .nearest_neighbors(&query, k)
            .unwrap()
            .into_iter()
            .map(|n| n.item.0)
            .collect();

        prop_assert_eq!(found, expected.clone());
        prop_assert_eq!(tree.nearest_neighbor(&query).item.0, expected[0]);
    }

    #[test]
    fn tree_owns_every_point(
        values in prop::collection::vec(0u16..50, 1..200),
        leaf_size in 0usize..8,
    ) {
        let metric = |a: &u16, b: &u16| f32::from(a.abs_diff(*b));
        let options = BuildOptions::default().with_leaf_size(leaf_size);
        let tree = VpTree::build_with(values.clone(), metric, options).unwrap();
        prop_assert_eq!(tree.len(), values.len());

        let mut stored: Vec<u16> = tree.into_iter().collect();
        stored.sort();
        let mut values = values;
        values.sort();
        prop_assert_eq!(stored, values);
    }
}
