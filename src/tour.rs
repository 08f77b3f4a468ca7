//! Tour helpers.
//!
//! A tour is a permutation of `0..N` over a zero-based [`DistanceMatrix`],
//! closed by an implicit edge from the last city back to the first.

use crate::matrix::{Distance, DistanceMatrix};

/// Returns `true` if `tour` visits every city of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Length of the closed tour, including the edge back to the start.
///
/// Works on either matrix layout; tour entries are always zero-based city
/// indices. Tours of fewer than two cities have length zero.
pub fn tour_length(matrix: &DistanceMatrix, tour: &[usize]) -> Distance {
    if tour.len() < 2 {
        return 0;
    }
    let closing = matrix.between(tour[tour.len() - 1], tour[0]);
    tour.windows(2)
        .map(|w| matrix.between(w[0], w[1]))
        .sum::<Distance>()
        + closing
}

/// Rotates `tour` in place so that `city` comes first. No-op if absent.
pub fn rotate_to_front(tour: &mut [usize], city: usize) {
    if let Some(pos) = tour.iter().position(|&c| c == city) {
        tour.rotate_left(pos);
    }
}

/// Change in tour length if positions `i` and `j` were swapped.
///
/// Only the edges leaving positions `i - 1`, `i`, `j - 1` and `j` change, so
/// this is `O(1)`. `tour` is swapped and swapped back; it is unchanged on
/// return.
pub fn swap_delta(matrix: &DistanceMatrix, tour: &mut [usize], i: usize, j: usize) -> i64 {
    let n = tour.len();
    if i == j || n < 2 {
        return 0;
    }

    let mut edges = [(i + n - 1) % n, i, (j + n - 1) % n, j];
    edges.sort_unstable();
    let length = |tour: &[usize]| -> i64 {
        edges
            .iter()
            .enumerate()
            .filter(|&(k, &p)| k == 0 || edges[k - 1] != p)
            .map(|(_, &p)| matrix.between(tour[p], tour[(p + 1) % n]) as i64)
            .sum()
    };

    let before = length(tour);
    tour.swap(i, j);
    let after = length(tour);
    tour.swap(i, j);
    after - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::City;
    use crate::random::{create_rng, random_permutation};
    use crate::test_utils::random_matrix;
    use proptest::prelude::*;

    fn line() -> DistanceMatrix {
        DistanceMatrix::from_cities(&[
            City::new(0, 0.0, 0.0),
            City::new(1, 3.0, 0.0),
            City::new(2, 3.0, 4.0),
        ])
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(is_permutation(&[], 0));
    }

    #[test]
    fn test_tour_length_closes_cycle() {
        let m = line();
        assert_eq!(tour_length(&m, &[0, 1, 2]), 3 + 4 + 5);
        assert_eq!(tour_length(&m, &[2, 1, 0]), 12);
        assert_eq!(tour_length(&m, &[0]), 0);
    }

    #[test]
    fn test_tour_length_same_on_both_layouts() {
        let m = line();
        assert_eq!(tour_length(&m, &[1, 0, 2]), tour_length(&m.to_one_based(), &[1, 0, 2]));
    }

    #[test]
    fn test_rotate_to_front() {
        let mut t = vec![3, 1, 0, 2];
        rotate_to_front(&mut t, 0);
        assert_eq!(t, vec![0, 2, 3, 1]);
        rotate_to_front(&mut t, 9);
        assert_eq!(t, vec![0, 2, 3, 1]);
    }

    proptest! {
        #[test]
        fn prop_rotation_keeps_length(seed in 0u64..500, n in 3usize..12) {
            use rand::seq::SliceRandom;
            let mut rng = create_rng(seed);
            let cities: Vec<City> = (0..n)
                .map(|i| City::new(i, (i * 7 % 11) as f64 * 10.0, (i * 5 % 13) as f64 * 10.0))
                .collect();
            let m = DistanceMatrix::from_cities(&cities);
            let mut tour: Vec<usize> = (0..n).collect();
            tour.shuffle(&mut rng);
            let before = tour_length(&m, &tour);
            rotate_to_front(&mut tour, n - 1);
            prop_assert_eq!(tour[0], n - 1);
            prop_assert!(is_permutation(&tour, n));
            prop_assert_eq!(tour_length(&m, &tour), before);
        }
    }

    #[test]
    fn test_swap_delta_matches_recompute() {
        let mut rng = create_rng(11);
        for n in [2, 3, 4, 9] {
            let m = random_matrix(n, n as u64);
            let mut tour = random_permutation(n, &mut rng);
            let original = tour.clone();
            let base = tour_length(&m, &tour) as i64;
            for i in 0..n {
                for j in i + 1..n {
                    let delta = swap_delta(&m, &mut tour, i, j);
                    assert_eq!(tour, original);

                    let mut swapped = tour.clone();
                    swapped.swap(i, j);
                    assert_eq!(
                        base + delta,
                        tour_length(&m, &swapped) as i64,
                        "n={n} i={i} j={j}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_swap_delta_same_position_is_zero() {
        let m = random_matrix(5, 1);
        let mut tour = vec![0, 1, 2, 3, 4];
        assert_eq!(swap_delta(&m, &mut tour, 2, 2), 0);
    }
}
