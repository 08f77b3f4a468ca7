//! Instance generators and a brute-force oracle shared by the unit tests.

use crate::matrix::{City, Distance, DistanceMatrix};
use crate::random::create_rng;
use crate::tour::tour_length;
use rand::Rng;

/// `n` cities with integer-ish coordinates in `[0, 100)`.
pub fn random_cities(n: usize, seed: u64) -> Vec<City> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|i| {
            City::new(
                i + 1,
                rng.random_range(0..100) as f64,
                rng.random_range(0..100) as f64,
            )
        })
        .collect()
}

pub fn random_matrix(n: usize, seed: u64) -> DistanceMatrix {
    DistanceMatrix::from_cities(&random_cities(n, seed))
}

/// Four corners of the unit square.
pub fn unit_square() -> DistanceMatrix {
    DistanceMatrix::from_cities(&[
        City::new(1, 0.0, 0.0),
        City::new(2, 1.0, 0.0),
        City::new(3, 1.0, 1.0),
        City::new(4, 0.0, 1.0),
    ])
}

/// Optimal tour length by enumerating every tour that starts at city 0.
pub fn brute_force_optimum(matrix: &DistanceMatrix) -> Distance {
    let n = matrix.city_count();
    let mut rest: Vec<usize> = (1..n).collect();
    let mut best = Distance::MAX;
    permute(&mut rest, 0, &mut |perm| {
        let mut tour = Vec::with_capacity(n);
        tour.push(0);
        tour.extend_from_slice(perm);
        best = best.min(tour_length(matrix, &tour));
    });
    best
}

fn permute(items: &mut Vec<usize>, k: usize, visit: &mut impl FnMut(&[usize])) {
    if k == items.len() {
        visit(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        permute(items, k + 1, visit);
        items.swap(k, i);
    }
}
