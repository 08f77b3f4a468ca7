//! The pairwise-swap neighborhood.

use crate::random::random_permutation;
use rand::Rng;

/// Scan order over the swap neighborhood of an `n`-city tour.
///
/// Two independently shuffled copies of `0..n` are walked as an outer and an
/// inner loop; only pairs with `i < j` are yielded, so every unordered pair
/// appears exactly once.
#[derive(Debug, Clone)]
pub struct SwapOrder {
    outer: Vec<usize>,
    inner: Vec<usize>,
}

impl SwapOrder {
    pub fn shuffled<R: Rng>(n: usize, rng: &mut R) -> Self {
        let outer = random_permutation(n, rng);
        let inner = random_permutation(n, rng);
        Self { outer, inner }
    }

    /// Position pairs `(i, j)` with `i < j`, in scan order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.outer.iter().flat_map(move |&i| {
            self.inner
                .iter()
                .filter(move |&&j| i < j)
                .map(move |&j| (i, j))
        })
    }
}
