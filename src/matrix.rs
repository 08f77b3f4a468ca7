//! Cities and the integer distance matrix every solver reads from.
//!
//! Distances are planar Euclidean, rounded to the nearest integer with ties
//! going to the even neighbor. Self distances (and, in the one-based layout,
//! the whole reserved row and column 0) hold [`INFINITY`] so they can never be
//! picked as an edge.

/// Integer edge weight.
pub type Distance = u64;

/// Sentinel weight for entries that are never a valid edge.
pub const INFINITY: Distance = Distance::MAX;

/// A point of the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Label from the instance file (informational only).
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Rounded Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> Distance {
        euclidean(self.x, self.y, other.x, other.y)
    }
}

/// Rounded Euclidean distance between two coordinates.
///
/// Uses round-half-to-even, so `0.5 → 0`, `1.5 → 2`, `2.5 → 2`.
pub fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> Distance {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt().round_ties_even() as Distance
}

/// How city indices map onto matrix rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indexing {
    /// City `k` lives in row `k`; `N × N`.
    ZeroBased,
    /// City `k` lives in row `k + 1`; row and column 0 are reserved; `(N+1) × (N+1)`.
    OneBased,
}

/// Immutable square matrix of rounded distances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    cities: usize,
    dim: usize,
    indexing: Indexing,
    data: Vec<Distance>,
}

impl DistanceMatrix {
    /// Builds the zero-based `N × N` layout.
    pub fn from_cities(cities: &[City]) -> Self {
        Self::build(cities, Indexing::ZeroBased)
    }

    /// Builds the one-based `(N+1) × (N+1)` layout with a reserved row/column 0.
    pub fn one_based(cities: &[City]) -> Self {
        Self::build(cities, Indexing::OneBased)
    }

    /// Builds a zero-based matrix from explicit weights. The diagonal is
    /// overwritten with [`INFINITY`].
    ///
    /// # Panics
    ///
    /// Panics if `rows` is not square or not symmetric.
    pub fn from_rows(rows: &[Vec<Distance>]) -> Self {
        let n = rows.len();
        let mut data = vec![INFINITY; n * n];
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), n, "row {i} has {} entries, expected {n}", row.len());
            for (j, &w) in row.iter().enumerate() {
                if i != j {
                    assert_eq!(w, rows[j][i], "matrix is not symmetric at ({i}, {j})");
                    data[i * n + j] = w;
                }
            }
        }
        Self {
            cities: n,
            dim: n,
            indexing: Indexing::ZeroBased,
            data,
        }
    }

    /// Re-lays this matrix out in the one-based form.
    pub fn to_one_based(&self) -> Self {
        if self.indexing == Indexing::OneBased {
            return self.clone();
        }
        let n = self.cities;
        let dim = n + 1;
        let mut data = vec![INFINITY; dim * dim];
        for i in 0..n {
            for j in 0..n {
                data[(i + 1) * dim + j + 1] = self.data[i * n + j];
            }
        }
        Self {
            cities: n,
            dim,
            indexing: Indexing::OneBased,
            data,
        }
    }

    fn build(cities: &[City], indexing: Indexing) -> Self {
        let n = cities.len();
        let offset = match indexing {
            Indexing::ZeroBased => 0,
            Indexing::OneBased => 1,
        };
        let dim = n + offset;
        let mut data = vec![INFINITY; dim * dim];
        for (i, a) in cities.iter().enumerate() {
            for (j, b) in cities.iter().enumerate().skip(i + 1) {
                let d = a.distance_to(b);
                data[(i + offset) * dim + j + offset] = d;
                data[(j + offset) * dim + i + offset] = d;
            }
        }
        Self {
            cities: n,
            dim,
            indexing,
            data,
        }
    }

    /// Number of cities `N`.
    #[inline]
    pub fn city_count(&self) -> usize {
        self.cities
    }

    /// Number of rows (and columns) actually allocated.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn indexing(&self) -> Indexing {
        self.indexing
    }

    /// Weight at raw row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Distance {
        self.data[i * self.dim + j]
    }

    /// Distance between zero-based cities `a` and `b`, whatever the layout.
    #[inline]
    pub fn between(&self, a: usize, b: usize) -> Distance {
        let offset = match self.indexing {
            Indexing::ZeroBased => 0,
            Indexing::OneBased => 1,
        };
        self.get(a + offset, b + offset)
    }

    /// Raw row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[Distance] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// `true` if every pair of distinct cities is at distance zero.
    pub fn is_all_zero(&self) -> bool {
        self.data.iter().all(|&d| d == 0 || d == INFINITY)
    }
}
