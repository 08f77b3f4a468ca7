//! Minimum spanning tree (Prim) and its pre-order walk.

use crate::matrix::{Distance, DistanceMatrix, INFINITY};

/// A tree edge, oriented away from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub parent: usize,
    pub child: usize,
    pub weight: Distance,
}

/// Spanning tree with edges in the order Prim added them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    pub root: usize,
    pub edges: Vec<TreeEdge>,
}

impl SpanningTree {
    /// Sum of the edge weights.
    pub fn weight(&self) -> Distance {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Pre-order depth-first walk from the root.
    ///
    /// Children are visited in the order they joined the tree, so the walk is
    /// fully determined by the root.
    pub fn preorder(&self) -> Vec<usize> {
        let n = self.edges.len() + 1;
        let mut children = vec![Vec::new(); n];
        for edge in &self.edges {
            children[edge.parent].push(edge.child);
        }

        let mut order = Vec::with_capacity(n);
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(children[node].iter().rev());
        }
        order
    }
}

/// Prim's algorithm on the complete graph of `matrix`.
///
/// `O(N²)`: a key array holds each outside city's cheapest link into the
/// tree. Ties go to the smallest city index, and a city's parent is the
/// earliest tree city offering its key.
///
/// # Panics
///
/// Panics if `root` is not a city of `matrix`.
pub fn prim(matrix: &DistanceMatrix, root: usize) -> SpanningTree {
    let n = matrix.city_count();
    assert!(root < n, "root {root} out of range for {n} cities");

    let mut in_tree = vec![false; n];
    let mut key = vec![INFINITY; n];
    let mut parent = vec![root; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    in_tree[root] = true;
    for v in (0..n).filter(|&v| v != root) {
        key[v] = matrix.between(root, v);
    }

    for _ in 1..n {
        let mut next: Option<usize> = None;
        for v in (0..n).filter(|&v| !in_tree[v]) {
            if next.is_none_or(|u| key[v] < key[u]) {
                next = Some(v);
            }
        }
        let Some(v) = next else { break };

        in_tree[v] = true;
        edges.push(TreeEdge {
            parent: parent[v],
            child: v,
            weight: key[v],
        });

        for w in (0..n).filter(|&w| !in_tree[w]) {
            let d = matrix.between(v, w);
            if d < key[w] {
                key[w] = d;
                parent[w] = v;
            }
        }
    }

    SpanningTree { root, edges }
}
