//! Mutable state of the depth-first search.
//!
//! The state is owned by the runner and handed down the recursion by `&mut`.
//! Every extension goes through [`SearchState::descend`], which returns a
//! [`Frame`] holding what it overwrote; [`SearchState::backtrack`] consumes that
//! frame and puts everything back. A caller that pairs the two sees the exact
//! same state before and after exploring a child.

use crate::matrix::Distance;

/// What a single descent overwrote.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use = "a frame must be passed back to `backtrack`"]
pub struct Frame {
    city: usize,
    previous_distance: Distance,
    previous_bound: f64,
}

impl Frame {
    /// The city that was appended.
    #[inline]
    pub fn city(&self) -> usize {
        self.city
    }
}

/// Partial tour plus its running distance and remaining lower bound.
///
/// Cities are one-based; index 0 is never visited.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    path: Vec<usize>,
    visited: Vec<bool>,
    distance: Distance,
    bound: f64,
}

impl SearchState {
    /// A state holding only `root`, for an instance of `cities` cities.
    pub fn new(cities: usize, root: usize, bound: f64) -> Self {
        let mut visited = vec![false; cities + 1];
        visited[root] = true;
        let mut path = Vec::with_capacity(cities);
        path.push(root);
        Self {
            path,
            visited,
            distance: 0,
            bound,
        }
    }

    /// Appends `city`, adding `edge` to the distance and replacing the bound.
    pub fn descend(&mut self, city: usize, edge: Distance, bound: f64) -> Frame {
        debug_assert!(!self.visited[city], "city {city} already on the path");
        let frame = Frame {
            city,
            previous_distance: self.distance,
            previous_bound: self.bound,
        };
        self.path.push(city);
        self.visited[city] = true;
        self.distance += edge;
        self.bound = bound;
        frame
    }

    /// Undoes the descent that produced `frame`.
    pub fn backtrack(&mut self, frame: Frame) {
        let popped = self.path.pop();
        debug_assert_eq!(popped, Some(frame.city), "frames undone out of order");
        self.visited[frame.city] = false;
        self.distance = frame.previous_distance;
        self.bound = frame.previous_bound;
    }

    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn first(&self) -> usize {
        self.path[0]
    }

    #[inline]
    pub fn last(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    #[inline]
    pub fn is_visited(&self, city: usize) -> bool {
        self.visited[city]
    }

    #[inline]
    pub fn distance(&self) -> Distance {
        self.distance
    }

    #[inline]
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// `true` if the visited flags mark exactly the cities on the path and
    /// the remaining bound is non-negative.
    pub fn is_consistent(&self) -> bool {
        let marked = self.visited.iter().filter(|&&v| v).count();
        marked == self.path.len()
            && self.path.iter().all(|&city| self.visited[city])
            && self.bound >= 0.0
    }
}
