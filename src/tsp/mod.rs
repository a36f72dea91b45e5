//! Single-vehicle tour engine.
//!
//! Two phases over one distance matrix:
//!
//! 1. [`greedy_tour`](crate::constructive::greedy_tour) from stop 0, nearest
//!    unvisited stop first.
//! 2. [`two_opt`](crate::local_search::two_opt) until no reversal shortens
//!    the tour.
//!
//! The result is deterministic for a given matrix.

mod options;
mod solver;

pub use options::TspOptions;
pub use solver::{solve_tsp, solve_tsp_matrix, solve_tsp_with};
