//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from stop 0, always visit the nearest
//! unvisited stop. Ties go to the lowest index.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for the TSP. While solution
//! quality is typically 15-25% above optimal, it provides a fast baseline
//! for 2-opt.

use crate::distance::DistanceMatrix;

/// Constructs a tour with the nearest-neighbor heuristic.
///
/// The tour starts at index 0. With `return_to_start` the start index is
/// appended at the end, giving `n + 1` entries; otherwise the result is an
/// open path of `n` entries. An empty matrix yields an empty tour.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Stop;
/// use route_optimizer::distance::{DistanceMatrix, Metric};
/// use route_optimizer::constructive::greedy_tour;
///
/// let stops = vec![
///     Stop::new("Start", 0.0, 0.0),
///     Stop::new("Far", 0.0, 10.0),
///     Stop::new("Near", 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
///
/// assert_eq!(greedy_tour(&dm, true), vec![0, 2, 1, 0]);
/// assert_eq!(greedy_tour(&dm, false), vec![0, 2, 1]);
/// ```
pub fn greedy_tour(distances: &DistanceMatrix, return_to_start: bool) -> Vec<usize> {
    let n = distances.size();
    if n == 0 {
        return Vec::new();
    }

    let mut tour = Vec::with_capacity(n + 1);
    tour.push(0);
    let others: Vec<usize> = (1..n).collect();
    tour.extend(greedy_path(distances, 0, &others));

    if return_to_start {
        tour.push(0);
    }
    tour
}

/// Orders `stops` by repeatedly moving to the nearest remaining one,
/// starting from `from`. `from` itself is not included in the result.
pub fn greedy_path(distances: &DistanceMatrix, from: usize, stops: &[usize]) -> Vec<usize> {
    let mut remaining: Vec<usize> = stops.to_vec();
    remaining.sort_unstable();
    let mut path = Vec::with_capacity(remaining.len());
    let mut current = from;

    while let Some(next) = distances.nearest_neighbor(current, &remaining) {
        remaining.retain(|&s| s != next);
        path.push(next);
        current = next;
    }
    path
}
