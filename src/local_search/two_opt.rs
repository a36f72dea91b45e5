//! 2-opt segment reversal.
//!
//! # Algorithm
//!
//! For every pair of positions `i < j` with `j - i >= 2`, reversing
//! `tour[i..=j]` replaces edges `(tour[i-1], tour[i])` and
//! `(tour[j], tour[j+1])` with `(tour[i-1], tour[j])` and
//! `(tour[i], tour[j+1])`:
//!
//! ```text
//! delta = d(a, c) + d(b, e) - d(a, b) - d(c, e)
//!         a = tour[i-1], b = tour[i], c = tour[j], e = tour[j+1]
//! ```
//!
//! The scan runs `i` ascending then `j` ascending. The first reversal with
//! `delta < 0` is applied and the scan restarts from `i = 1` on the new tour
//! (first-improvement). The search stops after a full scan without moves.
//!
//! Position 0 never moves. In a closed tour the last position (the repeated
//! start) never moves either; in an open path it may, and the edge after it
//! does not exist.
//!
//! # Complexity
//!
//! O(n²) per scan with O(1) deltas.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;

/// Smallest length decrease accepted as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Result of [`two_opt`].
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptOutcome {
    /// The locally optimal tour.
    pub tour: Vec<usize>,
    /// Number of full scans performed, including the final one without moves.
    pub passes: usize,
    /// Number of reversals applied.
    pub moves: usize,
}

/// Improves `tour` with first-improvement 2-opt until no reversal helps.
///
/// With `closed`, `tour` must end with its first entry repeated; that
/// position is kept fixed. Tours too short to hold a valid reversal are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Stop;
/// use route_optimizer::distance::{DistanceMatrix, Metric};
/// use route_optimizer::local_search::two_opt;
///
/// // Unit square plus a point below it, visited in a self-crossing order.
/// let stops = vec![
///     Stop::new("a", 0.0, 0.0),
///     Stop::new("b", 0.0, 1.0),
///     Stop::new("c", 1.0, 1.0),
///     Stop::new("d", 1.0, 0.0),
///     Stop::new("e", 0.5, -1.0),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
///
/// let out = two_opt(&[0, 3, 2, 1, 4, 0], &dm, true);
/// assert_eq!(out.tour, vec![0, 1, 2, 3, 4, 0]);
/// assert_eq!((out.passes, out.moves), (2, 1));
///
/// // A locally optimal tour comes back untouched.
/// let again = two_opt(&out.tour, &dm, true);
/// assert_eq!(again.tour, out.tour);
/// assert_eq!(again.moves, 0);
/// ```
pub fn two_opt(tour: &[usize], distances: &DistanceMatrix, closed: bool) -> TwoOptOutcome {
    let mut current = tour.to_vec();
    let mut passes = 0;
    let mut moves = 0;

    // Highest movable position.
    let last = if closed {
        current.len().saturating_sub(2)
    } else {
        current.len().saturating_sub(1)
    };

    'scan: loop {
        passes += 1;
        for i in 1..last.saturating_sub(1) {
            for j in i + 2..=last {
                if reversal_delta(&current, distances, i, j) < -IMPROVEMENT_EPS {
                    current[i..=j].reverse();
                    moves += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }

    TwoOptOutcome {
        tour: current,
        passes,
        moves,
    }
}

/// Applies 2-opt to one vehicle route given without its depot ends.
///
/// Returns the improved stop order; the depot closes both ends of the route.
pub fn two_opt_route(stops: &[usize], depot: usize, distances: &DistanceMatrix) -> Vec<usize> {
    if stops.len() < 3 {
        return stops.to_vec();
    }
    let mut tour = Vec::with_capacity(stops.len() + 2);
    tour.push(depot);
    tour.extend_from_slice(stops);
    tour.push(depot);

    let mut out = two_opt(&tour, distances, true).tour;
    out.pop();
    out.remove(0);
    out
}

/// Length change from reversing `tour[i..=j]`.
fn reversal_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let a = tour[i - 1];
    let b = tour[i];
    let c = tour[j];

    let mut delta = distances.get(a, c) - distances.get(a, b);
    if let Some(&e) = tour.get(j + 1) {
        delta += distances.get(b, e) - distances.get(c, e);
    }
    delta
}
