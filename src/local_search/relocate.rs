//! Inter-route stop relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each stop from its current route to every position of every
//! other route, and applies the single best move (best-improvement) until no
//! move lowers the penalized cost. Overload is priced at `penalty` per unit
//! of demand, so the operator also repairs overloaded partitions.
//!
//! # Complexity
//!
//! O(n² × R) per pass where n = stops per route, R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::constructive::insertion_cost;
use crate::cvrp::Partition;
use crate::distance::DistanceMatrix;
use crate::models::CvrpProblem;

/// A relocate move: move a stop from one route to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies inter-route relocate improvement to a partition in place.
///
/// Returns the number of moves applied.
///
/// # Examples
///
/// ```
/// use route_optimizer::cvrp::Partition;
/// use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
/// use route_optimizer::distance::{DistanceMatrix, Metric};
/// use route_optimizer::local_search::relocate_improve;
///
/// let stops = vec![
///     Stop::new("Depot", 0.0, 0.0),
///     Stop::new("E1", 0.0, 1.0).with_demand(10),
///     Stop::new("E2", 0.0, 2.0).with_demand(10),
///     Stop::new("W1", 0.0, -3.0).with_demand(10),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
/// let problem = CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(2, 20), 0).unwrap();
///
/// // E2 rides with W1 although E1's vehicle passes right by it.
/// let mut p = Partition::new(vec![vec![1], vec![2, 3]], vec![]);
/// let before = p.distance(&problem);
/// let moves = relocate_improve(&problem, &mut p, 1_000.0);
/// assert_eq!(moves, 1);
/// assert!(p.distance(&problem) < before);
/// assert!(p.is_feasible(&problem));
/// ```
pub fn relocate_improve(problem: &CvrpProblem, partition: &mut Partition, penalty: f64) -> usize {
    if partition.routes().len() < 2 {
        return 0;
    }

    let mut moves = 0;
    while let Some(mv) = find_best_relocate(problem, partition, penalty) {
        let routes = partition.routes_mut();
        let stop = routes[mv.from_route].remove(mv.from_pos);
        routes[mv.to_route].insert(mv.to_pos, stop);
        moves += 1;
    }
    moves
}

/// Finds the best single relocate move across all route pairs.
fn find_best_relocate(
    problem: &CvrpProblem,
    partition: &Partition,
    penalty: f64,
) -> Option<RelocateMove> {
    let depot = problem.depot();
    let distances = problem.matrix();
    let routes = partition.routes();
    let loads = partition.loads(problem);
    let mut best: Option<RelocateMove> = None;

    for from_r in 0..routes.len() {
        for from_pos in 0..routes[from_r].len() {
            let stop = routes[from_r][from_pos];
            let demand = problem.demand(stop);
            let removal_delta = removal_cost(&routes[from_r], from_pos, depot, distances);
            let from_cap = problem.capacity(from_r);
            let from_excess = excess(loads[from_r] - demand, from_cap) as f64
                - excess(loads[from_r], from_cap) as f64;

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r {
                    continue;
                }

                let to_cap = problem.capacity(to_r);
                let to_excess = excess(loads[to_r] + demand, to_cap) as f64
                    - excess(loads[to_r], to_cap) as f64;
                let capacity_delta = penalty * (from_excess + to_excess);

                // Try all insertion positions
                for to_pos in 0..=to_route.len() {
                    let insertion_delta = insertion_cost(to_route, to_pos, stop, depot, distances);
                    let delta = removal_delta + insertion_delta + capacity_delta;

                    if delta < -1e-10 {
                        let is_better = best.as_ref().is_none_or(|b| delta < b.delta);
                        if is_better {
                            best = Some(RelocateMove {
                                from_route: from_r,
                                from_pos,
                                to_route: to_r,
                                to_pos,
                                delta,
                            });
                        }
                    }
                }
            }
        }
    }

    best
}

/// Cost of removing the stop at `pos` from route.
pub(crate) fn removal_cost(
    route: &[usize],
    pos: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() - 1 {
        depot
    } else {
        route[pos + 1]
    };
    let stop = route[pos];

    // Old: prev → stop → next
    // New: prev → next
    distances.get(prev, next) - distances.get(prev, stop) - distances.get(stop, next)
}

/// Demand above `capacity`.
pub(crate) fn excess(load: u64, capacity: u64) -> u64 {
    load.saturating_sub(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cvrp::penalty_weight;
    use crate::distance::Metric;
    use crate::models::{Stop, Vehicle};

    fn line_problem(vehicles: usize, capacity: u32) -> CvrpProblem {
        let stops: Vec<Stop> = (0..5)
            .map(|i| Stop::new(format!("S{i}"), 0.0, i as f64).with_demand(if i == 0 { 0 } else { 10 }))
            .collect();
        let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
        CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(vehicles, capacity), 0).expect("valid")
    }

    #[test]
    fn test_removal_cost() {
        let p = line_problem(1, 100);
        // 0→1→2→0 minus stop 2: 0→1→0, saves 2
        let delta = removal_cost(&[1, 2], 1, 0, p.matrix());
        assert!((delta + 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_merges_routes_on_a_line() {
        let p = line_problem(2, 100);
        let mut part = Partition::new(vec![vec![1, 2], vec![3, 4]], vec![]);
        let before = part.distance(&p);
        relocate_improve(&p, &mut part, penalty_weight(&p));
        assert!(part.distance(&p) < before);
        // All four fit one vehicle: 0→1→2→3→4→0 = 8
        assert!((part.distance(&p) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_repairs_overload() {
        let p = line_problem(2, 20);
        let mut part = Partition::new(vec![vec![1, 2, 3, 4], vec![]], vec![]);
        assert_eq!(part.overload(&p), 20);
        relocate_improve(&p, &mut part, penalty_weight(&p));
        assert_eq!(part.overload(&p), 0);
        assert!(part.is_feasible(&p));
    }

    #[test]
    fn test_never_creates_overload() {
        let p = line_problem(2, 20);
        let mut part = Partition::new(vec![vec![1, 2], vec![3, 4]], vec![]);
        relocate_improve(&p, &mut part, penalty_weight(&p));
        assert!(part.is_feasible(&p));
    }

    #[test]
    fn test_single_route_untouched() {
        let p = line_problem(1, 100);
        let mut part = Partition::new(vec![vec![2, 1, 3, 4]], vec![]);
        assert_eq!(relocate_improve(&p, &mut part, 1.0), 0);
        assert_eq!(part.routes()[0], vec![2, 1, 3, 4]);
    }
}
