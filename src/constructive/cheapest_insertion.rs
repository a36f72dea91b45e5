//! Capacity-aware cheapest insertion.
//!
//! # Algorithm
//!
//! Starting from empty routes, repeatedly evaluate every pending stop at
//! every position of every route with enough spare capacity, and perform the
//! globally cheapest insertion. Ties go to the lowest stop index, then the
//! lowest route, then the earliest position. Stops that fit no route are left
//! unassigned.
//!
//! # Complexity
//!
//! O(n³) for n stops (n insertions, each scanning O(n) stops × O(n) positions).
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use crate::cvrp::Partition;
use crate::distance::DistanceMatrix;
use crate::models::CvrpProblem;

/// Builds a partition by cheapest insertion of every non-depot stop.
///
/// Stops that fit no vehicle's remaining capacity end up in
/// [`Partition::unassigned`].
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
/// use route_optimizer::distance::{DistanceMatrix, Metric};
/// use route_optimizer::constructive::cheapest_insertion;
///
/// let stops = vec![
///     Stop::new("Depot", 0.0, 0.0),
///     Stop::new("E1", 0.0, 1.0).with_demand(10),
///     Stop::new("E2", 0.0, 2.0).with_demand(10),
///     Stop::new("W1", 0.0, -1.0).with_demand(10),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
/// let problem = CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(2, 20), 0).unwrap();
///
/// let partition = cheapest_insertion(&problem);
/// assert!(partition.is_feasible(&problem));
/// assert_eq!(partition.load(&problem, 0), 20);
/// assert_eq!(partition.routes()[1], vec![3]);
/// ```
pub fn cheapest_insertion(problem: &CvrpProblem) -> Partition {
    let mut partition = Partition::empty(problem.num_vehicles());
    cheapest_insertion_into(problem, &mut partition, problem.customers());
    partition
}

/// Inserts `pending` stops into an existing partition.
///
/// Stops that cannot be placed without exceeding a capacity are appended to
/// the partition's unassigned list. Returns the number of stops inserted.
pub fn cheapest_insertion_into(
    problem: &CvrpProblem,
    partition: &mut Partition,
    mut pending: Vec<usize>,
) -> usize {
    pending.sort_unstable();
    let depot = problem.depot();
    let distances = problem.matrix();
    let mut loads = partition.loads(problem);
    let mut inserted = 0;

    while !pending.is_empty() {
        let mut best: Option<(usize, usize, usize, f64)> = None;

        for (k, &stop) in pending.iter().enumerate() {
            let demand = problem.demand(stop);
            for (r, route) in partition.routes().iter().enumerate() {
                if loads[r] + demand > problem.capacity(r) {
                    continue;
                }
                for pos in 0..=route.len() {
                    let cost = insertion_cost(route, pos, stop, depot, distances);
                    if best.is_none_or(|(_, _, _, c)| cost < c) {
                        best = Some((k, r, pos, cost));
                    }
                }
            }
        }

        let Some((k, r, pos, _)) = best else {
            break;
        };
        let stop = pending.remove(k);
        loads[r] += problem.demand(stop);
        partition.routes_mut()[r].insert(pos, stop);
        inserted += 1;
    }

    if !pending.is_empty() {
        log::debug!(
            "cvrp.construct: {} stop(s) fit no remaining capacity",
            pending.len()
        );
        partition.unassigned_mut().extend(pending);
    }
    inserted
}

/// Extra distance from inserting `stop` before position `pos` of `route`,
/// where `route` excludes the depot at both ends.
pub(crate) fn insertion_cost(
    route: &[usize],
    pos: usize,
    stop: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos == route.len() { depot } else { route[pos] };

    // Old: prev → next
    // New: prev → stop → next
    distances.get(prev, stop) + distances.get(stop, next) - distances.get(prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use crate::models::{Stop, Vehicle};

    fn problem(demands: &[u32], vehicles: usize, capacity: u32) -> CvrpProblem {
        let mut stops = vec![Stop::new("Depot", 0.0, 0.0)];
        for (i, &d) in demands.iter().enumerate() {
            let angle = i as f64 * 0.7;
            stops.push(Stop::new(format!("S{}", i + 1), angle.sin() * 5.0, angle.cos() * 5.0).with_demand(d));
        }
        let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
        CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(vehicles, capacity), 0).expect("valid")
    }

    #[test]
    fn test_insertion_cost_on_empty_route() {
        let p = problem(&[5], 1, 10);
        // depot → 1 → depot
        let cost = insertion_cost(&[], 0, 1, 0, p.matrix());
        assert!((cost - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_all_stops_assigned_when_capacity_allows() {
        let p = problem(&[10; 6], 2, 40);
        let part = cheapest_insertion(&p);
        assert!(part.is_feasible(&p));
        let mut seen: Vec<usize> = part.routes().iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_capacity_respected() {
        let p = problem(&[10; 6], 3, 20);
        let part = cheapest_insertion(&p);
        for load in part.loads(&p) {
            assert!(load <= 20);
        }
    }

    #[test]
    fn test_stranded_stops_reported() {
        // Only {4, 2} and {3, 3} fill both vehicles; insertion may strand one.
        let p = problem(&[4, 3, 3, 2], 2, 6);
        let part = cheapest_insertion(&p);
        assert_eq!(part.overload(&p), 0);
        let placed: usize = part.routes().iter().map(Vec::len).sum();
        assert_eq!(placed + part.unassigned().len(), 4);
    }

    #[test]
    fn test_insert_into_existing_partition() {
        let p = problem(&[1, 1, 1], 1, 10);
        let mut part = Partition::new(vec![vec![2]], vec![]);
        let inserted = cheapest_insertion_into(&p, &mut part, vec![3, 1]);
        assert_eq!(inserted, 2);
        assert!(part.is_feasible(&p));
        assert_eq!(part.routes()[0].len(), 3);
    }

    #[test]
    fn test_zero_demand_always_placed() {
        let p = problem(&[10, 0, 10], 1, 10);
        let part = cheapest_insertion(&p);
        assert!(part.routes()[0].contains(&2));
        assert_eq!(part.unassigned().len(), 1);
    }
}
