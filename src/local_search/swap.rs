//! Inter-route stop exchange operator.
//!
//! # Algorithm
//!
//! For every pair of stops on different routes, evaluate exchanging their
//! positions. Each stop takes the other's place, so only the four edges
//! around the two positions change. The best exchange lowering the
//! penalized cost is applied until none remains.
//!
//! Swaps reach partitions that relocate cannot when both routes are full:
//! exchanging two stops of similar demand keeps both loads within capacity.
//!
//! # Complexity
//!
//! O(n²) per pass where n = number of stops.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use super::relocate::excess;
use crate::cvrp::Partition;
use crate::distance::DistanceMatrix;
use crate::models::CvrpProblem;

#[derive(Debug, Clone)]
struct SwapMove {
    route_a: usize,
    pos_a: usize,
    route_b: usize,
    pos_b: usize,
    delta: f64,
}

/// Applies inter-route swap improvement to a partition in place.
///
/// Returns the number of swaps applied.
///
/// # Examples
///
/// ```
/// use route_optimizer::cvrp::Partition;
/// use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
/// use route_optimizer::distance::{DistanceMatrix, Metric};
/// use route_optimizer::local_search::swap_improve;
///
/// let stops = vec![
///     Stop::new("Depot", 0.0, 0.0),
///     Stop::new("E1", 0.0, 1.0).with_demand(10),
///     Stop::new("E2", 0.0, 2.0).with_demand(10),
///     Stop::new("W1", 0.0, -1.0).with_demand(10),
///     Stop::new("W2", 0.0, -2.0).with_demand(10),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
/// let problem = CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(2, 20), 0).unwrap();
///
/// // Both vehicles are full, each serving one east and one west stop.
/// let mut p = Partition::new(vec![vec![1, 3], vec![2, 4]], vec![]);
/// assert!(swap_improve(&problem, &mut p, 1_000.0) >= 1);
/// assert_eq!(p.distance(&problem), 8.0);
/// ```
pub fn swap_improve(problem: &CvrpProblem, partition: &mut Partition, penalty: f64) -> usize {
    let mut moves = 0;
    while let Some(mv) = find_best_swap(problem, partition, penalty) {
        let routes = partition.routes_mut();
        let a = routes[mv.route_a][mv.pos_a];
        routes[mv.route_a][mv.pos_a] = routes[mv.route_b][mv.pos_b];
        routes[mv.route_b][mv.pos_b] = a;
        moves += 1;
    }
    moves
}

fn find_best_swap(problem: &CvrpProblem, partition: &Partition, penalty: f64) -> Option<SwapMove> {
    let depot = problem.depot();
    let distances = problem.matrix();
    let routes = partition.routes();
    let loads = partition.loads(problem);
    let mut best: Option<SwapMove> = None;

    for ra in 0..routes.len() {
        for rb in ra + 1..routes.len() {
            let (cap_a, cap_b) = (problem.capacity(ra), problem.capacity(rb));
            let excess_before = excess(loads[ra], cap_a) + excess(loads[rb], cap_b);

            for (pa, &a) in routes[ra].iter().enumerate() {
                for (pb, &b) in routes[rb].iter().enumerate() {
                    let (da, db) = (problem.demand(a), problem.demand(b));
                    let load_a = loads[ra] - da + db;
                    let load_b = loads[rb] - db + da;
                    let excess_after = excess(load_a, cap_a) + excess(load_b, cap_b);
                    let capacity_delta =
                        penalty * (excess_after as f64 - excess_before as f64);

                    let delta = replace_cost(&routes[ra], pa, b, depot, distances)
                        + replace_cost(&routes[rb], pb, a, depot, distances)
                        + capacity_delta;

                    if delta < -1e-10 && best.as_ref().is_none_or(|m| delta < m.delta) {
                        best = Some(SwapMove {
                            route_a: ra,
                            pos_a: pa,
                            route_b: rb,
                            pos_b: pb,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}

/// Distance change from putting `stop` in place of `route[pos]`.
fn replace_cost(
    route: &[usize],
    pos: usize,
    stop: usize,
    depot: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if pos == 0 { depot } else { route[pos - 1] };
    let next = if pos + 1 == route.len() {
        depot
    } else {
        route[pos + 1]
    };
    let old = route[pos];

    distances.get(prev, stop) + distances.get(stop, next)
        - distances.get(prev, old)
        - distances.get(old, next)
}
