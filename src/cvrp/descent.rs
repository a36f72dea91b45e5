//! Deterministic descent with relocate, swap and per-route 2-opt.

use crate::local_search::{relocate_improve, swap_improve, two_opt_route};
use crate::models::CvrpProblem;

use super::{penalty_weight, Improvement, Partition, PartitionSearch, TimeBudget};

/// Applies relocate, swap and route 2-opt in turn until a full round changes
/// nothing or the budget runs out.
///
/// Faster than [`AnnealingSearch`](super::AnnealingSearch) and reproducible,
/// but it stops at the first local optimum.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_optimizer::cvrp::{LocalDescent, Partition, PartitionSearch, TimeBudget};
/// use route_optimizer::models::{CvrpProblem, Vehicle};
/// use route_optimizer::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 1.0, 2.0],
///     vec![1.0, 0.0, 2.0, 1.0],
///     vec![1.0, 2.0, 0.0, 3.0],
///     vec![2.0, 1.0, 3.0, 0.0],
/// ]).unwrap();
/// let problem = CvrpProblem::new(dm, vec![0, 5, 5, 5], Vehicle::fleet(2, 10), 0).unwrap();
///
/// let start = Partition::new(vec![vec![1, 2], vec![3]], vec![]);
/// let out = LocalDescent.improve(&problem, start.clone(), &TimeBudget::start(Duration::from_secs(1)));
/// assert!(out.partition.distance(&problem) < start.distance(&problem));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDescent;

impl PartitionSearch for LocalDescent {
    fn name(&self) -> &'static str {
        "descent"
    }

    fn improve(&self, problem: &CvrpProblem, start: Partition, budget: &TimeBudget) -> Improvement {
        let penalty = penalty_weight(problem);
        let mut partition = start;
        let mut rounds = 0;

        while !budget.is_exhausted() {
            let mut moves = relocate_improve(problem, &mut partition, penalty);
            moves += swap_improve(problem, &mut partition, penalty);

            let depot = problem.depot();
            for route in partition.routes_mut() {
                let improved = two_opt_route(route, depot, problem.matrix());
                if improved != *route {
                    *route = improved;
                    moves += 1;
                }
            }

            rounds += 1;
            log::debug!(
                "cvrp.improve: round={rounds} moves={moves} dist={:.3}",
                partition.distance(problem)
            );
            if moves == 0 {
                log::debug!(
                    "cvrp.improve: converged after {rounds} rounds with {:?} left",
                    budget.remaining()
                );
                break;
            }
        }

        Improvement { partition, rounds }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::distance::{DistanceMatrix, Metric};
    use crate::models::{Stop, Vehicle};

    fn grid_problem() -> CvrpProblem {
        let mut stops = vec![Stop::new("Depot", 2.0, 2.0)];
        for i in 0..5 {
            for j in 0..5 {
                if (i, j) != (2, 2) {
                    stops.push(Stop::new(format!("G{i}{j}"), i as f64, j as f64).with_demand(3));
                }
            }
        }
        let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
        CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(4, 20), 0).expect("valid")
    }

    #[test]
    fn test_descent_converges() {
        let p = grid_problem();
        let start = crate::constructive::cheapest_insertion(&p);
        assert!(start.is_feasible(&p));
        let out = LocalDescent.improve(&p, start.clone(), &TimeBudget::start(Duration::from_secs(5)));
        assert!(out.partition.is_feasible(&p));
        assert!(out.partition.distance(&p) <= start.distance(&p) + 1e-9);

        // A converged partition is a fixed point.
        let again = LocalDescent.improve(&p, out.partition.clone(), &TimeBudget::start(Duration::from_secs(5)));
        assert_eq!(again.rounds, 1);
        assert_eq!(again.partition, out.partition);
    }

    #[test]
    fn test_descent_zero_budget() {
        let p = grid_problem();
        let start = crate::constructive::cheapest_insertion(&p);
        let out = LocalDescent.improve(&p, start.clone(), &TimeBudget::start(Duration::ZERO));
        assert_eq!(out.rounds, 0);
        assert_eq!(out.partition, start);
    }
}
