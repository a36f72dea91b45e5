//! Lightweight stop-to-vehicle assignment used while searching.
//!
//! Routes are stored as `Vec<Vec<usize>>` (one stop sequence per vehicle,
//! depot excluded) with a separate list of unassigned stops. This allows
//! cheap insertion and removal without rebuilding full `Route` objects.

use crate::evaluation::RouteEvaluator;
use crate::models::{CvrpProblem, CvrpSolution};

/// Stop sequences for every vehicle of a problem, depot excluded.
///
/// A partition may be incomplete (stops left in `unassigned`) or overloaded
/// (a route above its vehicle's capacity) while the search runs; only
/// [`is_feasible`](Self::is_feasible) partitions are turned into solutions.
///
/// # Examples
///
/// ```
/// use route_optimizer::cvrp::Partition;
/// use route_optimizer::models::{CvrpProblem, Vehicle};
/// use route_optimizer::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ]).unwrap();
/// let problem = CvrpProblem::new(dm, vec![0, 10, 10], Vehicle::fleet(2, 15), 0).unwrap();
///
/// let p = Partition::new(vec![vec![1], vec![2]], vec![]);
/// assert!(p.is_feasible(&problem));
/// assert_eq!(p.distance(&problem), 6.0);
///
/// let crowded = Partition::new(vec![vec![1, 2], vec![]], vec![]);
/// assert_eq!(crowded.overload(&problem), 5);
/// assert!(!crowded.is_feasible(&problem));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    routes: Vec<Vec<usize>>,
    unassigned: Vec<usize>,
}

impl Partition {
    /// Creates a partition from route sequences.
    pub fn new(routes: Vec<Vec<usize>>, unassigned: Vec<usize>) -> Self {
        Self { routes, unassigned }
    }

    /// One empty route per vehicle, nothing assigned.
    pub fn empty(vehicles: usize) -> Self {
        Self::new(vec![Vec::new(); vehicles], Vec::new())
    }

    /// Returns the routes as stop sequences.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Returns mutable routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Vec<usize>> {
        &mut self.routes
    }

    /// Returns unassigned stops.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns mutable unassigned list.
    pub fn unassigned_mut(&mut self) -> &mut Vec<usize> {
        &mut self.unassigned
    }

    /// Returns `true` if every stop is on some route.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Demand carried by route `r`.
    pub fn load(&self, problem: &CvrpProblem, r: usize) -> u64 {
        self.routes[r].iter().map(|&s| problem.demand(s)).sum()
    }

    /// Demand carried by each route.
    pub fn loads(&self, problem: &CvrpProblem) -> Vec<u64> {
        (0..self.routes.len()).map(|r| self.load(problem, r)).collect()
    }

    /// Total distance for all routes, each closed at the depot.
    pub fn distance(&self, problem: &CvrpProblem) -> f64 {
        self.routes
            .iter()
            .map(|r| route_distance(problem, r))
            .sum()
    }

    /// Demand above capacity, summed over routes.
    pub fn overload(&self, problem: &CvrpProblem) -> u64 {
        (0..self.routes.len())
            .map(|r| self.load(problem, r).saturating_sub(problem.capacity(r)))
            .sum()
    }

    /// Complete and within every capacity.
    pub fn is_feasible(&self, problem: &CvrpProblem) -> bool {
        self.is_complete() && self.overload(problem) == 0
    }

    /// Distance plus `penalty` per unit of overload.
    pub fn cost(&self, problem: &CvrpProblem, penalty: f64) -> f64 {
        self.distance(problem) + penalty * self.overload(problem) as f64
    }

    /// Places every unassigned stop on the route with the most spare
    /// capacity, even if that overloads it.
    pub fn force_assign(&mut self, problem: &CvrpProblem) {
        if self.routes.is_empty() {
            return;
        }
        let mut loads = self.loads(problem);
        for stop in std::mem::take(&mut self.unassigned) {
            let target = (0..self.routes.len())
                .max_by_key(|&r| {
                    (
                        problem.capacity(r) as i128 - loads[r] as i128,
                        std::cmp::Reverse(r),
                    )
                })
                .unwrap_or(0);
            loads[target] += problem.demand(stop);
            self.routes[target].push(stop);
        }
    }

    /// Converts into a solution with one depot-anchored route per vehicle.
    pub fn to_solution(&self, problem: &CvrpProblem, initial_distance: f64) -> CvrpSolution {
        let evaluator = RouteEvaluator::new(problem);
        let routes = self
            .routes
            .iter()
            .enumerate()
            .map(|(v, stops)| evaluator.build_route(v, stops).0)
            .collect();
        CvrpSolution::new(routes, initial_distance)
    }
}

/// Length of `depot → stops[0] → … → stops[last] → depot`; 0 when empty.
pub(crate) fn route_distance(problem: &CvrpProblem, stops: &[usize]) -> f64 {
    let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    let depot = problem.depot();
    let mut dist = problem.distance(depot, first);
    for w in stops.windows(2) {
        dist += problem.distance(w[0], w[1]);
    }
    dist + problem.distance(last, depot)
}

/// Penalty per unit of overload that makes every overloaded partition cost
/// more than every complete feasible one.
pub(crate) fn penalty_weight(problem: &CvrpProblem) -> f64 {
    let edges = (problem.size() + problem.num_vehicles()) as f64;
    2.0 * problem.matrix().max_entry() * edges + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, Metric};
    use crate::models::{Stop, Vehicle};

    fn line_problem(capacity: u32, vehicles: usize) -> CvrpProblem {
        let stops: Vec<Stop> = (0..4)
            .map(|i| Stop::new(format!("S{i}"), 0.0, i as f64).with_demand(if i == 0 { 0 } else { 10 }))
            .collect();
        let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
        CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(vehicles, capacity), 0).expect("valid")
    }

    #[test]
    fn test_distance() {
        let p = line_problem(30, 1);
        let part = Partition::new(vec![vec![1, 2, 3]], vec![]);
        // 0→1→2→3→0 = 1+1+1+3 = 6
        assert!((part.distance(&p) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_routes_with_empty() {
        let p = line_problem(30, 3);
        let part = Partition::new(vec![vec![1], vec![], vec![2, 3]], vec![]);
        // (0→1→0)+(0→2→3→0) = 2+6 = 8
        assert!((part.distance(&p) - 8.0).abs() < 1e-10);
        assert_eq!(part.loads(&p), vec![10, 0, 20]);
    }

    #[test]
    fn test_incomplete_is_infeasible() {
        let p = line_problem(30, 1);
        let part = Partition::new(vec![vec![1, 2]], vec![3]);
        assert!(!part.is_complete());
        assert!(!part.is_feasible(&p));
    }

    #[test]
    fn test_force_assign_prefers_spare_capacity() {
        let p = line_problem(15, 2);
        let mut part = Partition::new(vec![vec![1], vec![]], vec![2, 3]);
        part.force_assign(&p);
        assert!(part.is_complete());
        assert_eq!(part.routes()[1], vec![2]);
        // Both routes hold 10 now; the tie goes to the first route.
        assert_eq!(part.routes()[0], vec![1, 3]);
        assert_eq!(part.overload(&p), 5);
    }

    #[test]
    fn test_penalty_dominates_distance() {
        let p = line_problem(20, 2);
        let penalty = penalty_weight(&p);
        let feasible = Partition::new(vec![vec![1, 3], vec![2]], vec![]);
        let overloaded = Partition::new(vec![vec![1, 2, 3], vec![]], vec![]);
        assert!(feasible.cost(&p, penalty) < overloaded.cost(&p, penalty));
    }

    #[test]
    fn test_to_solution_keeps_vehicle_order() {
        let p = line_problem(30, 2);
        let part = Partition::new(vec![vec![], vec![3, 2, 1]], vec![]);
        let sol = part.to_solution(&p, 6.0);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].stops(), &[0, 0]);
        assert_eq!(sol.routes()[1].stops(), &[0, 3, 2, 1, 0]);
        assert_eq!(sol.loads(), vec![0, 30]);
    }
}
