//! Route summary, route building and solution checking.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{CvrpProblem, CvrpSolution, Route, Violation, ViolationType};

/// Sums `matrix[route[k]][route[k + 1]]` over consecutive pairs.
///
/// This is the objective shared by both solvers. Routes with fewer than two
/// entries have length zero.
///
/// # Errors
///
/// [`Error::InvalidRoute`] if any index is outside the matrix.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::DistanceMatrix;
/// use route_optimizer::evaluation::route_length;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 3.0],
///     vec![2.0, 0.0, 4.0],
///     vec![3.0, 4.0, 0.0],
/// ]).unwrap();
/// assert_eq!(route_length(&[0, 1, 2, 0], &dm).unwrap(), 9.0);
/// assert!(route_length(&[0, 5], &dm).is_err());
/// ```
pub fn route_length(route: &[usize], matrix: &DistanceMatrix) -> Result<f64> {
    if let Some(&index) = route.iter().find(|&&i| i >= matrix.size()) {
        return Err(Error::InvalidRoute {
            index,
            size: matrix.size(),
        });
    }
    Ok(sum_edges(route, matrix))
}

/// Unchecked variant of [`route_length`] for indices already validated.
pub(crate) fn sum_edges(route: &[usize], matrix: &DistanceMatrix) -> f64 {
    route.windows(2).map(|w| matrix.get(w[0], w[1])).sum()
}

/// Builds depot-anchored routes for the vehicles of a [`CvrpProblem`] and
/// checks their capacity.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{CvrpProblem, Vehicle};
/// use route_optimizer::distance::DistanceMatrix;
/// use route_optimizer::evaluation::RouteEvaluator;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 3.0],
///     vec![8.0, 3.0, 0.0],
/// ]).unwrap();
/// let problem = CvrpProblem::new(dm, vec![0, 10, 20], Vehicle::fleet(1, 100), 0).unwrap();
///
/// let evaluator = RouteEvaluator::new(&problem);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.stops(), &[0, 1, 2, 0]);
/// assert_eq!(route.distance(), 16.0);
/// assert_eq!(route.load(), 30);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a CvrpProblem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a CvrpProblem) -> Self {
        Self { problem }
    }

    /// Builds the route of vehicle `vehicle` visiting `stops` in order.
    ///
    /// `stops` excludes the depot; it is added at both ends.
    pub fn build_route(&self, vehicle: usize, stops: &[usize]) -> (Route, Vec<Violation>) {
        let depot = self.problem.depot();
        let mut sequence = Vec::with_capacity(stops.len() + 2);
        sequence.push(depot);
        sequence.extend_from_slice(stops);
        sequence.push(depot);

        let distance = sum_edges(&sequence, self.problem.matrix());
        let load: u64 = stops.iter().map(|&s| self.problem.demand(s)).sum();
        let assigned = &self.problem.vehicles()[vehicle];

        let mut violations = Vec::new();
        if load > u64::from(assigned.capacity()) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: vehicle,
                load,
                capacity: assigned.capacity(),
            }));
        }

        let route = Route::new(assigned.id(), sequence, distance).with_load(load, assigned.capacity());
        (route, violations)
    }
}

/// Lists every routing invariant the solution breaks.
///
/// Checks route count against the fleet, depot anchoring, unknown indices,
/// duplicate visits, missing stops and capacity (recomputed from the
/// problem's demands). An empty list means the solution is feasible.
pub fn check_solution(problem: &CvrpProblem, solution: &CvrpSolution) -> Vec<Violation> {
    let mut violations = Vec::new();
    let depot = problem.depot();
    let n = problem.size();

    if solution.num_routes() != problem.num_vehicles() {
        violations.push(Violation::new(ViolationType::RouteCount {
            expected: problem.num_vehicles(),
            actual: solution.num_routes(),
        }));
    }

    let mut visits = vec![0usize; n];
    for (route_index, route) in solution.routes().iter().enumerate() {
        let stops = route.stops();
        if stops.len() < 2 || stops[0] != depot || stops[stops.len() - 1] != depot {
            violations.push(Violation::new(ViolationType::NotAnchored { route_index }));
        }

        let mut load = 0u64;
        for &stop in route.visited() {
            if stop >= n {
                violations.push(Violation::new(ViolationType::UnknownStop { stop }));
                continue;
            }
            if stop == depot {
                violations.push(Violation::new(ViolationType::DuplicateStop { stop }));
                continue;
            }
            visits[stop] += 1;
            load += problem.demand(stop);
        }

        if let Some(vehicle) = problem.vehicles().get(route_index) {
            if load > u64::from(vehicle.capacity()) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index,
                    load,
                    capacity: vehicle.capacity(),
                }));
            }
        }
    }

    for stop in problem.customers() {
        match visits[stop] {
            0 => violations.push(Violation::new(ViolationType::MissingStop { stop })),
            1 => {}
            _ => violations.push(Violation::new(ViolationType::DuplicateStop { stop })),
        }
    }

    violations
}
