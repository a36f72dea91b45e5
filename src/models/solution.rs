//! Solution and violation types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Route, Stop};

/// A broken routing invariant found by
/// [`check_solution`](crate::evaluation::check_solution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// A non-depot stop is served by no route.
    MissingStop {
        /// Stop index.
        stop: usize,
    },
    /// A stop is served more than once, or the depot appears mid-route.
    DuplicateStop {
        /// Stop index.
        stop: usize,
    },
    /// A route does not start and end at the depot.
    NotAnchored {
        /// Route index.
        route_index: usize,
    },
    /// The number of routes differs from the number of vehicles.
    RouteCount {
        /// Vehicles in the fleet.
        expected: usize,
        /// Routes in the solution.
        actual: usize,
    },
    /// A route references an index outside the problem.
    UnknownStop {
        /// The offending index.
        stop: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// The single-vehicle answer: one tour and its length.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{Route, TspSolution};
///
/// let sol = TspSolution::new(Route::new(0, vec![0, 1, 2, 0], 4.0), 5.0);
/// assert_eq!(sol.total_distance(), 4.0);
/// assert_eq!(sol.order(), &[0, 1, 2, 0]);
/// assert!(sol.improvement() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspSolution {
    route: Route,
    initial_distance: f64,
}

impl TspSolution {
    /// Creates a solution from the final tour and the greedy tour length.
    pub fn new(route: Route, initial_distance: f64) -> Self {
        Self {
            route,
            initial_distance,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Stop indices in visiting order.
    pub fn order(&self) -> &[usize] {
        self.route.stops()
    }

    /// Tour length in kilometres.
    pub fn total_distance(&self) -> f64 {
        self.route.distance()
    }

    /// Length of the greedy tour before 2-opt.
    pub fn initial_distance(&self) -> f64 {
        self.initial_distance
    }

    /// Distance saved by 2-opt.
    pub fn improvement(&self) -> f64 {
        self.initial_distance - self.route.distance()
    }

    /// Stop names in visiting order.
    pub fn itinerary<'a>(&self, stops: &'a [Stop]) -> Vec<&'a str> {
        self.route.names(stops)
    }
}

/// The multi-vehicle answer: one route per vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvrpSolution {
    routes: Vec<Route>,
    total_distance: f64,
    initial_distance: f64,
    rounds: usize,
    elapsed: Duration,
}

impl CvrpSolution {
    /// Creates a solution; the total distance is summed from the routes.
    pub fn new(routes: Vec<Route>, initial_distance: f64) -> Self {
        let total_distance = routes.iter().map(Route::distance).sum();
        Self {
            routes,
            total_distance,
            initial_distance,
            rounds: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Records search statistics.
    pub fn with_stats(mut self, rounds: usize, elapsed: Duration) -> Self {
        self.rounds = rounds;
        self.elapsed = elapsed;
        self
    }

    /// Routes in vehicle order, including unused ones.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes that serve at least one stop.
    pub fn num_used(&self) -> usize {
        self.routes.iter().filter(|r| r.is_used()).count()
    }

    /// Demand served by each route, in vehicle order.
    pub fn loads(&self) -> Vec<u64> {
        self.routes.iter().map(Route::load).collect()
    }

    /// Sum of all route lengths in kilometres.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of route lengths after construction, before improvement.
    pub fn initial_distance(&self) -> f64 {
        self.initial_distance
    }

    /// Improvement rounds completed.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Wall-clock time spent solving.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
