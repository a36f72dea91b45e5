//! Time-bounded capacitated vehicle routing.
//!
//! Stops are partitioned among a fleet of capacity-limited vehicles, each
//! route starting and ending at the depot, minimizing total distance.
//!
//! - [`CvrpSolver`]: construct, repair, improve and polish within a budget
//! - [`PartitionSearch`]: the pluggable construct/improve interface
//! - [`AnnealingSearch`]: simulated annealing via `u_metaheur::sa`
//! - [`LocalDescent`]: relocate, swap and 2-opt until no move improves
//!
//! A solve either returns a solution that satisfies every capacity, or an
//! error that tells infeasible instances apart from exhausted budgets:
//!
//! ```
//! use route_optimizer::cvrp::solve_cvrp;
//! use route_optimizer::models::Stop;
//! use route_optimizer::{Error, Infeasibility};
//!
//! let stops = vec![
//!     Stop::new("Depot", 23.18, 79.95),
//!     Stop::new("Market", 23.17, 79.93),
//! ];
//! let err = solve_cvrp(&stops, &[0, 60], 1, 50, 0).unwrap_err();
//! assert!(matches!(err, Error::Infeasible(Infeasibility::StopExceedsCapacity { .. })));
//! ```

mod annealing;
mod budget;
mod config;
mod descent;
mod partition;
mod search;
mod solver;

pub use annealing::AnnealingSearch;
pub use budget::TimeBudget;
pub use config::CvrpConfig;
pub use descent::LocalDescent;
pub use partition::Partition;
pub(crate) use partition::penalty_weight;
pub use search::{Improvement, PartitionSearch};
pub use solver::CvrpSolver;

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::{check_unique_names, CvrpProblem, CvrpSolution, Stop, Vehicle};

/// Solves a CVRP over geographic stops with the default configuration.
///
/// `demands` gives one value per stop; the depot's entry is ignored.
/// Every vehicle has the same `capacity`.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if `demands` and `stops` differ in length, two
///   stops share a name, the depot is out of range or `capacity` is zero.
/// - [`Error::Infeasible`] if the fleet cannot carry the demand.
/// - [`Error::TimeoutWithoutSolution`] if no feasible assignment was found
///   within the default ten-second budget.
pub fn solve_cvrp(
    stops: &[Stop],
    demands: &[u32],
    vehicle_count: usize,
    capacity: u32,
    depot: usize,
) -> Result<CvrpSolution> {
    solve_cvrp_with(
        stops,
        demands,
        vehicle_count,
        capacity,
        depot,
        &CvrpConfig::default(),
    )
}

/// Like [`solve_cvrp`], with an explicit configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_optimizer::cvrp::{solve_cvrp_with, CvrpConfig};
/// use route_optimizer::models::Stop;
///
/// let stops = vec![
///     Stop::new("Depot", 23.18, 79.95),
///     Stop::new("A", 23.17, 79.93),
///     Stop::new("B", 23.16, 79.94),
///     Stop::new("C", 23.19, 79.99),
/// ];
/// let config = CvrpConfig::default().with_time_limit(Duration::from_millis(200));
/// let sol = solve_cvrp_with(&stops, &[0, 10, 10, 10], 2, 20, 0, &config).unwrap();
/// assert_eq!(sol.num_routes(), 2);
/// assert!(sol.loads().iter().all(|&load| load <= 20));
/// ```
pub fn solve_cvrp_with(
    stops: &[Stop],
    demands: &[u32],
    vehicle_count: usize,
    capacity: u32,
    depot: usize,
    config: &CvrpConfig,
) -> Result<CvrpSolution> {
    if demands.len() != stops.len() {
        return Err(Error::invalid_input(format!(
            "{} demands given for {} stops",
            demands.len(),
            stops.len()
        )));
    }
    check_unique_names(stops)?;
    let matrix = DistanceMatrix::from_stops(stops, config.metric);
    let problem = CvrpProblem::new(
        matrix,
        demands.to_vec(),
        Vehicle::fleet(vehicle_count, capacity),
        depot,
    )?;
    CvrpSolver::new(config.clone())?.solve(&problem)
}
