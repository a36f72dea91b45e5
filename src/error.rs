//! Error types shared by the distance model and both solvers.

use std::time::Duration;

use thiserror::Error as ThisError;

/// Why a capacitated problem can never be satisfied by the given fleet.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Infeasibility {
    /// There are stops to serve but the fleet is empty.
    #[error("no vehicles available for the requested stops")]
    NoVehicles,
    /// A single stop demands more than the largest vehicle holds.
    #[error("stop {stop} demands {demand} but the largest vehicle holds {max_capacity}")]
    StopExceedsCapacity {
        /// Index of the offending stop.
        stop: usize,
        /// Its demand.
        demand: u64,
        /// Largest capacity in the fleet.
        max_capacity: u64,
    },
    /// The summed demand is larger than the summed fleet capacity.
    #[error("total demand {demand} exceeds total fleet capacity {capacity}")]
    DemandExceedsFleet {
        /// Total non-depot demand.
        demand: u64,
        /// Total fleet capacity.
        capacity: u64,
    },
    /// Every stop fits some vehicle and the totals fit the fleet, but no
    /// assignment of stops to vehicles respects every capacity.
    #[error("stop demands cannot be split across {vehicles} vehicles")]
    NoPacking {
        /// Number of vehicles in the fleet.
        vehicles: usize,
    },
}

/// Errors reported by the optimization core.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// Fewer than two stops were given to the TSP engine ("no route").
    #[error("at least 2 stops are required to build a tour, got {count}")]
    InsufficientStops {
        /// Number of stops supplied.
        count: usize,
    },
    /// A route references a stop index outside the distance matrix.
    #[error("route references stop {index} but the matrix holds {size} stops")]
    InvalidRoute {
        /// The out-of-range index.
        index: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// The capacity constraints cannot be met by the fleet.
    #[error("infeasible: {0}")]
    Infeasible(#[from] Infeasibility),
    /// The time budget ran out before any feasible partition was found.
    #[error("no feasible solution found within {budget:?}")]
    TimeoutWithoutSolution {
        /// The budget that was exhausted.
        budget: Duration,
    },
    /// The request itself is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds an [`Error::InvalidInput`] from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns `true` for the non-fatal "no route" outcome.
    pub fn is_no_route(&self) -> bool {
        matches!(self, Self::InsufficientStops { .. })
    }
}
