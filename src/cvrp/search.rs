use crate::constructive::cheapest_insertion;
use crate::models::CvrpProblem;

use super::{Partition, TimeBudget};

/// Result of [`PartitionSearch::improve`].
#[derive(Debug, Clone)]
pub struct Improvement {
    /// Best partition seen, by penalized cost.
    pub partition: Partition,
    /// Number of improvement rounds completed.
    pub rounds: usize,
}

/// A capacity-aware search over stop-to-vehicle partitions.
///
/// The solver calls [`construct`](Self::construct) once, repairs the result
/// if it strands stops, then hands a complete partition to
/// [`improve`](Self::improve). Implementations may substitute any
/// metaheuristic; the solver checks feasibility and keeps the better of the
/// initial and improved partitions.
///
/// # Examples
///
/// ```
/// use route_optimizer::cvrp::{Improvement, Partition, PartitionSearch, TimeBudget};
/// use route_optimizer::models::CvrpProblem;
///
/// /// Keeps the constructed partition.
/// struct Identity;
///
/// impl PartitionSearch for Identity {
///     fn name(&self) -> &'static str {
///         "identity"
///     }
///
///     fn improve(&self, _: &CvrpProblem, start: Partition, _: &TimeBudget) -> Improvement {
///         Improvement { partition: start, rounds: 0 }
///     }
/// }
/// ```
pub trait PartitionSearch {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Builds the initial partition. Stops that do not fit may be left
    /// unassigned.
    fn construct(&self, problem: &CvrpProblem) -> Partition {
        cheapest_insertion(problem)
    }

    /// Improves a complete partition until the budget runs out or the search
    /// converges. Overloaded partitions are accepted as a start.
    fn improve(&self, problem: &CvrpProblem, start: Partition, budget: &TimeBudget) -> Improvement;
}
