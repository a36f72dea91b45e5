use crate::constructive::{pack_demands, partition_from_bins, PackingOutcome};
use crate::error::{Error, Infeasibility, Result};
use crate::evaluation::check_solution;
use crate::local_search::two_opt_route;
use crate::models::{CvrpProblem, CvrpSolution};

use super::{AnnealingSearch, CvrpConfig, Improvement, Partition, PartitionSearch, TimeBudget};

/// Capacitated multi-vehicle solver.
///
/// # Pipeline
///
/// 1. Reject fleets that can never carry the demand.
/// 2. Build an initial partition with the search's constructor. If stops
///    are stranded, decide exactly whether the demands can be packed:
///    a packing becomes the start, a proof of impossibility is reported as
///    [`Infeasibility::NoPacking`], and an undecided search hands an
///    overloaded start to the improvement phase.
/// 3. Improve within [`CvrpConfig::time_limit`].
/// 4. Polish every route with 2-opt.
/// 5. Return the shorter of the initial and improved partitions that pass
///    [`check_solution`], or [`Error::TimeoutWithoutSolution`] if neither
///    does.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_optimizer::cvrp::{CvrpConfig, CvrpSolver, LocalDescent};
/// use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
/// use route_optimizer::distance::{DistanceMatrix, Metric};
///
/// let stops = vec![
///     Stop::new("Depot", 0.0, 0.0),
///     Stop::new("A", 0.0, 1.0).with_demand(10),
///     Stop::new("B", 0.0, 2.0).with_demand(10),
///     Stop::new("C", 0.0, -1.0).with_demand(10),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
/// let problem = CvrpProblem::from_stops(&stops, dm, Vehicle::fleet(2, 20), 0).unwrap();
///
/// let config = CvrpConfig::default().with_time_limit(Duration::from_millis(200));
/// let solver = CvrpSolver::new(config).unwrap().with_search(LocalDescent);
/// let sol = solver.solve(&problem).unwrap();
/// assert_eq!(sol.num_routes(), 2);
/// assert!((sol.total_distance() - 6.0).abs() < 1e-9);
/// ```
pub struct CvrpSolver {
    config: CvrpConfig,
    search: Box<dyn PartitionSearch>,
}

impl CvrpSolver {
    /// Creates a solver using [`AnnealingSearch`].
    ///
    /// Fails with [`Error::InvalidInput`] if the configuration is invalid.
    pub fn new(config: CvrpConfig) -> Result<Self> {
        config.validate()?;
        let search = Box::new(AnnealingSearch::from_config(&config));
        Ok(Self { config, search })
    }

    /// Replaces the search strategy.
    pub fn with_search(mut self, search: impl PartitionSearch + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    pub fn config(&self) -> &CvrpConfig {
        &self.config
    }

    /// Solves `problem` within the configured time limit.
    ///
    /// # Errors
    ///
    /// - [`Error::Infeasible`] when no assignment can respect the capacities.
    /// - [`Error::TimeoutWithoutSolution`] when the budget ran out before any
    ///   feasible partition was found.
    pub fn solve(&self, problem: &CvrpProblem) -> Result<CvrpSolution> {
        let budget = TimeBudget::start(self.config.time_limit);
        problem.check_capacity()?;

        let n = problem.customers().len();
        log::info!(
            "cvrp: start n={n} vehicles={} search={} time_limit_s={:.1}",
            problem.num_vehicles(),
            self.search.name(),
            self.config.time_limit.as_secs_f64()
        );

        let start = self.initial_partition(problem)?;
        let initial_distance = start.distance(problem);
        log::debug!(
            "cvrp.construct: dist={initial_distance:.3} feasible={}",
            start.is_feasible(problem)
        );

        let Improvement { partition, rounds } = self.search.improve(problem, start.clone(), &budget);
        let polished = polish(problem, partition);

        let best = [polished, start]
            .into_iter()
            .map(|p| p.to_solution(problem, initial_distance))
            .filter(|s| check_solution(problem, s).is_empty())
            .min_by(|a, b| a.total_distance().total_cmp(&b.total_distance()));

        let Some(best) = best else {
            log::warn!("cvrp: no feasible partition within {:?}", self.config.time_limit);
            return Err(Error::TimeoutWithoutSolution {
                budget: self.config.time_limit,
            });
        };

        let solution = best.with_stats(rounds, budget.elapsed());
        log::info!(
            "cvrp: done dist_before={initial_distance:.3} dist_after={:.3} rounds={rounds} elapsed_s={:.2} used={}",
            solution.total_distance(),
            solution.elapsed().as_secs_f64(),
            solution.num_used()
        );
        Ok(solution)
    }

    /// Constructs a complete partition, falling back to exact packing when
    /// construction strands stops.
    fn initial_partition(&self, problem: &CvrpProblem) -> Result<Partition> {
        let mut start = self.search.construct(problem);
        if start.is_complete() {
            return Ok(start);
        }

        log::warn!(
            "cvrp.construct: {} stop(s) stranded, trying exact packing",
            start.unassigned().len()
        );
        match pack_demands(problem, self.config.packing_node_limit) {
            PackingOutcome::Packed(bins) => Ok(partition_from_bins(problem, bins)),
            PackingOutcome::Impossible => Err(Infeasibility::NoPacking {
                vehicles: problem.num_vehicles(),
            }
            .into()),
            PackingOutcome::Undecided => {
                start.force_assign(problem);
                Ok(start)
            }
        }
    }
}

/// Re-orders every route with 2-opt.
fn polish(problem: &CvrpProblem, mut partition: Partition) -> Partition {
    let depot = problem.depot();
    for route in partition.routes_mut() {
        *route = two_opt_route(route, depot, problem.matrix());
    }
    partition
}
