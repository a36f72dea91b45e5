//! Simulated annealing over partitions.
//!
//! # Algorithm
//!
//! The budget is spent in rounds. Each round runs
//! [`SaRunner`] for a fixed number of iterations starting from the best
//! partition so far, then checks the clock. The temperature carries over
//! from one round to the next and is reset to its starting value once it
//! cools down to the minimum, so long budgets alternate between exploration
//! and refinement.
//!
//! Neighbours come from one of three random moves:
//!
//! - relocate a stop to a random position of a random route
//! - swap two stops on different routes
//! - reverse a segment within one route
//!
//! Costs are distances plus a penalty per unit of overload large enough that
//! every overloaded partition costs more than every feasible one.
//!
//! # Reference
//!
//! Osman, I.H. (1993). "Metastrategy simulated annealing and tabu search
//! algorithms for the vehicle routing problem", *Annals of Operations
//! Research* 41, 421-451.

use rand::Rng;
use u_metaheur::sa::{CoolingSchedule, SaConfig, SaProblem, SaRunner};

use crate::models::CvrpProblem;

use super::{penalty_weight, CvrpConfig, Improvement, Partition, PartitionSearch, TimeBudget};

/// Floor for the starting temperature when the initial distance is zero.
const MIN_START_TEMPERATURE: f64 = 1e-6;

/// Simulated annealing search, run in rounds until the budget elapses.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_optimizer::cvrp::{AnnealingSearch, CvrpConfig, Partition, PartitionSearch, TimeBudget};
/// use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
/// use route_optimizer::distance::{DistanceMatrix, Metric};
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
/// let search = AnnealingSearch::from_config(&CvrpConfig::default().with_stall_rounds(5));
/// let start = Partition::new(vec![vec![1, 3], vec![2, 4]], vec![]);
/// let budget = TimeBudget::start(Duration::from_secs(2));
/// let out = search.improve(&problem, start, &budget);
/// assert!(out.partition.is_feasible(&problem));
/// assert!((out.partition.distance(&problem) - 8.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingSearch {
    seed: u64,
    round_iterations: usize,
    iterations_per_temperature: usize,
    initial_temperature_ratio: f64,
    min_temperature_ratio: f64,
    cooling_alpha: f64,
    stall_rounds: Option<usize>,
}

impl AnnealingSearch {
    /// Takes the annealing parameters from a validated configuration.
    pub fn from_config(config: &CvrpConfig) -> Self {
        Self {
            seed: config.seed,
            round_iterations: config.round_iterations,
            iterations_per_temperature: config.iterations_per_temperature,
            initial_temperature_ratio: config.initial_temperature_ratio,
            min_temperature_ratio: config.min_temperature_ratio,
            cooling_alpha: config.cooling_alpha,
            stall_rounds: config.stall_rounds,
        }
    }

    fn round_config(&self, temperature: f64, min_temperature: f64, round: usize) -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(temperature)
            .with_min_temperature(min_temperature)
            .with_cooling(CoolingSchedule::Geometric {
                alpha: self.cooling_alpha,
            })
            .with_iterations_per_temperature(self.iterations_per_temperature)
            .with_max_iterations(self.round_iterations)
            .with_seed(self.seed.wrapping_add(round as u64))
    }
}

impl Default for AnnealingSearch {
    fn default() -> Self {
        Self::from_config(&CvrpConfig::default())
    }
}

impl PartitionSearch for AnnealingSearch {
    fn name(&self) -> &'static str {
        "annealing"
    }

    fn improve(&self, problem: &CvrpProblem, start: Partition, budget: &TimeBudget) -> Improvement {
        let penalty = penalty_weight(problem);
        let start_temperature =
            (self.initial_temperature_ratio * start.distance(problem)).max(MIN_START_TEMPERATURE);
        let min_temperature = start_temperature * self.min_temperature_ratio;

        let mut best_cost = start.cost(problem, penalty);
        let mut best = start;
        let mut temperature = start_temperature;
        let mut rounds = 0;
        let mut stalled = 0;

        while !budget.is_exhausted() {
            let annealing = PartitionAnnealing {
                problem,
                incumbent: best.clone(),
                penalty,
            };
            let config = self.round_config(temperature, min_temperature, rounds);
            let result = SaRunner::run(&annealing, &config);
            rounds += 1;

            if result.best_cost < best_cost - 1e-10 {
                best_cost = result.best_cost;
                best = result.best;
                stalled = 0;
            } else {
                stalled += 1;
            }

            temperature = if result.final_temperature > min_temperature {
                result.final_temperature
            } else {
                start_temperature
            };
            log::debug!(
                "cvrp.improve: round={rounds} best={best_cost:.3} t={temperature:.5} accepted={} spent={:.2}",
                result.accepted_moves,
                budget.estimate()
            );

            if self.stall_rounds.is_some_and(|limit| stalled >= limit) {
                log::debug!(
                    "cvrp.improve: stalled after {rounds} rounds with {:?} left",
                    budget.remaining()
                );
                break;
            }
        }

        Improvement {
            partition: best,
            rounds,
        }
    }
}

/// One annealing round seen through the `SaProblem` interface.
struct PartitionAnnealing<'a> {
    problem: &'a CvrpProblem,
    incumbent: Partition,
    penalty: f64,
}

impl SaProblem for PartitionAnnealing<'_> {
    type Solution = Partition;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Partition {
        self.incumbent.clone()
    }

    fn cost(&self, solution: &Partition) -> f64 {
        solution.cost(self.problem, self.penalty)
    }

    fn neighbor<R: Rng>(&self, solution: &Partition, rng: &mut R) -> Partition {
        let mut next = solution.clone();
        random_move(next.routes_mut(), rng);
        next
    }
}

/// Applies one random relocate, swap or reversal.
fn random_move<R: Rng>(routes: &mut [Vec<usize>], rng: &mut R) {
    let used: Vec<usize> = (0..routes.len()).filter(|&r| !routes[r].is_empty()).collect();
    if used.is_empty() {
        return;
    }

    match rng.random_range(0..3) {
        0 => relocate(routes, &used, rng),
        1 if used.len() >= 2 => swap(routes, &used, rng),
        2 => {
            let long: Vec<usize> = used.iter().copied().filter(|&r| routes[r].len() >= 2).collect();
            if long.is_empty() {
                relocate(routes, &used, rng);
            } else {
                let r = long[rng.random_range(0..long.len())];
                let len = routes[r].len();
                let i = rng.random_range(0..len - 1);
                let j = rng.random_range(i + 1..len);
                routes[r][i..=j].reverse();
            }
        }
        _ => relocate(routes, &used, rng),
    }
}

fn relocate<R: Rng>(routes: &mut [Vec<usize>], used: &[usize], rng: &mut R) {
    let from = used[rng.random_range(0..used.len())];
    let pos = rng.random_range(0..routes[from].len());
    let stop = routes[from].remove(pos);
    let to = rng.random_range(0..routes.len());
    let at = rng.random_range(0..=routes[to].len());
    routes[to].insert(at, stop);
}

fn swap<R: Rng>(routes: &mut [Vec<usize>], used: &[usize], rng: &mut R) {
    let a = rng.random_range(0..used.len());
    let mut b = rng.random_range(0..used.len() - 1);
    if b >= a {
        b += 1;
    }
    let (ra, rb) = (used[a], used[b]);
    let pa = rng.random_range(0..routes[ra].len());
    let pb = rng.random_range(0..routes[rb].len());
    let stop = routes[ra][pa];
    routes[ra][pa] = routes[rb][pb];
    routes[rb][pb] = stop;
}
