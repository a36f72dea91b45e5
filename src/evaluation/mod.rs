//! Route summary and feasibility checking.
//!
//! - [`route_length`]: the objective shared by both solvers
//! - [`RouteEvaluator`]: builds depot-anchored routes with load and distance
//! - [`check_solution`]: lists every broken routing invariant

mod evaluator;

pub use evaluator::{check_solution, route_length, RouteEvaluator};
pub(crate) use evaluator::sum_edges;
