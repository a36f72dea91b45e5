//! Domain model types for route optimization.
//!
//! Provides the core abstractions: named stops at geographic coordinates,
//! vehicles with capacity limits, routes as ordered stop-index sequences,
//! the solutions returned by both solvers, and the capacitated problem
//! instance.

mod problem;
mod route;
mod solution;
mod stop;
mod vehicle;

pub use problem::CvrpProblem;
pub use route::Route;
pub use solution::{CvrpSolution, TspSolution, Violation, ViolationType};
pub use stop::{check_unique_names, resolve_stops, Coordinate, ResolvedStops, Stop};
pub use vehicle::Vehicle;
