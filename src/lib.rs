//! # route-optimizer
//!
//! Route optimization over named geographic stops: a single-vehicle tour
//! (greedy construction + 2-opt) and a time-bounded capacitated
//! multi-vehicle partition anchored at a shared depot.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Stop, Vehicle, Route, solutions, CvrpProblem)
//! - [`distance`]: Geodesic and Euclidean distance matrices
//! - [`evaluation`]: Route length and solution feasibility checking
//! - [`constructive`]: Nearest-neighbor tours, cheapest insertion, exact demand packing
//! - [`local_search`]: 2-opt, relocate and swap
//! - [`tsp`]: Single-vehicle solver
//! - [`cvrp`]: Multi-vehicle solver with pluggable search
//!
//! ## Quick start
//!
//! ```
//! use route_optimizer::models::Stop;
//! use route_optimizer::solve_tsp;
//!
//! let stops = vec![
//!     Stop::new("Home", 23.18, 79.95),
//!     Stop::new("Office", 23.17, 79.93),
//!     Stop::new("Gym", 23.16, 79.94),
//! ];
//! let tour = solve_tsp(&stops).unwrap();
//! assert_eq!(tour.order().first(), Some(&0));
//! assert_eq!(tour.order().last(), Some(&0));
//! assert_eq!(tour.order().len(), 4);
//! ```

pub mod constructive;
pub mod cvrp;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod tsp;

pub use cvrp::solve_cvrp;
pub use distance::build_distance_matrix;
pub use error::{Error, Infeasibility, Result};
pub use tsp::solve_tsp;
