//! Distance model.
//!
//! Provides the metrics used to measure stop pairs and the dense distance
//! matrix consumed by both solvers.

mod matrix;
mod metric;

pub use matrix::DistanceMatrix;
pub use metric::Metric;

use crate::models::Stop;

/// Builds the geodesic distance matrix (kilometres) for a stop list.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Stop;
/// use route_optimizer::distance::build_distance_matrix;
///
/// let dm = build_distance_matrix(&[
///     Stop::new("Equator", 0.0, 0.0),
///     Stop::new("East", 0.0, 1.0),
/// ]);
/// assert!((dm.get(0, 1) - 111.319).abs() < 1e-3);
/// assert_eq!(dm.get(1, 0), dm.get(0, 1));
/// ```
pub fn build_distance_matrix(stops: &[Stop]) -> DistanceMatrix {
    DistanceMatrix::from_stops(stops, Metric::Geodesic)
}
