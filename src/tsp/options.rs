use serde::{Deserialize, Serialize};

use crate::distance::Metric;

/// Settings for the single-vehicle solver.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::Metric;
/// use route_optimizer::tsp::TspOptions;
///
/// let opts = TspOptions::default()
///     .with_metric(Metric::Haversine)
///     .with_return_to_start(false);
/// assert_eq!(opts.metric, Metric::Haversine);
/// assert!(!opts.return_to_start);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TspOptions {
    /// How stop pairs are measured when a matrix is built from stops.
    pub metric: Metric,

    /// Close the tour by repeating the start stop at the end.
    ///
    /// When `false` the result is an open path and 2-opt may move the
    /// final stop.
    pub return_to_start: bool,
}

impl Default for TspOptions {
    fn default() -> Self {
        Self {
            metric: Metric::Geodesic,
            return_to_start: true,
        }
    }
}

impl TspOptions {
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_return_to_start(mut self, return_to_start: bool) -> Self {
        self.return_to_start = return_to_start;
        self
    }
}
