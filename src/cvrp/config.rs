//! CVRP solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::distance::Metric;
use crate::error::{Error, Result};

/// Configuration for [`CvrpSolver`](super::CvrpSolver).
///
/// The annealing parameters are relative to the instance: the starting
/// temperature is `initial_temperature_ratio` times the distance of the
/// initial partition, and annealing reheats once the temperature falls to
/// `min_temperature_ratio` times that start.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_optimizer::cvrp::CvrpConfig;
///
/// let config = CvrpConfig::default()
///     .with_time_limit(Duration::from_millis(500))
///     .with_seed(7)
///     .with_stall_rounds(50);
/// assert!(config.validate().is_ok());
/// assert!(CvrpConfig::default().with_cooling_alpha(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvrpConfig {
    /// How stop pairs are measured when a matrix is built from stops.
    pub metric: Metric,

    /// Wall-clock budget for the improvement phase.
    pub time_limit: Duration,

    /// Base random seed; round `k` of the annealing search uses `seed + k`.
    pub seed: u64,

    /// Annealing iterations per round between budget checks.
    pub round_iterations: usize,

    /// Annealing iterations at each temperature level.
    pub iterations_per_temperature: usize,

    /// Starting temperature as a fraction of the initial distance.
    pub initial_temperature_ratio: f64,

    /// Reheat threshold as a fraction of the starting temperature, in (0, 1).
    pub min_temperature_ratio: f64,

    /// Geometric cooling factor, in (0, 1).
    pub cooling_alpha: f64,

    /// Stop early after this many rounds without a new best partition.
    pub stall_rounds: Option<usize>,

    /// Search nodes allowed when proving whether demands can be packed.
    pub packing_node_limit: usize,
}

impl Default for CvrpConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Geodesic,
            time_limit: Duration::from_secs(10),
            seed: 42,
            round_iterations: 2_000,
            iterations_per_temperature: 100,
            initial_temperature_ratio: 0.1,
            min_temperature_ratio: 1e-4,
            cooling_alpha: 0.95,
            stall_rounds: None,
            packing_node_limit: 200_000,
        }
    }
}

impl CvrpConfig {
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_round_iterations(mut self, n: usize) -> Self {
        self.round_iterations = n;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_initial_temperature_ratio(mut self, ratio: f64) -> Self {
        self.initial_temperature_ratio = ratio;
        self
    }

    pub fn with_min_temperature_ratio(mut self, ratio: f64) -> Self {
        self.min_temperature_ratio = ratio;
        self
    }

    pub fn with_cooling_alpha(mut self, alpha: f64) -> Self {
        self.cooling_alpha = alpha;
        self
    }

    pub fn with_stall_rounds(mut self, rounds: usize) -> Self {
        self.stall_rounds = Some(rounds);
        self
    }

    pub fn with_packing_node_limit(mut self, limit: usize) -> Self {
        self.packing_node_limit = limit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.round_iterations == 0 {
            return Err(Error::invalid_input("round_iterations must be positive"));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::invalid_input(
                "iterations_per_temperature must be positive",
            ));
        }
        if !(self.initial_temperature_ratio > 0.0 && self.initial_temperature_ratio.is_finite()) {
            return Err(Error::invalid_input(format!(
                "initial_temperature_ratio must be positive, got {}",
                self.initial_temperature_ratio
            )));
        }
        if !(self.min_temperature_ratio > 0.0 && self.min_temperature_ratio < 1.0) {
            return Err(Error::invalid_input(format!(
                "min_temperature_ratio must be in (0, 1), got {}",
                self.min_temperature_ratio
            )));
        }
        if !(self.cooling_alpha > 0.0 && self.cooling_alpha < 1.0) {
            return Err(Error::invalid_input(format!(
                "cooling_alpha must be in (0, 1), got {}",
                self.cooling_alpha
            )));
        }
        if self.stall_rounds == Some(0) {
            return Err(Error::invalid_input("stall_rounds must be positive"));
        }
        if self.packing_node_limit == 0 {
            return Err(Error::invalid_input("packing_node_limit must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CvrpConfig::default();
        assert_eq!(config.time_limit, Duration::from_secs(10));
        assert_eq!(config.metric, Metric::Geodesic);
        assert!(config.stall_rounds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_ratios() {
        assert!(CvrpConfig::default()
            .with_min_temperature_ratio(1.0)
            .validate()
            .is_err());
        assert!(CvrpConfig::default()
            .with_initial_temperature_ratio(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(CvrpConfig::default().with_round_iterations(0).validate().is_err());
        assert!(CvrpConfig::default().with_stall_rounds(0).validate().is_err());
        assert!(CvrpConfig::default()
            .with_packing_node_limit(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_message() {
        let err = CvrpConfig::default()
            .with_cooling_alpha(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: cooling_alpha must be in (0, 1), got 0"
        );
    }
}
