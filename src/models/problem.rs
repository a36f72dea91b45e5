//! Capacitated routing problem instance.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Infeasibility, Result};

use super::{Stop, Vehicle};

/// A validated CVRP instance: distances, demands, fleet and depot.
///
/// The depot's demand is always treated as zero.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
/// use route_optimizer::distance::{DistanceMatrix, Metric};
///
/// let stops = vec![
///     Stop::new("Depot", 0.0, 0.0),
///     Stop::new("A", 0.0, 1.0).with_demand(10),
///     Stop::new("B", 1.0, 0.0).with_demand(15),
/// ];
/// let matrix = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
/// let problem = CvrpProblem::from_stops(&stops, matrix, Vehicle::fleet(2, 20), 0).unwrap();
/// assert_eq!(problem.customers(), vec![1, 2]);
/// assert_eq!(problem.total_demand(), 25);
/// assert!(problem.check_capacity().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CvrpProblem {
    matrix: DistanceMatrix,
    demands: Vec<u32>,
    vehicles: Vec<Vehicle>,
    depot: usize,
}

impl CvrpProblem {
    /// Creates an instance, validating shapes.
    ///
    /// Fails with [`Error::InvalidInput`] when `demands` does not match the
    /// matrix, the depot index is out of range or a vehicle has no capacity.
    pub fn new(
        matrix: DistanceMatrix,
        demands: Vec<u32>,
        vehicles: Vec<Vehicle>,
        depot: usize,
    ) -> Result<Self> {
        let n = matrix.size();
        if demands.len() != n {
            return Err(Error::invalid_input(format!(
                "{} demands given for {n} stops",
                demands.len()
            )));
        }
        if depot >= n {
            return Err(Error::invalid_input(format!(
                "depot index {depot} out of range for {n} stops"
            )));
        }
        if let Some(v) = vehicles.iter().find(|v| v.capacity() == 0) {
            return Err(Error::invalid_input(format!(
                "vehicle {} has zero capacity",
                v.id()
            )));
        }

        let mut demands = demands;
        if demands[depot] != 0 {
            log::warn!(
                "cvrp: ignoring demand {} at depot {depot}",
                demands[depot]
            );
            demands[depot] = 0;
        }

        Ok(Self {
            matrix,
            demands,
            vehicles,
            depot,
        })
    }

    /// Creates an instance taking demands from the stops themselves.
    pub fn from_stops(
        stops: &[Stop],
        matrix: DistanceMatrix,
        vehicles: Vec<Vehicle>,
        depot: usize,
    ) -> Result<Self> {
        let demands = stops.iter().map(Stop::demand).collect();
        Self::new(matrix, demands, vehicles, depot)
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Travel distance from location `from` to location `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix.get(from, to)
    }

    pub fn demands(&self) -> &[u32] {
        &self.demands
    }

    pub fn demand(&self, stop: usize) -> u64 {
        u64::from(self.demands[stop])
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn capacity(&self, vehicle: usize) -> u64 {
        u64::from(self.vehicles[vehicle].capacity())
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of locations including the depot.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// All non-depot stop indices in ascending order.
    pub fn customers(&self) -> Vec<usize> {
        (0..self.size()).filter(|&i| i != self.depot).collect()
    }

    /// Total non-depot demand.
    pub fn total_demand(&self) -> u64 {
        self.demands.iter().map(|&d| u64::from(d)).sum()
    }

    /// Total fleet capacity.
    pub fn total_capacity(&self) -> u64 {
        self.vehicles.iter().map(|v| u64::from(v.capacity())).sum()
    }

    /// Rejects instances no assignment could ever satisfy.
    ///
    /// Passing this check does not guarantee a feasible packing exists; it
    /// only rules out the cases that can be recognised without search.
    pub fn check_capacity(&self) -> std::result::Result<(), Infeasibility> {
        let customers = self.customers();
        if customers.is_empty() {
            return Ok(());
        }
        if self.vehicles.is_empty() {
            return Err(Infeasibility::NoVehicles);
        }

        let max_capacity = self
            .vehicles
            .iter()
            .map(|v| u64::from(v.capacity()))
            .max()
            .unwrap_or(0);
        for &stop in &customers {
            let demand = self.demand(stop);
            if demand > max_capacity {
                return Err(Infeasibility::StopExceedsCapacity {
                    stop,
                    demand,
                    max_capacity,
                });
            }
        }

        let demand = self.total_demand();
        let capacity = self.total_capacity();
        if demand > capacity {
            return Err(Infeasibility::DemandExceedsFleet { demand, capacity });
        }
        Ok(())
    }
}
