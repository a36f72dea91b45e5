//! Route type.

use serde::{Deserialize, Serialize};

use super::Stop;

/// An ordered sequence of stop indices driven by one vehicle.
///
/// For a closed TSP tour the first index is repeated at the end. For a
/// CVRP route the sequence starts and ends at the depot; an unused vehicle
/// has the two-element route `[depot, depot]`.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Route;
///
/// let route = Route::new(0, vec![2, 0, 1, 2], 7.5).with_load(30, 50);
/// assert_eq!(route.len(), 4);
/// assert_eq!(route.visited(), &[0, 1]);
/// assert_eq!(route.load(), 30);
/// assert!((route.utilization() - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<usize>,
    distance: f64,
    load: u64,
    capacity: Option<u32>,
}

impl Route {
    /// Creates a route with a precomputed distance and no load information.
    pub fn new(vehicle_id: usize, stops: Vec<usize>, distance: f64) -> Self {
        Self {
            vehicle_id,
            stops,
            distance,
            load: 0,
            capacity: None,
        }
    }

    /// Attaches the served demand and the vehicle capacity.
    pub fn with_load(mut self, load: u64, capacity: u32) -> Self {
        self.load = load;
        self.capacity = Some(capacity);
        self
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// The full index sequence, including start and end.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of entries in [`stops`](Self::stops).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The interior of the route: everything between the first and last entry.
    pub fn visited(&self) -> &[usize] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Returns `true` if the vehicle leaves the depot at all.
    pub fn is_used(&self) -> bool {
        !self.visited().is_empty()
    }

    /// Total distance along the route in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total demand served by this route.
    pub fn load(&self) -> u64 {
        self.load
    }

    /// Capacity of the vehicle driving this route, if known.
    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    /// Served demand as a fraction of capacity (0 when unknown or zero).
    pub fn utilization(&self) -> f64 {
        match self.capacity {
            Some(c) if c > 0 => self.load as f64 / f64::from(c),
            _ => 0.0,
        }
    }

    /// Stop names in route order.
    ///
    /// Indices outside `stops` are skipped.
    pub fn names<'a>(&self, stops: &'a [Stop]) -> Vec<&'a str> {
        self.stops
            .iter()
            .filter_map(|&i| stops.get(i).map(Stop::name))
            .collect()
    }
}
