//! Vehicle type with a load capacity.

use serde::{Deserialize, Serialize};

/// A vehicle that serves one depot-anchored route.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Vehicle;
///
/// let v = Vehicle::new(0, 50);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 50);
///
/// let fleet = Vehicle::fleet(3, 25);
/// assert_eq!(fleet.len(), 3);
/// assert_eq!(fleet[2].id(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: u32,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: u32) -> Self {
        Self { id, capacity }
    }

    /// Creates `count` identical vehicles numbered `0..count`.
    pub fn fleet(count: usize, capacity: u32) -> Vec<Self> {
        (0..count).map(|id| Self::new(id, capacity)).collect()
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum total demand this vehicle may serve.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(4, 100);
        assert_eq!(v.id(), 4);
        assert_eq!(v.capacity(), 100);
    }

    #[test]
    fn test_fleet_is_homogeneous() {
        let fleet = Vehicle::fleet(2, 25);
        assert_eq!(fleet, vec![Vehicle::new(0, 25), Vehicle::new(1, 25)]);
        assert!(Vehicle::fleet(0, 25).is_empty());
    }
}
