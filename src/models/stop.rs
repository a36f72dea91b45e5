//! Geographic coordinates and named stops.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_LAT: f64 = 90.0;
const MAX_LON: f64 = 180.0;

/// A `(latitude, longitude)` pair in decimal degrees.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Coordinate;
///
/// let c = Coordinate::new(23.1292, 79.8749);
/// assert_eq!(c.lat(), 23.1292);
/// assert!(c.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Creates a coordinate. Values are stored as given, without validation.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if both values are finite and within the usual ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-MAX_LAT..=MAX_LAT).contains(&self.lat)
            && (-MAX_LON..=MAX_LON).contains(&self.lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// A named stop: a resolved location plus the demand picked up there.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Stop;
///
/// let depot = Stop::new("Gyan Ganga", 23.1292, 79.8749);
/// assert_eq!(depot.demand(), 0);
///
/// let stop = Stop::new("IT Park", 23.1307, 79.8810).with_demand(20);
/// assert_eq!(stop.name(), "IT Park");
/// assert_eq!(stop.demand(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    name: String,
    coordinate: Coordinate,
    demand: u32,
}

impl Stop {
    /// Creates a stop with zero demand.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self::at(name, Coordinate::new(lat, lon))
    }

    /// Creates a stop at an existing coordinate with zero demand.
    pub fn at(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            demand: 0,
        }
    }

    /// Sets the demand served at this stop.
    pub fn with_demand(mut self, demand: u32) -> Self {
        self.demand = demand;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn demand(&self) -> u32 {
        self.demand
    }
}

/// Outcome of [`resolve_stops`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStops {
    /// Stops with a coordinate, in input order.
    pub stops: Vec<Stop>,
    /// Names whose coordinate could not be resolved.
    pub unresolved: Vec<String>,
    /// Names dropped because an earlier candidate had the same name.
    pub duplicates: Vec<String>,
}

/// Turns geocoder output into a stop list.
///
/// Candidates without a coordinate are reported in `unresolved` and never
/// reach the distance matrix. Names are compared case-insensitively; later
/// repeats of a name are reported in `duplicates` and skipped.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{resolve_stops, Coordinate};
///
/// let resolved = resolve_stops(vec![
///     ("Depot".to_string(), Some(Coordinate::new(23.12, 79.87)), 0),
///     ("Nowhere".to_string(), None, 5),
///     ("depot".to_string(), Some(Coordinate::new(23.13, 79.88)), 0),
/// ]);
/// assert_eq!(resolved.stops.len(), 1);
/// assert_eq!(resolved.unresolved, vec!["Nowhere".to_string()]);
/// assert_eq!(resolved.duplicates, vec!["depot".to_string()]);
/// ```
pub fn resolve_stops<I>(candidates: I) -> ResolvedStops
where
    I: IntoIterator<Item = (String, Option<Coordinate>, u32)>,
{
    let mut resolved = ResolvedStops::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (name, coordinate, demand) in candidates {
        let key = name.to_lowercase();
        if seen.contains(&key) {
            log::warn!("stops: skipping duplicate name {name:?}");
            resolved.duplicates.push(name);
            continue;
        }
        match coordinate {
            Some(c) => {
                seen.insert(key);
                resolved.stops.push(Stop::at(name, c).with_demand(demand));
            }
            None => {
                log::warn!("stops: no coordinate for {name:?}, excluded");
                resolved.unresolved.push(name);
            }
        }
    }

    resolved
}

/// Rejects stop lists in which two names match case-insensitively.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{check_unique_names, Stop};
///
/// let ok = [Stop::new("Depot", 0.0, 0.0), Stop::new("A", 0.0, 1.0)];
/// assert!(check_unique_names(&ok).is_ok());
///
/// let repeated = [Stop::new("Depot", 0.0, 0.0), Stop::new("depot", 0.0, 1.0)];
/// assert!(check_unique_names(&repeated).is_err());
/// ```
pub fn check_unique_names(stops: &[Stop]) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::with_capacity(stops.len());
    for (i, stop) in stops.iter().enumerate() {
        if !seen.insert(stop.name().to_lowercase()) {
            return Err(Error::invalid_input(format!(
                "duplicate stop name {:?} at index {i}",
                stop.name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let c: Coordinate = (12.5, -33.75).into();
        assert_eq!(c.lat(), 12.5);
        assert_eq!(c.lon(), -33.75);
    }

    #[test]
    fn test_stop_defaults() {
        let s = Stop::new("JNKVV", 23.2154, 79.9609);
        assert_eq!(s.name(), "JNKVV");
        assert_eq!(s.demand(), 0);
        assert_eq!(s.coordinate(), Coordinate::new(23.2154, 79.9609));
    }

    #[test]
    fn test_resolve_keeps_order() {
        let resolved = resolve_stops(vec![
            ("A".to_string(), Some(Coordinate::new(0.0, 0.0)), 0),
            ("B".to_string(), Some(Coordinate::new(0.0, 1.0)), 3),
            ("C".to_string(), Some(Coordinate::new(1.0, 1.0)), 4),
        ]);
        let names: Vec<&str> = resolved.stops.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(resolved.stops[2].demand(), 4);
        assert!(resolved.unresolved.is_empty());
        assert!(resolved.duplicates.is_empty());
    }

    #[test]
    fn test_unique_names_case_insensitive() {
        let stops = [
            Stop::new("Depot", 0.0, 0.0),
            Stop::new("Market", 0.0, 1.0),
            Stop::new("MARKET", 1.0, 1.0),
        ];
        let err = check_unique_names(&stops).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref m) if m.contains("index 2")));
        assert!(check_unique_names(&stops[..2]).is_ok());
        assert!(check_unique_names(&[]).is_ok());
    }

    #[test]
    fn test_unresolved_name_does_not_block_duplicate_check() {
        let resolved = resolve_stops(vec![
            ("A".to_string(), None, 0),
            ("a".to_string(), Some(Coordinate::new(0.0, 0.0)), 0),
        ]);
        assert_eq!(resolved.stops.len(), 1);
        assert_eq!(resolved.unresolved, vec!["A".to_string()]);
        assert!(resolved.duplicates.is_empty());
    }
}
