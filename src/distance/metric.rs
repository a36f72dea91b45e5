//! Distance metrics between coordinates.
//!
//! # Geodesic
//!
//! Inverse Vincenty formula on the WGS-84 ellipsoid, iterated until the
//! longitude on the auxiliary sphere changes by less than 1e-12 rad. Nearly
//! antipodal pairs may not converge; those fall back to the great-circle
//! distance on the mean Earth radius.
//!
//! # Reference
//!
//! Vincenty, T. (1975). "Direct and Inverse Solutions of Geodesics on the
//! Ellipsoid with application of nested equations", *Survey Review* 23(176),
//! 88-93.

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// WGS-84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS-84 semi-minor axis in metres.
const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// IUGG mean Earth radius in kilometres.
const MEAN_RADIUS_KM: f64 = 6_371.008_8;

const VINCENTY_MAX_ITER: usize = 200;
const VINCENTY_TOL: f64 = 1e-12;

/// How the distance between two stops is measured.
///
/// Geographic metrics return kilometres; [`Metric::Euclidean`] returns plain
/// coordinate units.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::Metric;
/// use route_optimizer::models::Coordinate;
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// let km = Metric::Geodesic.distance(a, b);
/// assert!((km - 111.319_490_793).abs() < 1e-6);
/// assert_eq!(Metric::Euclidean.distance(a, b), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Ellipsoidal distance on WGS-84.
    #[default]
    Geodesic,
    /// Great-circle distance on a sphere of mean Earth radius.
    Haversine,
    /// Planar distance treating (lat, lon) as (y, x).
    Euclidean,
}

impl Metric {
    /// Distance from `a` to `b`. Non-finite input yields NaN.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        match self {
            Self::Geodesic => vincenty_km(a, b).unwrap_or_else(|| haversine_km(a, b)),
            Self::Haversine => haversine_km(a, b),
            Self::Euclidean => {
                let dy = a.lat() - b.lat();
                let dx = a.lon() - b.lon();
                (dx * dx + dy * dy).sqrt()
            }
        }
    }
}

fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlon = (b.lon() - a.lon()).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    2.0 * MEAN_RADIUS_KM * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Returns `None` when the iteration does not converge.
fn vincenty_km(a: Coordinate, b: Coordinate) -> Option<f64> {
    let f = WGS84_F;
    let l = (b.lon() - a.lon()).to_radians();
    let u1 = ((1.0 - f) * a.lat().to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.lat().to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITER {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let t1 = cos_u2 * sin_lambda;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = (t1 * t1 + t2 * t2).sqrt();
        if sin_sigma == 0.0 {
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0.
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        if (lambda - previous).abs() < VINCENTY_TOL {
            let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let cos2 = cos_2sigma_m * cos_2sigma_m;
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos2)
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos2)));
            return Some(WGS84_B * big_a * (sigma - delta_sigma) / 1000.0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geodesic_one_degree_on_equator() {
        let d = Metric::Geodesic.distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        // a * pi / 180
        assert!((d - 111.319_490_793_273_6).abs() < 1e-6);
    }

    #[test]
    fn test_geodesic_one_degree_of_latitude() {
        let d = Metric::Geodesic.distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        // Meridian arc from the equator to 1°N on WGS-84.
        assert!((d - 110.574).abs() < 0.01);
    }

    #[test]
    fn test_geodesic_close_to_haversine_in_city() {
        // Two stops in Jabalpur, a few kilometres apart.
        let a = Coordinate::new(23.129_210_544, 79.874_867_496);
        let b = Coordinate::new(23.202_199_827, 79.883_045_057);
        let geo = Metric::Geodesic.distance(a, b);
        let hav = Metric::Haversine.distance(a, b);
        assert!(geo > 7.0 && geo < 9.0, "got {geo}");
        assert!((geo - hav).abs() / geo < 0.01);
    }

    #[test]
    fn test_identical_points_are_zero() {
        let a = Coordinate::new(23.15, 79.84);
        assert_eq!(Metric::Geodesic.distance(a, a), 0.0);
        assert_eq!(Metric::Haversine.distance(a, a), 0.0);
        assert_eq!(Metric::Euclidean.distance(a, a), 0.0);
    }

    #[test]
    fn test_antipodal_falls_back() {
        let d = Metric::Geodesic.distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.5, 179.7));
        assert!(d.is_finite());
        assert!(d > 19_000.0 && d < 20_100.0, "got {d}");
    }

    #[test]
    fn test_nan_propagates() {
        let d = Metric::Geodesic.distance(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 1.0));
        assert!(d.is_nan());
    }

    #[test]
    fn test_euclidean() {
        let d = Metric::Euclidean.distance(Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
