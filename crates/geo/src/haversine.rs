//! Spherical-earth distance and forward geodesy.
//!
//! Distances use the haversine formula on a sphere. `destination` solves the
//! direct problem (origin + bearing + distance) on the same sphere, which is
//! accurate enough for drawing short indicator lines on a map.

use crate::{normalize_longitude, Position};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 equatorial radius in meters, used by `destination`.
pub const WGS84_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Calculates the great-circle distance between two positions in kilometers.
///
/// # Example
/// ```
/// use trackmap_geo::{haversine_distance, Position};
///
/// let oslo = Position::new(59.9139, 10.7522);
/// let bergen = Position::new(60.3913, 5.3221);
///
/// let distance = haversine_distance(&oslo, &bergen);
/// assert!((distance - 305.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Position, to: &Position) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two positions in meters.
#[inline]
pub fn haversine_distance_meters(from: &Position, to: &Position) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Position, to: &Position, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Computes the point reached by travelling `distance_m` meters from `origin`
/// along the initial compass `bearing_deg` (0 = north, 90 = east).
///
/// The bearing may be any value; it is wrapped into [0, 360). The resulting
/// longitude is wrapped into [-180, 180].
///
/// # Example
/// ```
/// use trackmap_geo::{destination, Position};
///
/// // A quarter of the way around the equator, heading east.
/// let quarter = std::f64::consts::FRAC_PI_2 * trackmap_geo::WGS84_EQUATORIAL_RADIUS_M;
/// let end = destination(&Position::new(0.0, 0.0), 90.0, quarter);
/// assert!(end.latitude.abs() < 1e-6);
/// assert!((end.longitude - 90.0).abs() < 1e-6);
/// ```
pub fn destination(origin: &Position, bearing_deg: f64, distance_m: f64) -> Position {
    let bearing = bearing_deg.rem_euclid(360.0).to_radians();
    let (lat1, lon1) = origin.to_radians();
    let angular = distance_m / WGS84_EQUATORIAL_RADIUS_M;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_dist, cos_dist) = angular.sin_cos();

    let lat2 = (sin_lat1 * cos_dist + cos_lat1 * sin_dist * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * sin_dist * cos_lat1).atan2(cos_dist - sin_lat1 * lat2.sin());

    Position::new(lat2.to_degrees(), normalize_longitude(lon2.to_degrees()))
}
