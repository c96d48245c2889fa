//! Geometry primitives for vessel track maps.
//!
//! This crate provides:
//! - A `Position` type with the "no fix" sentinel check
//! - Haversine distance and forward geodesy (`destination`)
//! - Antimeridian crossing detection and splitting
//! - Inclusive lat/lng bounding boxes
//! - Anchor payload parsing
//!
//! # Example
//!
//! ```
//! use trackmap_geo::{antimeridian_crossing, Position};
//!
//! let before = Position::new(10.0, 170.0);
//! let after = Position::new(20.0, -170.0);
//!
//! let (west_edge, east_edge) = antimeridian_crossing(&before, &after).unwrap();
//! assert_eq!(west_edge.longitude, 180.0);
//! assert_eq!(east_edge.longitude, -180.0);
//! assert!((west_edge.latitude - 15.0).abs() < 1e-9);
//! ```

mod anchor;
mod antimeridian;
mod bounds;
mod error;
mod haversine;

pub use anchor::{parse_anchor, parse_anchor_str};
pub use antimeridian::{antimeridian_crossing, crosses_antimeridian};
pub use bounds::Bounds;
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{
    destination, haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M,
    WGS84_EQUATORIAL_RADIUS_M,
};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a position, rejecting non-finite or out-of-range values.
    ///
    /// The longitude is wrapped into [-180, 180] before validation.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let position = Self::new(latitude, longitude).normalized();
        if position.is_valid() {
            Ok(position)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({}, {})",
                latitude, longitude
            )))
        }
    }

    /// Returns true if both components are finite and in range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns true for exactly (0, 0), which GPS sources emit when they have no fix.
    #[inline]
    pub fn is_null_island(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Returns a copy with the longitude wrapped into [-180, 180].
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::new(self.latitude, normalize_longitude(self.longitude))
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Position {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Wraps a longitude into [-180, 180].
///
/// Values already in range (including both edges) are returned unchanged.
#[inline]
pub fn normalize_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 + k*360 onto -180; keep the sign of the input edge
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}
