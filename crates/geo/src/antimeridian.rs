//! Antimeridian crossing detection and splitting.
//!
//! A straight polyline between 170° and -170° is drawn by map widgets across
//! the whole world instead of the 20° hop over the ±180° meridian. Splitting
//! such a leg at the meridian yields two short lines that render correctly.

use crate::Position;

/// Returns true when the leg between `a` and `b` crosses the antimeridian,
/// i.e. when the longitudes differ by more than 180°.
///
/// The check is symmetric in its arguments.
#[inline]
pub fn crosses_antimeridian(a: &Position, b: &Position) -> bool {
    (a.longitude - b.longitude).abs() > 180.0
}

/// Computes where the leg from `start` to `end` touches the antimeridian.
///
/// Returns `None` if the leg does not cross it. Otherwise returns two points
/// on the meridian at the same latitude: the first on `start`'s side
/// (`+180` for an eastern start, `-180` for a western one), the second on
/// `end`'s side. The latitude is interpolated in proportion to how far each
/// endpoint is from its own edge of the map.
///
/// # Example
/// ```
/// use trackmap_geo::{antimeridian_crossing, Position};
///
/// let (first, second) =
///     antimeridian_crossing(&Position::new(-20.0, -175.0), &Position::new(-10.0, 175.0)).unwrap();
/// assert_eq!((first.longitude, second.longitude), (-180.0, 180.0));
/// assert!((first.latitude - -15.0).abs() < 1e-9);
/// ```
pub fn antimeridian_crossing(start: &Position, end: &Position) -> Option<(Position, Position)> {
    if !crosses_antimeridian(start, end) {
        return None;
    }

    let start_gap = distance_to_edge(start.longitude);
    let end_gap = distance_to_edge(end.longitude);
    let total = start_gap + end_gap;

    let latitude = if total > 0.0 {
        start.latitude + (end.latitude - start.latitude) * (start_gap / total)
    } else {
        (start.latitude + end.latitude) / 2.0
    };

    Some((
        Position::new(latitude, edge_for(start.longitude)),
        Position::new(latitude, edge_for(end.longitude)),
    ))
}

/// Degrees of longitude between `longitude` and the edge of the map on its side.
#[inline]
fn distance_to_edge(longitude: f64) -> f64 {
    if longitude > 0.0 {
        180.0 - longitude
    } else {
        180.0 + longitude
    }
}

#[inline]
fn edge_for(longitude: f64) -> f64 {
    if longitude > 0.0 { 180.0 } else { -180.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_crossing_for_short_leg() {
        let a = Position::new(10.0, 20.0);
        let b = Position::new(10.0, 170.0);
        assert!(!crosses_antimeridian(&a, &b));
        assert!(antimeridian_crossing(&a, &b).is_none());
    }

    #[test]
    fn test_exactly_180_apart_is_not_a_crossing() {
        let a = Position::new(0.0, -90.0);
        let b = Position::new(0.0, 90.0);
        assert!(!crosses_antimeridian(&a, &b));
    }

    #[test]
    fn test_eastbound_crossing() {
        let (first, second) =
            antimeridian_crossing(&Position::new(10.0, 170.0), &Position::new(10.0, -170.0))
                .unwrap();
        assert_eq!(first, Position::new(10.0, 180.0));
        assert_eq!(second, Position::new(10.0, -180.0));
    }

    #[test]
    fn test_latitude_interpolation_uneven_gaps() {
        // 5° from the edge on the start side, 15° on the end side
        let (first, _) =
            antimeridian_crossing(&Position::new(0.0, 175.0), &Position::new(40.0, -165.0))
                .unwrap();
        assert!((first.latitude - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_latitude_interpolation_descending() {
        let (first, second) =
            antimeridian_crossing(&Position::new(20.0, 170.0), &Position::new(10.0, -170.0))
                .unwrap();
        assert!((first.latitude - 15.0).abs() < 1e-9);
        assert_eq!(first.latitude, second.latitude);
    }

    #[test]
    fn test_both_endpoints_on_the_meridian() {
        let (first, second) =
            antimeridian_crossing(&Position::new(4.0, 180.0), &Position::new(8.0, -180.0))
                .unwrap();
        assert_eq!(first, Position::new(6.0, 180.0));
        assert_eq!(second, Position::new(6.0, -180.0));
    }

    proptest! {
        #[test]
        fn prop_crossing_is_symmetric(
            lat_a in -90.0f64..90.0, lng_a in -180.0f64..=180.0,
            lat_b in -90.0f64..90.0, lng_b in -180.0f64..=180.0,
        ) {
            let a = Position::new(lat_a, lng_a);
            let b = Position::new(lat_b, lng_b);
            prop_assert_eq!(crosses_antimeridian(&a, &b), crosses_antimeridian(&b, &a));
            prop_assert_eq!(crosses_antimeridian(&a, &b), (lng_a - lng_b).abs() > 180.0);
        }

        #[test]
        fn prop_split_points_sit_on_opposite_edges(
            lat_a in -90.0f64..90.0, lng_a in 0.001f64..=180.0,
            lat_b in -90.0f64..90.0, lng_b in -180.0f64..=-0.001,
        ) {
            let a = Position::new(lat_a, lng_a);
            let b = Position::new(lat_b, lng_b);
            if let Some((first, second)) = antimeridian_crossing(&a, &b) {
                prop_assert_eq!(first.longitude, 180.0);
                prop_assert_eq!(second.longitude, -180.0);
                prop_assert_eq!(first.latitude, second.latitude);
                let (lo, hi) = if lat_a < lat_b { (lat_a, lat_b) } else { (lat_b, lat_a) };
                prop_assert!(first.latitude >= lo - 1e-9 && first.latitude <= hi + 1e-9);
            } else {
                prop_assert!((lng_a - lng_b).abs() <= 180.0);
            }
        }
    }
}
