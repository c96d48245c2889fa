//! Box-zoom selection: samples inside a rectangle to a time range.

use crate::Sample;
use serde::{Deserialize, Serialize};
use trackmap_geo::Bounds;

/// Inclusive time range in epoch milliseconds, as sent to the host's
/// time picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    /// Range covering a single instant.
    pub fn instant(timestamp: i64) -> Self {
        Self {
            from: timestamp,
            to: timestamp,
        }
    }

    /// Smallest range covering both.
    pub fn merge(self, other: TimeRange) -> Self {
        Self {
            from: self.from.min(other.from),
            to: self.to.max(other.to),
        }
    }

    /// Length of the range in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.to.saturating_sub(self.from)
    }
}

/// Earliest and latest timestamp among samples inside `bounds`.
///
/// Synthetic meridian points count like any other sample. Returns `None`
/// when nothing is inside, in which case no time-range update is sent.
///
/// # Example
/// ```
/// use trackmap_track::{time_range_in_bounds, Sample, TimeRange};
/// use trackmap_geo::{Bounds, Position};
///
/// let at = |lat: f64, lng: f64, timestamp: i64| Sample {
///     position: Position::new(lat, lng),
///     timestamp,
///     heading: 0.0,
///     wind: 0.0,
///     anchor: None,
///     synthetic: false,
/// };
/// let samples = [at(1.0, 1.0, 100), at(5.0, 5.0, 200), at(9.0, 9.0, 300)];
/// let bounds = Bounds::new(Position::new(4.0, 4.0), Position::new(6.0, 6.0));
///
/// assert_eq!(time_range_in_bounds(&samples, &bounds), Some(TimeRange { from: 200, to: 200 }));
/// ```
pub fn time_range_in_bounds(samples: &[Sample], bounds: &Bounds) -> Option<TimeRange> {
    let inside = |sample: &Sample| {
        bounds
            .contains(&sample.position)
            .then(|| TimeRange::instant(sample.timestamp))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        samples
            .par_iter()
            .filter_map(inside)
            .reduce_with(TimeRange::merge)
    }

    #[cfg(not(feature = "parallel"))]
    {
        samples.iter().filter_map(inside).reduce(TimeRange::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trackmap_geo::Position;

    fn sample(lat: f64, lng: f64, timestamp: i64) -> Sample {
        Sample {
            position: Position::new(lat, lng),
            timestamp,
            heading: 0.0,
            wind: 0.0,
            anchor: None,
            synthetic: false,
        }
    }

    fn track() -> Vec<Sample> {
        vec![
            sample(10.0, 10.0, 100),
            sample(20.0, 20.0, 200),
            sample(30.0, 30.0, 300),
        ]
    }

    fn rect(south: f64, west: f64, north: f64, east: f64) -> Bounds {
        Bounds::new(Position::new(south, west), Position::new(north, east))
    }

    #[test]
    fn test_single_sample_selected() {
        let range = time_range_in_bounds(&track(), &rect(15.0, 15.0, 25.0, 25.0));
        assert_eq!(range, Some(TimeRange { from: 200, to: 200 }));
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(time_range_in_bounds(&track(), &rect(-5.0, -5.0, 5.0, 5.0)), None);
        assert_eq!(time_range_in_bounds(&[], &rect(-90.0, -180.0, 90.0, 180.0)), None);
    }

    #[test]
    fn test_span_of_selection() {
        let range = time_range_in_bounds(&track(), &rect(0.0, 0.0, 25.0, 25.0)).unwrap();
        assert_eq!(range, TimeRange { from: 100, to: 200 });
        assert_eq!(range.duration_ms(), 100);
    }

    #[test]
    fn test_duration_saturates() {
        let range = TimeRange {
            from: i64::MIN,
            to: i64::MAX,
        };
        assert_eq!(range.duration_ms(), i64::MAX);
        assert_eq!(TimeRange::instant(42).duration_ms(), 0);
    }

    #[test]
    fn test_edges_are_inclusive() {
        let range = time_range_in_bounds(&track(), &rect(20.0, 20.0, 30.0, 30.0));
        assert_eq!(range, Some(TimeRange { from: 200, to: 300 }));
    }

    #[test]
    fn test_synthetic_points_count() {
        let mut samples = track();
        samples.push(Sample {
            synthetic: true,
            ..sample(30.0, 180.0, 350)
        });
        let range = time_range_in_bounds(&samples, &rect(25.0, 170.0, 35.0, 180.0));
        assert_eq!(range, Some(TimeRange::instant(350)));
    }

    proptest! {
        #[test]
        fn prop_matches_sequential_scan(
            points in proptest::collection::vec((-80.0f64..80.0, -170.0f64..170.0, 0i64..10_000), 0..100),
            lat in -80.0f64..80.0,
            lng in -170.0f64..170.0,
        ) {
            let samples: Vec<_> = points.iter().map(|&(la, lo, t)| sample(la, lo, t)).collect();
            let bounds = rect(lat - 10.0, lng - 10.0, lat + 10.0, lng + 10.0);

            let inside: Vec<i64> = samples
                .iter()
                .filter(|s| bounds.contains(&s.position))
                .map(|s| s.timestamp)
                .collect();
            let expected = match (inside.iter().min(), inside.iter().max()) {
                (Some(&from), Some(&to)) => Some(TimeRange { from, to }),
                _ => None,
            };

            prop_assert_eq!(time_range_in_bounds(&samples, &bounds), expected);
        }
    }
}
