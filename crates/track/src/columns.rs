//! Host data frames and row validation.
//!
//! The dashboard host delivers one series per queried column, each a list of
//! `[value, timestampMillis]` pairs. The series are expected in a fixed order:
//! latitude, longitude, heading, wind and, when the panel shows an anchor,
//! the anchor position payload.

use crate::{Result, TrackError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use trackmap_geo::{parse_anchor, Position};

/// Series count without the optional anchor column.
pub const REQUIRED_SERIES: usize = 4;

/// One `[value, timestampMillis]` pair as sent by the host.
///
/// The timestamp accepts any JSON number and is rounded to whole milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint(
    pub Option<Value>,
    #[serde(deserialize_with = "deserialize_timestamp")] pub i64,
);

impl Datapoint {
    /// Creates a datapoint with a numeric value.
    pub fn number(value: f64, timestamp: i64) -> Self {
        Self(Some(Value::from(value)), timestamp)
    }

    /// Creates a datapoint with a missing value.
    pub fn null(timestamp: i64) -> Self {
        Self(None, timestamp)
    }

    /// The raw value, if present.
    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref().filter(|v| !v.is_null())
    }

    /// Timestamp in epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.1
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = f64::deserialize(deserializer)?;
    if !millis.is_finite() {
        return Err(serde::de::Error::custom("timestamp must be a finite number"));
    }
    let millis = millis.round();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if !(i64::MIN as f64..i64::MAX as f64).contains(&millis) {
        return Err(serde::de::Error::custom(format!(
            "timestamp {millis} is outside the representable range"
        )));
    }
    Ok(millis as i64)
}

/// A named time series from the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Display name of the query target
    #[serde(default)]
    pub target: String,
    /// Ordered `[value, timestamp]` pairs
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

impl Series {
    /// Creates a series from its target name and datapoints.
    pub fn new(target: impl Into<String>, datapoints: Vec<Datapoint>) -> Self {
        Self {
            target: target.into(),
            datapoints,
        }
    }
}

/// Why a row was left out of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A required column has a null value
    MissingValue,
    /// A numeric column holds a non-numeric or non-finite value
    InvalidValue,
    /// Column timestamps disagree for the row
    TimestampMismatch,
    /// Position is the (0, 0) "no fix" sentinel
    NoFix,
    /// Latitude outside [-90, 90]
    OutOfRange,
    /// Anchor payload missing or malformed
    InvalidAnchor,
    /// Timestamp earlier than the previous sample
    OutOfOrder,
}

/// A validated row, ready to become a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Epoch milliseconds shared by every column
    pub timestamp: i64,
    /// Position with the longitude wrapped into [-180, 180]
    pub position: Position,
    /// Heading in radians
    pub heading: f64,
    /// Wind direction in radians
    pub wind: f64,
    /// Anchor position when the anchor column is in use
    pub anchor: Option<Position>,
}

/// Row-aligned view over the host's series.
#[derive(Debug, Clone, Copy)]
pub struct Columns<'a> {
    latitude: &'a Series,
    longitude: &'a Series,
    heading: &'a Series,
    wind: &'a Series,
    anchor: Option<&'a Series>,
}

impl<'a> Columns<'a> {
    /// Assigns series to columns by position.
    ///
    /// With `with_anchor` exactly five series are expected, otherwise four.
    /// All series must have the same number of datapoints. Breaking either
    /// rule is a misuse of the interface and fails loudly.
    pub fn from_series(series: &'a [Series], with_anchor: bool) -> Result<Self> {
        let expected = REQUIRED_SERIES + usize::from(with_anchor);
        let [latitude, longitude, heading, wind, rest @ ..] = series else {
            return Err(TrackError::SeriesCount {
                expected,
                actual: series.len(),
            });
        };
        if series.len() != expected {
            return Err(TrackError::SeriesCount {
                expected,
                actual: series.len(),
            });
        }

        let columns = Self {
            latitude,
            longitude,
            heading,
            wind,
            anchor: rest.first(),
        };
        columns.check_lengths()?;
        Ok(columns)
    }

    fn check_lengths(&self) -> Result<()> {
        let expected = self.latitude.datapoints.len();
        for series in self.all() {
            if series.datapoints.len() != expected {
                return Err(TrackError::LengthMismatch {
                    series: series.target.clone(),
                    expected,
                    actual: series.datapoints.len(),
                });
            }
        }
        Ok(())
    }

    fn all(&self) -> impl Iterator<Item = &'a Series> {
        [self.latitude, self.longitude, self.heading, self.wind]
            .into_iter()
            .chain(self.anchor)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.latitude.datapoints.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the anchor column is in use.
    pub fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// Validates row `index`. The row is accepted or rejected as a whole.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn row(&self, index: usize) -> std::result::Result<Row, SkipReason> {
        let lat = &self.latitude.datapoints[index];
        let lng = &self.longitude.datapoints[index];
        let heading = &self.heading.datapoints[index];
        let wind = &self.wind.datapoints[index];
        let anchor = self.anchor.map(|s| &s.datapoints[index]);

        let latitude = number(lat)?;
        let longitude = number(lng)?;
        let heading_value = number(heading)?;
        let wind_value = number(wind)?;
        if let Some(point) = anchor {
            if point.value().is_none() {
                return Err(SkipReason::MissingValue);
            }
        }

        let timestamp = lat.timestamp();
        let aligned = self
            .all()
            .all(|series| series.datapoints[index].timestamp() == timestamp);
        if !aligned {
            return Err(SkipReason::TimestampMismatch);
        }

        let position = Position::new(latitude, longitude).normalized();
        if position.is_null_island() {
            return Err(SkipReason::NoFix);
        }
        if !position.is_valid() {
            return Err(SkipReason::OutOfRange);
        }

        let anchor = match anchor {
            Some(point) => Some(
                point
                    .value()
                    .and_then(parse_anchor)
                    .ok_or(SkipReason::InvalidAnchor)?,
            ),
            None => None,
        };

        Ok(Row {
            timestamp,
            position,
            heading: heading_value,
            wind: wind_value,
            anchor,
        })
    }
}

fn number(point: &Datapoint) -> std::result::Result<f64, SkipReason> {
    let value = point.value().ok_or(SkipReason::MissingValue)?;
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or(SkipReason::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(target: &str, values: &[(Option<f64>, i64)]) -> Series {
        Series::new(
            target,
            values
                .iter()
                .map(|&(v, t)| match v {
                    Some(v) => Datapoint::number(v, t),
                    None => Datapoint::null(t),
                })
                .collect(),
        )
    }

    fn anchor_series(values: &[(Value, i64)]) -> Series {
        Series::new(
            "anchor",
            values
                .iter()
                .map(|(v, t)| Datapoint(Some(v.clone()), *t))
                .collect(),
        )
    }

    fn frame(lat: Option<f64>, lng: Option<f64>) -> Vec<Series> {
        vec![
            series("lat", &[(lat, 1000)]),
            series("lon", &[(lng, 1000)]),
            series("heading", &[(Some(0.5), 1000)]),
            series("wind", &[(Some(1.5), 1000)]),
        ]
    }

    #[test]
    fn test_deserialize_host_frame() {
        let raw = json!([
            {"target": "lat", "datapoints": [[59.9, 1700000000000u64], [null, 1700000001000.0]]},
            {"target": "lon", "datapoints": [[10.7, 1700000000000u64], [10.8, 1700000001000u64]]}
        ]);
        let parsed: Vec<Series> = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].datapoints[0].timestamp(), 1_700_000_000_000);
        assert_eq!(parsed[0].datapoints[1].timestamp(), 1_700_000_001_000);
        assert!(parsed[0].datapoints[1].value().is_none());
    }

    #[test]
    fn test_unrepresentable_timestamp_rejected() {
        let err = serde_json::from_value::<Datapoint>(json!([1.0, 1e20])).unwrap_err();
        assert!(err.to_string().contains("outside the representable range"));
        assert!(serde_json::from_value::<Datapoint>(json!([1.0, -1e20])).is_err());

        let point: Datapoint = serde_json::from_value(json!([1.0, -9.0e18])).unwrap();
        assert_eq!(point.timestamp(), -9_000_000_000_000_000_000);
    }

    #[test]
    fn test_series_count_without_anchor() {
        let data = frame(Some(1.0), Some(2.0));
        assert!(Columns::from_series(&data, false).is_ok());
        let err = Columns::from_series(&data, true).unwrap_err();
        assert!(matches!(err, TrackError::SeriesCount { expected: 5, actual: 4 }));
        let err = Columns::from_series(&data[..2], false).unwrap_err();
        assert!(matches!(err, TrackError::SeriesCount { expected: 4, actual: 2 }));
    }

    #[test]
    fn test_length_mismatch() {
        let mut data = frame(Some(1.0), Some(2.0));
        data[3].datapoints.push(Datapoint::number(1.0, 2000));
        let err = Columns::from_series(&data, false).unwrap_err();
        assert!(matches!(
            err,
            TrackError::LengthMismatch { ref series, expected: 1, actual: 2 } if series == "wind"
        ));
    }

    #[test]
    fn test_valid_row() {
        let data = frame(Some(59.9), Some(10.7));
        let columns = Columns::from_series(&data, false).unwrap();
        let row = columns.row(0).unwrap();
        assert_eq!(row.timestamp, 1000);
        assert_eq!(row.position, Position::new(59.9, 10.7));
        assert_eq!(row.heading, 0.5);
        assert_eq!(row.wind, 1.5);
        assert!(row.anchor.is_none());
    }

    #[test]
    fn test_null_value_skips_row() {
        let data = frame(None, Some(10.7));
        let columns = Columns::from_series(&data, false).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::MissingValue));
    }

    #[test]
    fn test_non_numeric_value_skips_row() {
        let mut data = frame(Some(1.0), Some(2.0));
        data[2].datapoints[0] = Datapoint(Some(json!("north")), 1000);
        let columns = Columns::from_series(&data, false).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::InvalidValue));
    }

    #[test]
    fn test_null_island_skips_row() {
        let data = frame(Some(0.0), Some(0.0));
        let columns = Columns::from_series(&data, false).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::NoFix));
    }

    #[test]
    fn test_timestamp_mismatch_skips_row() {
        let mut data = frame(Some(1.0), Some(2.0));
        data[1].datapoints[0].1 = 1001;
        let columns = Columns::from_series(&data, false).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::TimestampMismatch));

        let mut data = frame(Some(1.0), Some(2.0));
        data[3].datapoints[0].1 = 999;
        let columns = Columns::from_series(&data, false).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::TimestampMismatch));
    }

    #[test]
    fn test_out_of_range_latitude_skips_row() {
        let data = frame(Some(95.0), Some(2.0));
        let columns = Columns::from_series(&data, false).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::OutOfRange));
    }

    #[test]
    fn test_longitude_is_wrapped() {
        let data = frame(Some(1.0), Some(190.0));
        let columns = Columns::from_series(&data, false).unwrap();
        let row = columns.row(0).unwrap();
        assert!((row.position.longitude - (-170.0)).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_column() {
        let mut data = frame(Some(1.0), Some(2.0));
        data.push(anchor_series(&[(json!(r#"{"latitude": 1.001, "longitude": 2.002}"#), 1000)]));
        let columns = Columns::from_series(&data, true).unwrap();
        assert!(columns.has_anchor());
        let row = columns.row(0).unwrap();
        assert_eq!(row.anchor, Some(Position::new(1.001, 2.002)));
    }

    #[test]
    fn test_malformed_anchor_skips_row() {
        let mut data = frame(Some(1.0), Some(2.0));
        data.push(anchor_series(&[(json!("{broken"), 1000)]));
        let columns = Columns::from_series(&data, true).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::InvalidAnchor));
    }

    #[test]
    fn test_null_anchor_skips_row() {
        let mut data = frame(Some(1.0), Some(2.0));
        data.push(Series::new("anchor", vec![Datapoint::null(1000)]));
        let columns = Columns::from_series(&data, true).unwrap();
        assert_eq!(columns.row(0), Err(SkipReason::MissingValue));
    }
}
