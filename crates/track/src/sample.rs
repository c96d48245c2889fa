use serde::{Deserialize, Serialize};
use trackmap_geo::Position;

/// One point of a vessel track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: Position,
    /// Epoch milliseconds
    pub timestamp: i64,
    /// Direction of travel in radians
    pub heading: f64,
    /// Wind direction in radians
    pub wind: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Position>,
    /// Set for the meridian points inserted where the track crosses ±180°
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl Sample {
    /// Heading converted to compass degrees.
    pub fn heading_deg(&self) -> f64 {
        self.heading.to_degrees()
    }

    /// Wind direction converted to compass degrees.
    pub fn wind_deg(&self) -> f64 {
        self.wind.to_degrees()
    }

    /// A meridian point that inherits heading, wind and anchor from `previous`.
    pub(crate) fn synthetic(previous: &Sample, position: Position, timestamp: i64) -> Self {
        Self {
            position,
            timestamp,
            synthetic: true,
            ..*previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_degrees() {
        let sample = Sample {
            position: Position::new(1.0, 2.0),
            timestamp: 0,
            heading: PI / 2.0,
            wind: PI,
            anchor: None,
            synthetic: false,
        };
        assert!((sample.heading_deg() - 90.0).abs() < 1e-9);
        assert!((sample.wind_deg() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialization_omits_defaults() {
        let sample = Sample {
            position: Position::new(1.0, 2.0),
            timestamp: 5,
            heading: 0.0,
            wind: 0.0,
            anchor: None,
            synthetic: false,
        };
        let json = serde_json::to_value(sample).unwrap();
        assert!(json.get("anchor").is_none());
        assert!(json.get("synthetic").is_none());

        let meridian = Sample::synthetic(&sample, Position::new(1.0, 180.0), 7);
        let json = serde_json::to_value(meridian).unwrap();
        assert_eq!(json["synthetic"], true);
        assert_eq!(json["timestamp"], 7);
    }
}
