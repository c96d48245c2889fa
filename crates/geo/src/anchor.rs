//! Anchor position payload parsing.
//!
//! Anchor watch sources report the dropped-anchor position as a structured
//! value rather than two numeric series. Dashboards deliver it either as a
//! JSON object or, more commonly, as a string holding serialized JSON:
//!
//! - `{"latitude": 59.91, "longitude": 10.75}`
//! - `"{\"latitude\": 59.91, \"longitude\": 10.75}"`

use crate::{GeoError, Position, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AnchorPayload {
    latitude: f64,
    longitude: f64,
}

/// Parse an anchor position from a JSON value.
///
/// # Returns
/// * `Some(Position)` for a well-formed, in-range payload
/// * `None` if the value is null, malformed, or out of range
///
/// # Example
/// ```
/// use trackmap_geo::parse_anchor;
/// use serde_json::json;
///
/// let anchor = parse_anchor(&json!(r#"{"latitude": 59.91, "longitude": 10.75}"#)).unwrap();
/// assert!((anchor.latitude - 59.91).abs() < 1e-9);
///
/// assert!(parse_anchor(&json!(null)).is_none());
/// assert!(parse_anchor(&json!("not json")).is_none());
/// ```
pub fn parse_anchor(value: &serde_json::Value) -> Option<Position> {
    match value {
        serde_json::Value::String(raw) => parse_anchor_str(raw).ok(),
        serde_json::Value::Object(_) => {
            let payload = AnchorPayload::deserialize(value).ok()?;
            validated(payload).ok()
        }
        _ => None,
    }
}

/// Parse an anchor position from serialized JSON text.
pub fn parse_anchor_str(raw: &str) -> Result<Position> {
    let payload: AnchorPayload = serde_json::from_str(raw.trim())?;
    validated(payload)
}

fn validated(payload: AnchorPayload) -> Result<Position> {
    let position = Position::new(payload.latitude, payload.longitude).normalized();
    if position.is_valid() {
        Ok(position)
    } else {
        Err(GeoError::InvalidCoordinate(format!(
            "anchor ({}, {}) out of range",
            payload.latitude, payload.longitude
        )))
    }
}
