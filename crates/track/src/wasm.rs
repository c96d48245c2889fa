//! WASM bindings for the track crate.
//!
//! The dashboard panel talks to these through JSON strings.

use crate::{PanelOptions, Series, TrackSession as Session};
use trackmap_geo::{destination, Bounds, Position};
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Default panel options as JSON.
#[wasm_bindgen]
pub fn panel_defaults() -> Result<String, JsValue> {
    serde_json::to_string(&PanelOptions::default()).map_err(to_js)
}

/// Point reached from (`lat`, `lng`) after `distance` meters on `bearing` degrees.
///
/// # Returns
/// JSON string with latitude/longitude
#[wasm_bindgen]
pub fn destination_point(lat: f64, lng: f64, bearing: f64, distance: f64) -> Result<String, JsValue> {
    let point = destination(&Position::new(lat, lng), bearing, distance);
    serde_json::to_string(&point).map_err(to_js)
}

/// One panel instance on the host side.
#[wasm_bindgen]
pub struct TrackSession {
    inner: Session,
}

#[wasm_bindgen]
impl TrackSession {
    /// Creates a session from the panel's options JSON (`"{}"` for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str) -> Result<TrackSession, JsValue> {
        let options = PanelOptions::from_json(options_json).map_err(to_js)?;
        let inner = Session::new(options).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Replaces the track with a new frame of series.
    ///
    /// # Returns
    /// JSON render plan; the world view when the frame has too little data
    pub fn on_data_received(&mut self, series_json: &str) -> Result<String, JsValue> {
        let series: Vec<Series> = serde_json::from_str(series_json).map_err(to_js)?;
        let plan = self.inner.on_data_received(&series).map_err(to_js)?;
        serde_json::to_string(&plan).map_err(to_js)
    }

    /// Hover from another panel at time `x`.
    ///
    /// # Returns
    /// JSON marker update, or nothing when the marker stays put
    pub fn on_hover(&mut self, x: f64) -> Option<String> {
        match self.inner.on_hover(x) {
            crate::HoverUpdate::Unchanged => None,
            update => serde_json::to_string(&update).ok(),
        }
    }

    /// Hover cursor left the dashboard.
    pub fn on_hover_clear(&mut self) {
        self.inner.on_hover_clear();
    }

    /// Box-zoom selection.
    ///
    /// # Returns
    /// JSON `{from, to}` for the host time picker, or nothing
    pub fn on_box_zoom(&self, south: f64, west: f64, north: f64, east: f64) -> Option<String> {
        let bounds = Bounds::new(Position::new(south, west), Position::new(north, east));
        let range = self.inner.on_box_zoom(&bounds)?;
        serde_json::to_string(&range).ok()
    }
}
