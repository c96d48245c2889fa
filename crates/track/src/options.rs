//! Panel options as persisted by the host dashboard.

use crate::{BuildOptions, Result, TrackError, MIN_VALID_ROWS};
use serde::{Deserialize, Serialize};

/// One selectable map tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub name: String,
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url: String,
    pub attribution: String,
    pub max_zoom: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<String>,
    /// Layer always shown on top of this one, e.g. labels over imagery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_overlay: Option<Box<TileLayer>>,
}

impl TileLayer {
    fn new(name: &str, url: &str, attribution: &str, max_zoom: u8) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            attribution: attribution.to_string(),
            max_zoom,
            subdomains: None,
            forced_overlay: None,
        }
    }

    /// OpenStreetMap standard tiles.
    pub fn open_street_map() -> Self {
        Self::new(
            "OpenStreetMap",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>",
            19,
        )
    }

    /// OpenTopoMap terrain tiles.
    pub fn open_topo_map() -> Self {
        Self::new(
            "OpenTopoMap",
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            "Map data: &copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>, \
             <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; \
             <a href=\"https://opentopomap.org\">OpenTopoMap</a> \
             (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)",
            17,
        )
    }

    /// Esri world imagery with a label overlay, since the imagery has none.
    pub fn satellite() -> Self {
        let labels = Self {
            subdomains: Some("abcd".to_string()),
            ..Self::new(
                "Labels",
                "https://stamen-tiles-{s}.a.ssl.fastly.net/toner-labels/{z}/{x}/{y}.png",
                "Labels by <a href=\"http://stamen.com\">Stamen Design</a>, \
                 <a href=\"http://creativecommons.org/licenses/by/3.0\">CC BY 3.0</a> &mdash; \
                 Map data &copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>",
                20,
            )
        };
        Self {
            forced_overlay: Some(Box::new(labels)),
            ..Self::new(
                "Satellite",
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                "Imagery &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, \
                 Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
                19,
            )
        }
    }

    /// The layers offered when none are configured.
    pub fn defaults() -> Vec<Self> {
        vec![Self::open_street_map(), Self::open_topo_map(), Self::satellite()]
    }
}

/// Per-panel settings. Every field has a default, so partial or empty
/// documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelOptions {
    /// Maximum rows requested from the data source
    pub max_data_points: usize,
    /// Fit the viewport to the track on every data event
    pub auto_zoom: bool,
    pub scroll_wheel_zoom: bool,
    /// Name of the layer shown first
    pub default_layer: String,
    pub show_layer_changer: bool,
    pub line_color: String,
    pub point_color: String,
    pub wind_color: String,
    /// Length of the wind indicator line in meters
    pub wind_indicator_length_m: f64,
    /// Frames carry a fifth series with the anchor position
    pub with_anchor: bool,
    pub layers: Vec<TileLayer>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            max_data_points: 500,
            auto_zoom: true,
            scroll_wheel_zoom: false,
            default_layer: "OpenStreetMap".to_string(),
            show_layer_changer: true,
            line_color: "red".to_string(),
            point_color: "royalblue".to_string(),
            wind_color: "yellow".to_string(),
            wind_indicator_length_m: 50.0,
            with_anchor: true,
            layers: TileLayer::defaults(),
        }
    }
}

impl PanelOptions {
    /// Parses options from the host's JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the options for values the panel cannot render.
    pub fn validate(&self) -> Result<()> {
        if self.layer(&self.default_layer).is_none() {
            return Err(TrackError::InvalidOptions(format!(
                "default layer '{}' is not one of the configured layers",
                self.default_layer
            )));
        }
        if !(self.wind_indicator_length_m.is_finite() && self.wind_indicator_length_m > 0.0) {
            return Err(TrackError::InvalidOptions(format!(
                "wind indicator length must be positive, got {}",
                self.wind_indicator_length_m
            )));
        }
        Ok(())
    }

    /// Looks up a configured layer by name.
    pub fn layer(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Builder options implied by these panel options.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            with_anchor: self.with_anchor,
            min_valid_rows: MIN_VALID_ROWS,
        }
    }
}
