//! Render plan: what the map widget should draw for one snapshot.

use crate::{PanelOptions, TrackSnapshot};
use serde::Serialize;
use trackmap_geo::{destination, Bounds, Position};

/// Stroke width for track and wind lines, in pixels.
pub const LINE_WEIGHT: u8 = 1;

/// Zoom level of the fallback world view.
pub const WORLD_ZOOM: f64 = 1.0;

/// A styled line on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub positions: Vec<Position>,
    pub color: String,
    pub weight: u8,
}

impl Polyline {
    fn new(positions: Vec<Position>, color: &str) -> Self {
        Self {
            positions,
            color: color.to_string(),
            weight: LINE_WEIGHT,
        }
    }
}

/// The vessel icon at the latest sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselMarker {
    pub position: Position,
    /// Icon rotation, clockwise from north
    pub rotation_deg: f64,
}

/// How the host should move the map after drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Viewport {
    /// Fit the map to these bounds
    Fit { bounds: Bounds },
    /// Show the whole world
    World { center: Position, zoom: f64 },
    /// Leave the current view alone
    Keep,
}

impl Viewport {
    /// The unzoomed fallback view.
    pub fn world() -> Self {
        Viewport::World {
            center: Position::new(0.0, 0.0),
            zoom: WORLD_ZOOM,
        }
    }
}

/// Everything the map widget needs for one data cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// One line per segment; segments never cross ±180°
    pub polylines: Vec<Polyline>,
    pub vessel: Option<VesselMarker>,
    pub anchor: Option<Position>,
    /// Two-point line from the vessel towards the wind
    pub wind: Option<Polyline>,
    /// Fill color for the hover marker
    pub point_color: String,
    pub viewport: Viewport,
}

impl RenderPlan {
    /// Plan for a frame without enough data: no overlays, world view.
    pub fn world() -> Self {
        Self {
            polylines: Vec::new(),
            vessel: None,
            anchor: None,
            wind: None,
            point_color: String::new(),
            viewport: Viewport::world(),
        }
    }

    /// Plans the overlays for `snapshot` styled by `options`.
    pub fn from_snapshot(snapshot: &TrackSnapshot, options: &PanelOptions) -> Self {
        let polylines: Vec<Polyline> = snapshot
            .segments()
            .map(|segment| {
                Polyline::new(
                    segment.iter().map(|s| s.position).collect(),
                    &options.line_color,
                )
            })
            .collect();

        let latest = snapshot.latest();
        let vessel = latest.map(|s| VesselMarker {
            position: s.position,
            rotation_deg: s.heading_deg(),
        });
        let anchor = latest.and_then(|s| s.anchor);
        let wind = latest.map(|s| {
            let tip = destination(&s.position, s.wind_deg(), options.wind_indicator_length_m);
            Polyline::new(vec![s.position, tip], &options.wind_color)
        });

        let viewport = if options.auto_zoom {
            polylines
                .iter()
                .filter_map(|p| Bounds::from_positions(&p.positions))
                .reduce(|acc, b| acc.union(&b))
                .filter(Bounds::is_valid)
                .map_or_else(Viewport::world, |bounds| Viewport::Fit { bounds })
        } else {
            Viewport::Keep
        };

        Self {
            polylines,
            vessel,
            anchor,
            wind,
            point_color: options.point_color.clone(),
            viewport,
        }
    }

    /// Plans a snapshot result, falling back to the world view on
    /// insufficient data.
    pub fn from_result(result: &crate::Result<TrackSnapshot>, options: &PanelOptions) -> Self {
        match result {
            Ok(snapshot) => Self::from_snapshot(snapshot, options),
            Err(_) => Self {
                point_color: options.point_color.clone(),
                ..Self::world()
            },
        }
    }

    /// Whether anything is drawn besides tiles.
    pub fn has_track(&self) -> bool {
        !self.polylines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildOptions, Datapoint, Series, TrackBuilder};
    use serde_json::json;
    use std::f64::consts::FRAC_PI_2;

    fn snapshot(longitudes: [f64; 3], with_anchor: bool) -> TrackSnapshot {
        let timestamps = [1000, 2000, 3000];
        let column = |name: &str, values: [f64; 3]| {
            Series::new(
                name,
                values
                    .iter()
                    .zip(timestamps)
                    .map(|(v, t)| Datapoint::number(*v, t))
                    .collect(),
            )
        };
        let mut series = vec![
            column("lat", [10.0, 10.0, 10.0]),
            column("lon", longitudes),
            column("heading", [0.0, 0.0, FRAC_PI_2]),
            column("wind", [0.0, 0.0, FRAC_PI_2]),
        ];
        let options = if with_anchor {
            let anchor = json!({"latitude": 11.0, "longitude": longitudes[2]});
            series.push(Series::new(
                "anchor",
                timestamps
                    .iter()
                    .map(|&t| Datapoint(Some(anchor.clone()), t))
                    .collect(),
            ));
            BuildOptions::with_anchor()
        } else {
            BuildOptions::default()
        };
        TrackBuilder::new(options).build_from_series(&series).unwrap()
    }

    #[test]
    fn test_one_polyline_per_segment() {
        let plan = RenderPlan::from_snapshot(&snapshot([20.0, 170.0, -170.0], false), &PanelOptions::default());
        assert_eq!(plan.polylines.len(), 2);
        assert_eq!(plan.polylines[0].positions.len(), 3);
        assert_eq!(plan.polylines[0].positions[2].longitude, 180.0);
        assert_eq!(plan.polylines[1].positions[0].longitude, -180.0);
        assert!(plan.polylines.iter().all(|p| p.color == "red"));
    }

    #[test]
    fn test_vessel_and_wind() {
        let plan = RenderPlan::from_snapshot(&snapshot([20.0, 21.0, 22.0], false), &PanelOptions::default());
        let vessel = plan.vessel.unwrap();
        assert_eq!(vessel.position, Position::new(10.0, 22.0));
        assert!((vessel.rotation_deg - 90.0).abs() < 1e-9);
        assert!(plan.anchor.is_none());

        let wind = plan.wind.unwrap();
        assert_eq!(wind.color, "yellow");
        assert_eq!(wind.positions[0], vessel.position);
        // wind points east, so the tip lies east of the vessel
        assert!(wind.positions[1].longitude > vessel.position.longitude);
        assert!((wind.positions[1].latitude - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_anchor_marker() {
        let plan = RenderPlan::from_snapshot(&snapshot([20.0, 21.0, 22.0], true), &PanelOptions::default());
        assert_eq!(plan.anchor, Some(Position::new(11.0, 22.0)));
    }

    #[test]
    fn test_auto_zoom_fits_track() {
        let plan = RenderPlan::from_snapshot(&snapshot([20.0, 21.0, 22.0], false), &PanelOptions::default());
        match plan.viewport {
            Viewport::Fit { bounds } => {
                assert_eq!(bounds.west, 20.0);
                assert_eq!(bounds.east, 22.0);
            }
            other => panic!("expected fit, got {other:?}"),
        }

        let options = PanelOptions {
            auto_zoom: false,
            ..PanelOptions::default()
        };
        let plan = RenderPlan::from_snapshot(&snapshot([20.0, 21.0, 22.0], false), &options);
        assert_eq!(plan.viewport, Viewport::Keep);
    }

    #[test]
    fn test_fit_spans_every_segment() {
        let plan = RenderPlan::from_snapshot(&snapshot([20.0, 170.0, -170.0], false), &PanelOptions::default());
        match plan.viewport {
            Viewport::Fit { bounds } => {
                assert_eq!(bounds.west, -180.0);
                assert_eq!(bounds.east, 180.0);
                assert_eq!(bounds.south, 10.0);
                assert_eq!(bounds.north, 10.0);
            }
            other => panic!("expected fit, got {other:?}"),
        }
    }

    #[test]
    fn test_world_fallback() {
        let result = TrackBuilder::default().build_from_series(&[]);
        let plan = RenderPlan::from_result(&result, &PanelOptions::default());
        assert!(!plan.has_track());
        assert_eq!(plan.viewport, Viewport::world());
        assert_eq!(plan.point_color, "royalblue");

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["viewport"]["kind"], "world");
        assert_eq!(json["viewport"]["zoom"], 1.0);
    }
}
