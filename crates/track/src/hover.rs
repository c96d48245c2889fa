//! Cross-panel hover cursor sync.

use crate::TrackIndex;
use serde::Serialize;
use trackmap_geo::Position;

/// What the renderer should do with the hover marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HoverUpdate {
    /// Nothing to redraw
    Unchanged,
    /// Move the marker to the sample at `index`
    #[serde(rename_all = "camelCase")]
    Moved {
        index: usize,
        position: Position,
        /// The marker was hidden and must be added to the map
        first_show: bool,
    },
}

/// Tracks the current hover target between host hover events.
///
/// The host fires hover events at pointer rate, often with the same
/// millisecond repeated. Targets are compared on `floor(x)` so repeats are
/// cheap no-ops.
#[derive(Debug, Clone, Default)]
pub struct HoverSync {
    target: Option<i64>,
    visible: bool,
}

impl HoverSync {
    /// Creates a sync state with no marker shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a hover at time `x` (epoch ms, possibly fractional).
    pub fn on_hover(&mut self, index: &TrackIndex, x: f64) -> HoverUpdate {
        if !x.is_finite() {
            return HoverUpdate::Unchanged;
        }
        let target = x.floor() as i64;
        if self.target == Some(target) {
            return HoverUpdate::Unchanged;
        }

        let Some(found) = index.nearest_at_or_before(target) else {
            return HoverUpdate::Unchanged;
        };
        let position = index.snapshot().samples()[found].position;

        self.target = Some(target);
        let first_show = !self.visible;
        self.visible = true;

        HoverUpdate::Moved {
            index: found,
            position,
            first_show,
        }
    }

    /// Forgets the target. The next hover re-resolves and re-shows the marker.
    pub fn on_clear(&mut self) {
        self.target = None;
        self.visible = false;
    }

    /// Current hover target, if any.
    pub fn target(&self) -> Option<i64> {
        self.target
    }

    /// Whether the hover marker is on the map.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Datapoint, Series, TrackBuilder};

    fn index() -> TrackIndex {
        let column = |name: &str, values: [f64; 3]| {
            Series::new(
                name,
                values
                    .iter()
                    .zip([100, 200, 300])
                    .map(|(v, t)| Datapoint::number(*v, t))
                    .collect(),
            )
        };
        let series = vec![
            column("lat", [1.0, 2.0, 3.0]),
            column("lon", [1.0, 2.0, 3.0]),
            column("heading", [0.0; 3]),
            column("wind", [0.0; 3]),
        ];
        TrackIndex::new(TrackBuilder::default().build_from_series(&series).unwrap())
    }

    #[test]
    fn test_first_hover_shows_marker() {
        let index = index();
        let mut hover = HoverSync::new();
        assert_eq!(
            hover.on_hover(&index, 250.0),
            HoverUpdate::Moved {
                index: 1,
                position: Position::new(2.0, 2.0),
                first_show: true,
            }
        );
        assert!(hover.is_visible());
    }

    #[test]
    fn test_repeat_hover_is_unchanged() {
        let index = index();
        let mut hover = HoverSync::new();
        hover.on_hover(&index, 250.2);
        assert_eq!(hover.on_hover(&index, 250.9), HoverUpdate::Unchanged);
        assert_eq!(hover.target(), Some(250));
    }

    #[test]
    fn test_move_keeps_marker() {
        let index = index();
        let mut hover = HoverSync::new();
        hover.on_hover(&index, 150.0);
        match hover.on_hover(&index, 300.0) {
            HoverUpdate::Moved { index, first_show, .. } => {
                assert_eq!(index, 2);
                assert!(!first_show);
            }
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn test_clear_then_hover_shows_again() {
        let index = index();
        let mut hover = HoverSync::new();
        hover.on_hover(&index, 150.0);
        hover.on_clear();
        assert_eq!(hover.target(), None);
        assert!(matches!(
            hover.on_hover(&index, 150.0),
            HoverUpdate::Moved { first_show: true, .. }
        ));
    }

    #[test]
    fn test_non_finite_is_ignored() {
        let index = index();
        let mut hover = HoverSync::new();
        assert_eq!(hover.on_hover(&index, f64::NAN), HoverUpdate::Unchanged);
        assert!(!hover.is_visible());
    }

    #[test]
    fn test_serialized_shape() {
        let index = index();
        let mut hover = HoverSync::new();
        let json = serde_json::to_value(hover.on_hover(&index, 100.0)).unwrap();
        assert_eq!(json["kind"], "moved");
        assert_eq!(json["firstShow"], true);
        assert_eq!(json["index"], 0);
    }
}
