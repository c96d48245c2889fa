//! Panel session: the state a host adapter keeps between events.

use crate::{
    time_range_in_bounds, HoverSync, HoverUpdate, PanelOptions, RenderPlan, Result, Series,
    TimeRange, TrackBuilder, TrackIndex, TrackProvider,
};
use tracing::debug;
use trackmap_geo::Bounds;

/// Holds the current index and hover state for one panel.
///
/// Every data event replaces the index wholesale; nothing is patched.
#[derive(Debug, Clone)]
pub struct TrackSession {
    options: PanelOptions,
    builder: TrackBuilder,
    index: Option<TrackIndex>,
    hover: HoverSync,
}

impl TrackSession {
    /// Creates a session with validated options.
    pub fn new(options: PanelOptions) -> Result<Self> {
        options.validate()?;
        let builder = TrackBuilder::new(options.build_options());
        Ok(Self {
            options,
            builder,
            index: None,
            hover: HoverSync::new(),
        })
    }

    /// The panel options in effect.
    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Index over the current snapshot, if the last frame had enough data.
    pub fn index(&self) -> Option<&TrackIndex> {
        self.index.as_ref()
    }

    /// Handles a data-received event.
    ///
    /// Insufficient data clears the track and yields the world view. Shape
    /// errors are returned and also clear the track.
    pub fn on_data_received(&mut self, series: &[Series]) -> Result<RenderPlan> {
        self.index = None;
        self.hover.on_clear();

        match self.builder.build_snapshot(series) {
            Ok(snapshot) => {
                let plan = RenderPlan::from_snapshot(&snapshot, &self.options);
                self.index = Some(TrackIndex::new(snapshot));
                Ok(plan)
            }
            Err(err) if err.is_recoverable() => {
                debug!(error = %err, "Showing world view");
                Ok(RenderPlan::from_result(&Err(err), &self.options))
            }
            Err(err) => Err(err),
        }
    }

    /// Handles a hover event from another panel at time `x`.
    pub fn on_hover(&mut self, x: f64) -> HoverUpdate {
        match &self.index {
            Some(index) => self.hover.on_hover(index, x),
            None => HoverUpdate::Unchanged,
        }
    }

    /// Handles the hover cursor leaving the dashboard.
    pub fn on_hover_clear(&mut self) {
        self.hover.on_clear();
    }

    /// Handles a box-zoom selection. `None` means no time-range update.
    pub fn on_box_zoom(&self, bounds: &Bounds) -> Option<TimeRange> {
        let index = self.index.as_ref()?;
        time_range_in_bounds(index.snapshot().samples(), bounds)
    }
}
