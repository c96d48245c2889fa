//! Select command - time range of a box-zoom selection

use crate::config::Config;
use crate::Format;
use anyhow::Result;
use std::path::Path;
use trackmap_cli::output::{format_span_ms, format_timestamp, Status};
use trackmap_geo::{Bounds, Position};
use trackmap_track::time_range_in_bounds;

/// Run the select command with `[south, west, north, east]` edges
pub fn run(frame: &Path, edges: [f64; 4], config: &Config, format: Format) -> Result<()> {
    let [south, west, north, east] = edges;
    let (south_west, north_east) = (Position::new(south, west), Position::new(north, east));
    if !south_west.is_valid() || !north_east.is_valid() {
        anyhow::bail!("Selection is outside the valid latitude/longitude range");
    }
    let bounds = Bounds::new(south_west, north_east);

    let snapshot = super::load_snapshot(frame, config.panel().build_options())?;
    let range = time_range_in_bounds(snapshot.samples(), &bounds);

    match format {
        Format::Json => super::print_json(&range),
        Format::Text => {
            match range {
                Some(range) => {
                    Status::success("Time range selected");
                    Status::field("From", format_timestamp(range.from));
                    Status::field("To", format_timestamp(range.to));
                    Status::field("Duration", format_span_ms(range.duration_ms()));
                }
                None => Status::warning("No samples inside the selection; time range unchanged"),
            }
            Ok(())
        }
    }
}
