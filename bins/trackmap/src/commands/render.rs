//! Render command - overlays the panel would draw

use crate::config::Config;
use crate::Format;
use anyhow::Result;
use std::path::Path;
use trackmap_cli::output::{format_count, format_position, Status};
use trackmap_geo::Position;
use trackmap_track::{RenderPlan, Viewport};

/// Run the render command
///
/// Insufficient data is not an error here: the panel shows the world view.
pub fn run(frame: &Path, config: &Config, format: Format) -> Result<()> {
    let series = super::load_frame(frame)?;
    let options = config.panel();

    let result = super::build_snapshot(&series, options.build_options());
    if let Err(err) = &result {
        if !err.is_recoverable() {
            anyhow::bail!("Cannot build a track from {}: {}", frame.display(), err);
        }
        tracing::debug!(error = %err, "Falling back to world view");
    }
    let plan = RenderPlan::from_result(&result, options);

    match format {
        Format::Json => super::print_json(&plan),
        Format::Text => {
            print_plan(&plan);
            Ok(())
        }
    }
}

fn print_plan(plan: &RenderPlan) {
    Status::header("Render plan");
    if !plan.has_track() {
        Status::warning("Not enough data; showing the world map");
    }

    let points: usize = plan.polylines.iter().map(|p| p.positions.len()).sum();
    Status::field(
        "Polylines",
        format!(
            "{} ({})",
            format_count(plan.polylines.len(), "line", "lines"),
            format_count(points, "point", "points")
        ),
    );
    if let Some(vessel) = &plan.vessel {
        Status::field("Vessel", format_position(&vessel.position));
        Status::field("Rotation", format!("{:.1}°", vessel.rotation_deg));
    }
    if let Some(anchor) = &plan.anchor {
        Status::field("Anchor", format_position(anchor));
    }
    if let Some(tip) = plan.wind.as_ref().and_then(|w| w.positions.last()) {
        Status::field("Wind tip", format_position(tip));
    }

    let viewport = match &plan.viewport {
        Viewport::Fit { bounds } => format!(
            "fit {} to {}",
            format_position(&Position::new(bounds.south, bounds.west)),
            format_position(&Position::new(bounds.north, bounds.east))
        ),
        Viewport::World { zoom, .. } => format!("world, zoom {zoom}"),
        Viewport::Keep => "unchanged".to_string(),
    };
    Status::field("Viewport", viewport);
}
