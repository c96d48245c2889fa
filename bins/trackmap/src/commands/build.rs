//! Build command - build a track and summarize it

use crate::config::Config;
use crate::Format;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use trackmap_cli::output::{
    format_count, format_duration, format_position, format_span_ms, format_timestamp, Status,
};
use trackmap_telemetry::Timer;
use trackmap_track::TrackSnapshot;

/// Run the build command
pub fn run(frame: &Path, config: &Config, with_anchor: Option<bool>, format: Format) -> Result<()> {
    let mut options = config.panel().build_options();
    if let Some(with_anchor) = with_anchor {
        options.with_anchor = with_anchor;
    }

    let series = super::load_frame(frame)?;
    let timer = Timer::start("command.build");
    let snapshot = super::build_snapshot(&series, options)
        .with_context(|| format!("Cannot build a track from {}", frame.display()))?;
    let elapsed = timer.stop();

    match format {
        Format::Json => super::print_json(&snapshot),
        Format::Text => {
            print_summary(&snapshot, elapsed);
            Ok(())
        }
    }
}

fn print_summary(snapshot: &TrackSnapshot, elapsed: Duration) {
    let stats = snapshot.stats();

    Status::header("Track");
    Status::field("Rows", format!("{} of {} valid", stats.rows_valid, stats.rows_total));
    Status::field("Samples", snapshot.len());
    Status::field(
        "Segments",
        format_count(snapshot.segment_count(), "segment", "segments"),
    );
    Status::field("Crossings", stats.antimeridian_crossings);
    Status::field("Build time", format_duration(elapsed));

    if let Some(span) = snapshot.time_span() {
        Status::field("From", format_timestamp(span.from));
        Status::field("To", format_timestamp(span.to));
        Status::field("Duration", format_span_ms(span.duration_ms()));
    }
    if let Some(latest) = snapshot.latest() {
        Status::field("Vessel", format_position(&latest.position));
        Status::field("Heading", format!("{:.1}°", latest.heading_deg()));
        if let Some(anchor) = &latest.anchor {
            Status::field("Anchor", format_position(anchor));
        }
    }

    if stats.skipped() > 0 {
        Status::header("Skipped rows");
        for (reason, count) in &stats.rows_skipped {
            Status::field(&format!("{reason:?}"), count);
        }
        Status::warning(&format!(
            "{} dropped",
            format_count(stats.skipped(), "row", "rows")
        ));
    } else {
        Status::success("All rows valid");
    }
}
