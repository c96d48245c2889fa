//! Nearest command - resolve a hover time to a sample

use crate::config::Config;
use crate::Format;
use anyhow::{Context, Result};
use chrono::DateTime;
use serde_json::json;
use std::path::Path;
use trackmap_cli::output::{format_position, format_timestamp, Status};
use trackmap_track::TrackIndex;

/// Parse epoch milliseconds or an RFC 3339 timestamp
pub fn parse_time(raw: &str) -> Result<i64> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Ok(millis);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.timestamp_millis())
        .with_context(|| format!("'{raw}' is neither epoch milliseconds nor RFC 3339"))
}

/// Run the nearest command
pub fn run(frame: &Path, time: &str, config: &Config, format: Format) -> Result<()> {
    let timestamp = parse_time(time)?;
    let index = TrackIndex::new(super::load_snapshot(frame, config.panel().build_options())?);

    let Some(found) = index.nearest_at_or_before(timestamp) else {
        anyhow::bail!("Track has no samples");
    };
    let sample = &index.snapshot().samples()[found];

    match format {
        Format::Json => super::print_json(&json!({
            "query": timestamp,
            "index": found,
            "sample": sample,
        })),
        Format::Text => {
            Status::info(&format!("Sample {} for {}", found, format_timestamp(timestamp)));
            Status::field("Time", format_timestamp(sample.timestamp));
            Status::field("Position", format_position(&sample.position));
            Status::field("Heading", format!("{:.1}°", sample.heading_deg()));
            if sample.synthetic {
                Status::field("Kind", "antimeridian point");
            }
            if sample.timestamp > timestamp {
                Status::warning("Query precedes the track; showing the first sample");
            }
            Ok(())
        }
    }
}
