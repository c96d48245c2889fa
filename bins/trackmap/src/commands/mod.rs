//! CLI command implementations

pub mod build;
pub mod destination;
pub mod nearest;
pub mod render;
pub mod select;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use trackmap_telemetry::{metrics, timed_span};
use trackmap_track::{BuildOptions, Series, TrackBuilder, TrackProvider, TrackSnapshot};

/// Read the host's series list from a file, or stdin for `-`
pub fn load_frame(path: &Path) -> Result<Vec<Series>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read frame from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame {}", path.display()))?
    };

    let series: Vec<Series> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse frame {}", path.display()))?;
    metrics().gauge("frame.series", series.len() as u64);
    Ok(series)
}

/// Build a snapshot and record build statistics
pub fn build_snapshot(
    series: &[Series],
    options: BuildOptions,
) -> trackmap_track::Result<TrackSnapshot> {
    timed_span!("track.build", series = series.len());
    let result = TrackBuilder::new(options).build_snapshot(series);

    let registry = metrics();
    registry.increment("track.builds");
    match &result {
        Ok(snapshot) => {
            let stats = snapshot.stats();
            registry.increment_by("track.rows_total", stats.rows_total as u64);
            registry.increment_by("track.rows_valid", stats.rows_valid as u64);
            registry.increment_by("track.rows_skipped", stats.skipped() as u64);
            registry.increment_by(
                "track.antimeridian_crossings",
                stats.antimeridian_crossings as u64,
            );
            registry.gauge("track.samples", snapshot.len() as u64);
            registry.gauge("track.segments", snapshot.segment_count() as u64);
        }
        Err(err) => {
            registry.increment(if err.is_recoverable() {
                "track.insufficient_data"
            } else {
                "track.shape_errors"
            });
        }
    }
    result
}

/// Load a frame and build it with the given options
pub fn load_snapshot(path: &Path, options: BuildOptions) -> Result<TrackSnapshot> {
    let series = load_frame(path)?;
    build_snapshot(&series, options)
        .with_context(|| format!("Cannot build a track from {}", path.display()))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    timed_span!("output.json");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
