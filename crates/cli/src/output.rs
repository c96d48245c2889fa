//! Terminal output utilities
//!
//! Status lines go to stdout, warnings to stderr. Colors are
//! dropped when the stream is not a terminal.

use chrono::{DateTime, SecondsFormat, Utc};
use owo_colors::{OwoColorize, Stream};
use trackmap_geo::Position;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!(
            "{} {}",
            "✓".if_supports_color(Stream::Stdout, |s| s.green()),
            message
        );
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!(
            "{} {}",
            "⚠".if_supports_color(Stream::Stderr, |s| s.yellow()),
            message
        );
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!(
            "{} {}",
            "ℹ".if_supports_color(Stream::Stdout, |s| s.blue()),
            message
        );
    }

    /// Print an aligned `label: value` line
    pub fn field(label: &str, value: impl std::fmt::Display) {
        println!(
            "  {:<14} {}",
            format!("{label}:").if_supports_color(Stream::Stdout, |s| s.dimmed()),
            value
        );
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |s| s.bold()));
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format epoch milliseconds as an RFC 3339 UTC timestamp.
///
/// Values chrono cannot represent fall back to the raw number.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{millis}ms"))
}

/// Format a span of milliseconds as hours, minutes and seconds
pub fn format_span_ms(millis: i64) -> String {
    let total = millis.unsigned_abs() / 1000;
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    match (h, m) {
        (0, 0) => format!("{s}s"),
        (0, _) => format!("{m}m {s:02}s"),
        _ => format!("{h}h {m:02}m {s:02}s"),
    }
}

/// Format a position with hemisphere letters, e.g. `59.91390°N 10.75220°E`
pub fn format_position(position: &Position) -> String {
    let ns = if position.latitude < 0.0 { 'S' } else { 'N' };
    let ew = if position.longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.5}°{} {:.5}°{}",
        position.latitude.abs(),
        ns,
        position.longitude.abs(),
        ew
    )
}

/// Format a distance in meters, switching to kilometers from 1 km
pub fn format_distance(meters: f64) -> String {
    if meters.abs() < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
