//! Destination command - forward geodesy for the wind indicator

use crate::Format;
use anyhow::Result;
use trackmap_cli::output::{format_distance, format_position, Status};
use trackmap_geo::{destination, haversine_distance_meters, Position};

/// Run the destination command
pub fn run(lat: f64, lng: f64, bearing: f64, distance: f64, format: Format) -> Result<()> {
    let origin = Position::try_new(lat, lng)?;
    if !distance.is_finite() || distance < 0.0 {
        anyhow::bail!("Distance must be a non-negative number of meters, got {distance}");
    }

    let point = destination(&origin, bearing, distance);

    match format {
        Format::Json => super::print_json(&point),
        Format::Text => {
            Status::field("From", format_position(&origin));
            Status::field("To", format_position(&point));
            Status::field(
                "Great circle",
                format_distance(haversine_distance_meters(&origin, &point)),
            );
            Ok(())
        }
    }
}
