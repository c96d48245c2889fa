//! Track Builder: columns in, antimeridian-safe snapshot out.

use crate::columns::{Columns, Row, Series, SkipReason};
use crate::{Result, Sample, TrackError, TrackProvider, TrackSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};
use trackmap_geo::antimeridian_crossing;

/// Fewest valid rows worth drawing as a track.
pub const MIN_VALID_ROWS: usize = 3;

/// Options for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Expect a fifth series with the anchor position payload
    pub with_anchor: bool,
    /// Below this many valid rows the build reports insufficient data
    pub min_valid_rows: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            with_anchor: false,
            min_valid_rows: MIN_VALID_ROWS,
        }
    }
}

impl BuildOptions {
    /// Options for frames that carry the anchor column.
    pub fn with_anchor() -> Self {
        Self {
            with_anchor: true,
            ..Self::default()
        }
    }
}

/// Counters describing what a build kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Rows delivered by the host
    pub rows_total: usize,
    /// Rows that became samples
    pub rows_valid: usize,
    /// Dropped rows by reason
    pub rows_skipped: BTreeMap<SkipReason, usize>,
    /// Legs split at the antimeridian
    pub antimeridian_crossings: usize,
}

impl BuildStats {
    /// Total number of dropped rows.
    pub fn skipped(&self) -> usize {
        self.rows_skipped.values().sum()
    }

    /// Number of meridian points inserted.
    pub fn synthetic_samples(&self) -> usize {
        self.antimeridian_crossings * 2
    }

    fn skip(&mut self, reason: SkipReason) {
        *self.rows_skipped.entry(reason).or_default() += 1;
    }
}

impl From<Row> for Sample {
    fn from(row: Row) -> Self {
        Self {
            position: row.position,
            timestamp: row.timestamp,
            heading: row.heading,
            wind: row.wind,
            anchor: row.anchor,
            synthetic: false,
        }
    }
}

/// Joins validated rows into a [`TrackSnapshot`].
///
/// The builder holds only its options; every call owns its own output, so a
/// builder can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    options: BuildOptions,
}

impl TrackBuilder {
    /// Creates a builder with the given options.
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// The options this builder was created with.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds a snapshot straight from the host's series.
    ///
    /// An empty series list is treated as "no data" rather than a shape error.
    pub fn build_from_series(&self, series: &[Series]) -> Result<TrackSnapshot> {
        if series.is_empty() {
            return Err(self.insufficient(0));
        }
        let columns = Columns::from_series(series, self.options.with_anchor)?;
        self.build(&columns)
    }

    /// Builds a snapshot from row-aligned columns.
    ///
    /// Invalid rows are dropped whole. Rows older than the previous sample are
    /// dropped too, so the output is always in time order. When consecutive
    /// samples straddle ±180°, two meridian points are inserted between them
    /// and a new segment starts at the second one.
    ///
    /// # Errors
    /// [`TrackError::InsufficientData`] if fewer than `min_valid_rows` rows
    /// survive validation.
    ///
    /// # Example
    /// ```
    /// use trackmap_track::{BuildOptions, Columns, Datapoint, Series, TrackBuilder};
    ///
    /// let column = |name: &str, values: [f64; 3]| {
    ///     Series::new(name, values.iter().zip([1000, 2000, 3000])
    ///         .map(|(v, t)| Datapoint::number(*v, t))
    ///         .collect())
    /// };
    /// let series = vec![
    ///     column("lat", [10.0, 10.0, 10.0]),
    ///     column("lon", [20.0, 170.0, -170.0]),
    ///     column("heading", [0.0, 0.0, 0.0]),
    ///     column("wind", [1.0, 1.0, 1.0]),
    /// ];
    ///
    /// let columns = Columns::from_series(&series, false).unwrap();
    /// let snapshot = TrackBuilder::new(BuildOptions::default()).build(&columns).unwrap();
    /// assert_eq!(snapshot.len(), 5);
    /// assert_eq!(snapshot.boundaries(), &[0, 3, 5]);
    /// ```
    pub fn build(&self, columns: &Columns<'_>) -> Result<TrackSnapshot> {
        let mut samples: Vec<Sample> = Vec::with_capacity(columns.len());
        let mut boundaries = vec![0];
        let mut stats = BuildStats {
            rows_total: columns.len(),
            ..BuildStats::default()
        };

        for index in 0..columns.len() {
            let row = match columns.row(index) {
                Ok(row) => row,
                Err(reason) => {
                    trace!(index, ?reason, "Skipping row");
                    stats.skip(reason);
                    continue;
                }
            };

            if let Some(previous) = samples.last().copied() {
                if row.timestamp < previous.timestamp {
                    trace!(index, timestamp = row.timestamp, "Skipping out-of-order row");
                    stats.skip(SkipReason::OutOfOrder);
                    continue;
                }

                if let Some((first, second)) =
                    antimeridian_crossing(&previous.position, &row.position)
                {
                    // row.timestamp >= previous.timestamp, checked above
                    let midpoint = previous
                        .timestamp
                        .saturating_add_unsigned(row.timestamp.abs_diff(previous.timestamp) / 2);
                    samples.push(Sample::synthetic(&previous, first, midpoint));
                    samples.push(Sample::synthetic(&previous, second, midpoint));
                    boundaries.push(samples.len() - 1);
                    stats.antimeridian_crossings += 1;
                    trace!(
                        index,
                        latitude = first.latitude,
                        timestamp = midpoint,
                        "Split leg at antimeridian"
                    );
                }
            }

            stats.rows_valid += 1;
            samples.push(Sample::from(row));
        }

        if samples.is_empty() || stats.rows_valid < self.options.min_valid_rows {
            debug!(
                rows_total = stats.rows_total,
                rows_valid = stats.rows_valid,
                "Not enough valid rows for a track"
            );
            return Err(self.insufficient(stats.rows_valid));
        }

        boundaries.push(samples.len());

        debug!(
            rows_total = stats.rows_total,
            rows_valid = stats.rows_valid,
            rows_skipped = stats.skipped(),
            crossings = stats.antimeridian_crossings,
            segments = boundaries.len() - 1,
            "Track built"
        );

        Ok(TrackSnapshot::new(samples, boundaries, stats))
    }

    fn insufficient(&self, valid_rows: usize) -> TrackError {
        TrackError::InsufficientData {
            valid_rows,
            required: self.options.min_valid_rows,
        }
    }
}

impl TrackProvider for TrackBuilder {
    fn build_snapshot(&self, series: &[Series]) -> Result<TrackSnapshot> {
        self.build_from_series(series)
    }
}
