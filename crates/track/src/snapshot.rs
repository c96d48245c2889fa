//! The immutable result of one build cycle.

use crate::{BuildStats, Sample, TimeRange};
use serde::Serialize;
use trackmap_geo::Bounds;

/// Ordered samples plus the indices where a new polyline starts.
///
/// Invariants upheld by [`crate::TrackBuilder`]:
/// - `boundaries` starts with `0`, ends with `samples.len()` and strictly increases
/// - sample timestamps never decrease
///
/// A snapshot is never modified after it is built. A new data frame produces
/// a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSnapshot {
    samples: Vec<Sample>,
    boundaries: Vec<usize>,
    stats: BuildStats,
}

impl TrackSnapshot {
    pub(crate) fn new(samples: Vec<Sample>, boundaries: Vec<usize>, stats: BuildStats) -> Self {
        debug_assert_eq!(boundaries.first(), Some(&0));
        debug_assert_eq!(boundaries.last(), Some(&samples.len()));
        debug_assert!(boundaries.windows(2).all(|w| w[0] < w[1]));
        Self {
            samples,
            boundaries,
            stats,
        }
    }

    /// All samples in time order, including synthetic meridian points.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Segment boundary indices into [`Self::samples`].
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Build statistics for this snapshot.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the snapshot holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One slice of samples per renderable polyline.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &[Sample]> + '_ {
        self.boundaries
            .windows(2)
            .map(|w| &self.samples[w[0]..w[1]])
    }

    /// Number of polylines.
    pub fn segment_count(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    /// The most recent sample, where the vessel marker goes.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Bounding box of every sample position.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_positions(self.samples.iter().map(|s| &s.position))
    }

    /// First and last timestamp.
    pub fn time_span(&self) -> Option<TimeRange> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some(TimeRange {
                from: first.timestamp,
                to: last.timestamp,
            }),
            _ => None,
        }
    }

    /// Consumes the snapshot, returning samples and boundaries.
    pub fn into_parts(self) -> (Vec<Sample>, Vec<usize>) {
        (self.samples, self.boundaries)
    }
}
