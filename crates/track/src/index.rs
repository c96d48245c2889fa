//! Track Index: timestamp lookups for cursor synchronization.

use crate::{Sample, TrackSnapshot};
use std::sync::Arc;

/// Read-only lookup structure over one snapshot.
///
/// The index never changes after construction. When a new snapshot arrives,
/// build a new index and drop the old one.
#[derive(Debug, Clone)]
pub struct TrackIndex {
    snapshot: Arc<TrackSnapshot>,
}

impl TrackIndex {
    /// Wraps a snapshot for querying.
    pub fn new(snapshot: impl Into<Arc<TrackSnapshot>>) -> Self {
        Self {
            snapshot: snapshot.into(),
        }
    }

    /// The indexed snapshot.
    pub fn snapshot(&self) -> &TrackSnapshot {
        &self.snapshot
    }

    /// Index of the sample nearest to `timestamp` without going past it.
    ///
    /// - `None` if the track is empty
    /// - `0` if `timestamp` precedes every sample
    /// - otherwise the last sample whose timestamp is `<= timestamp`; among
    ///   duplicate timestamps the later sample wins
    ///
    /// Runs in O(log n).
    ///
    /// # Example
    /// ```
    /// use trackmap_track::{TrackBuilder, TrackIndex, Series, Datapoint};
    ///
    /// let column = |name: &str, v: f64| {
    ///     Series::new(name, [100, 200, 300].map(|t| Datapoint::number(v + t as f64 / 1000.0, t)).to_vec())
    /// };
    /// let series = vec![column("lat", 50.0), column("lon", 4.0), column("heading", 0.0), column("wind", 0.0)];
    /// let index = TrackIndex::new(TrackBuilder::default().build_from_series(&series).unwrap());
    ///
    /// assert_eq!(index.nearest_at_or_before(250), Some(1));
    /// assert_eq!(index.nearest_at_or_before(300), Some(2));
    /// assert_eq!(index.nearest_at_or_before(50), Some(0));
    /// ```
    pub fn nearest_at_or_before(&self, timestamp: i64) -> Option<usize> {
        nearest_at_or_before(self.snapshot.samples(), timestamp)
    }

    /// The sample selected by [`Self::nearest_at_or_before`].
    pub fn sample_at_or_before(&self, timestamp: i64) -> Option<&Sample> {
        self.nearest_at_or_before(timestamp)
            .map(|i| &self.snapshot.samples()[i])
    }
}

/// Binary search over samples sorted by non-decreasing timestamp.
pub fn nearest_at_or_before(samples: &[Sample], timestamp: i64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }
    let after = samples.partition_point(|s| s.timestamp <= timestamp);
    Some(after.saturating_sub(1))
}
