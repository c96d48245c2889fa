use crate::{Result, Series, TrackSnapshot};

/// Anything that turns one host data frame into a snapshot.
///
/// Host adapters depend on this trait instead of on [`crate::TrackBuilder`]
/// directly, which keeps the core free of host lifecycle types.
pub trait TrackProvider {
    /// Builds a snapshot from the series of one data-received event.
    ///
    /// Returns [`crate::TrackError::InsufficientData`] when the frame holds
    /// too few usable rows; callers fall back to the world view.
    fn build_snapshot(&self, series: &[Series]) -> Result<TrackSnapshot>;
}
