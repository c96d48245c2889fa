//! Error types for the track crate.

use thiserror::Error;

/// Result type alias for track operations.
pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors that can occur while building or querying a track.
///
/// Dirty data values never produce an error: invalid rows are skipped and
/// only show up in [`crate::BuildStats`]. Errors are reserved for too little
/// usable data and for input whose shape breaks the host contract.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Fewer valid rows than needed to draw a track
    #[error("Insufficient data: {valid_rows} valid rows, need at least {required}")]
    InsufficientData {
        /// Rows that passed validation
        valid_rows: usize,
        /// Minimum configured in the build options
        required: usize,
    },

    /// Wrong number of series for the configured columns
    #[error("Expected {expected} series, got {actual}")]
    SeriesCount {
        /// Series count implied by the build options
        expected: usize,
        /// Series count delivered by the host
        actual: usize,
    },

    /// Series of different lengths
    #[error("Series '{series}' has {actual} datapoints, expected {expected}")]
    LengthMismatch {
        /// Target name of the offending series
        series: String,
        /// Length of the latitude series
        expected: usize,
        /// Length of the offending series
        actual: usize,
    },

    /// Panel options that cannot be used
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// JSON parsing error at the host boundary
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Numeric error code for hosts that cannot match on the enum.
/// Range: 11xxx for track errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackErrorCode {
    /// Fewer valid rows than required
    InsufficientData = 11001,
    /// Wrong series count
    SeriesCount = 11002,
    /// Mismatched series lengths
    LengthMismatch = 11003,
    /// Invalid panel options
    InvalidOptions = 11004,
    /// JSON parsing error
    JsonParsing = 11005,
}

impl TrackError {
    /// Returns the error code for this error.
    pub fn code(&self) -> TrackErrorCode {
        match self {
            TrackError::InsufficientData { .. } => TrackErrorCode::InsufficientData,
            TrackError::SeriesCount { .. } => TrackErrorCode::SeriesCount,
            TrackError::LengthMismatch { .. } => TrackErrorCode::LengthMismatch,
            TrackError::InvalidOptions(_) => TrackErrorCode::InvalidOptions,
            TrackError::JsonError(_) => TrackErrorCode::JsonParsing,
        }
    }

    /// Returns true when the caller should fall back to the default world
    /// view instead of reporting a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrackError::InsufficientData { .. })
    }
}
