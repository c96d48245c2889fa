//! Track geometry and time indexing for vessel track map panels.
//!
//! This crate provides:
//! - Column ingestion with per-row validation (`Columns`, `Series`)
//! - The Track Builder, which splits legs crossing ±180° (`TrackBuilder`)
//! - Nearest-sample lookup by timestamp (`TrackIndex`)
//! - Box-zoom time ranges, hover sync and render planning
//! - WASM bindings for the dashboard panel (feature `wasm`)
//!
//! # Example
//!
//! ```
//! use trackmap_track::{Datapoint, Series, TrackBuilder, TrackIndex};
//!
//! let column = |name: &str, values: [f64; 3]| {
//!     Series::new(name, values.iter().zip([1000, 2000, 3000])
//!         .map(|(v, t)| Datapoint::number(*v, t))
//!         .collect())
//! };
//! let series = vec![
//!     column("lat", [10.0, 10.0, 10.0]),
//!     column("lon", [20.0, 170.0, -170.0]),
//!     column("heading", [0.0, 0.0, 0.0]),
//!     column("wind", [0.0, 0.0, 0.0]),
//! ];
//!
//! let snapshot = TrackBuilder::default().build_from_series(&series).unwrap();
//! assert_eq!(snapshot.segment_count(), 2);
//!
//! let index = TrackIndex::new(snapshot);
//! assert_eq!(index.nearest_at_or_before(2600), Some(3));
//! ```

mod builder;
mod columns;
mod error;
mod hover;
mod index;
mod options;
mod provider;
mod render;
mod sample;
mod selection;
mod session;
mod snapshot;

#[cfg(feature = "wasm")]
mod wasm;

pub use builder::{BuildOptions, BuildStats, TrackBuilder, MIN_VALID_ROWS};
pub use columns::{Columns, Datapoint, Row, Series, SkipReason, REQUIRED_SERIES};
pub use error::{Result, TrackError, TrackErrorCode};
pub use hover::{HoverSync, HoverUpdate};
pub use index::{nearest_at_or_before, TrackIndex};
pub use options::{PanelOptions, TileLayer};
pub use provider::TrackProvider;
pub use render::{Polyline, RenderPlan, VesselMarker, Viewport};
pub use sample::Sample;
pub use selection::{time_range_in_bounds, TimeRange};
pub use session::TrackSession;
pub use snapshot::TrackSnapshot;
