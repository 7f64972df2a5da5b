//! Viewport-aware decimation of distance-indexed sensor traces.
//!
//! A stitched series (several files joined by gap markers) is cut down to
//! the visible range, split at every gap, and each contiguous run is
//! downsampled with LTTB in proportion to its share of a global point
//! budget. See [`reduce`].

pub mod config;
pub mod data;
pub mod processing;
pub mod state;

pub use config::{ReduceConfig, WindowConfig};
pub use processing::reduce::{decimate, reduce, reduce_with_report, Reduction, ReductionReport};
pub use state::point::{Point, Reading, SourceId};
pub use state::viewport::Viewport;
