//! Umbrella crate for the `waveform-trace` workspace.
//!
//! Re-exports the core raster types and the lane-level API. The filter,
//! morphology and single-lane trace crates are reachable as modules.

pub use wt_core::*;
pub use wt_lanes::{
    Error, ErrorKind, LaneExtractor, LaneTrace, LayoutConfig, RegionName, resize_rgb8, resize_u8,
};
pub use wt_trace::{
    GridSuppressConfig, SuppressionStages, normalize_points, reduce_columns, suppress_grid_rgb8,
    suppress_grid_stages_u8, suppress_grid_u8,
};

pub use wt_filter as filter;
pub use wt_morph as morph;
pub use wt_trace as trace;
