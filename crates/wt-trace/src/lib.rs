//! Trace extraction for a single chart lane.
//!
//! Core strategy:
//! - Threshold the inverted, lightly smoothed crop against its local mean so
//!   both the drawn curve and the ruled grid become foreground.
//! - Estimate the grid as everything a long horizontal or vertical segment
//!   fits inside, and subtract it. A hand-drawn curve is rarely axis-aligned
//!   over that length; where it crosses a ruling the crossing is too short to
//!   be taken for one.
//! - Clean speckle, then reduce each column to the median foreground row.
//!
//! Trace points are integer `(x, y)` pairs relative to the lane crop with the
//! origin at the bottom-left: `y = 0` is the bottom row.

mod error;
mod normalize;
mod reduce;
mod suppress;

pub use error::Error;
pub use normalize::normalize_points;
pub use reduce::reduce_columns;
pub use suppress::{
    GridSuppressConfig, SuppressionStages, suppress_grid_rgb8, suppress_grid_stages_u8,
    suppress_grid_u8,
};
