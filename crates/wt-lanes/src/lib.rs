//! Per-lane trace extraction for rasterised chart pages.
//!
//! A [`LayoutConfig`] fixes a canonical page size, a canvas and an ordered
//! list of lanes in that page's pixel coordinates. [`LaneExtractor`] resamples
//! incoming pages to the canonical size, crops every lane and runs the grid
//! suppression filter and column reducer from `wt-trace` on it.
//!
//! Enable the `parallel` feature to process lanes on the rayon pool. Results
//! are identical to the sequential path.

mod error;
mod extract;
mod layout;
mod resample;

pub use error::{Error, ErrorKind, RegionName};
pub use extract::{LaneExtractor, LaneTrace};
pub use layout::LayoutConfig;
pub use resample::{resize_rgb8, resize_u8};
