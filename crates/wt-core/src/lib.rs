//! Foundational primitives for extracting traces from rasterised chart pages.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! Cropping a lane out of a page is a zero-copy [`ImageView::subview`].
//!
//! ## Pixels
//! Color pages use [`Rgb8`] (`[r, g, b]`); intensity planes and masks use
//! `u8`. Masks are binary by convention: `0` is background, anything else is
//! foreground, and producers write `255`.
//!
//! ## Regions
//! A [`Region`] is a half-open rectangle `[left, right) x [top, bottom)` in
//! page pixel coordinates.
//!
//! ## Border Modes
//! Neighborhood filters extend lines with clamp (replicate) or reflect-101
//! behavior. Reflect-101 mirrors around edge pixels without repeating them.

mod border;
mod color;
mod error;
mod geom;
mod image;
mod region;

pub use border::{BorderMode, map_index, pad_line};
pub use color::{Rgb8, luma_bt601, rgb8_to_gray};
pub use error::Error;
pub use geom::{Point2f, Point2u};
pub use image::{Image, ImageView};
pub use region::Region;
