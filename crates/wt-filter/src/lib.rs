//! Neighborhood filters that turn a chart crop into a foreground mask.
//!
//! Filters take borrowed views, so a lane can be filtered straight out of the
//! page, and return packed images of the same size.
//!
//! The defaults mirror widely used OpenCV behavior so tuned constants carry
//! over: Gaussian smoothing uses reflect-101 borders and the fixed binomial
//! kernels for small sizes, the box mean replicates edge pixels.

pub mod conv;
pub mod kernels;
pub mod threshold;

pub use conv::{convolve_f32, gaussian_blur_u8};
pub use kernels::GaussianKernel1D;
pub use threshold::{adaptive_threshold_mean_u8, box_mean_u8, invert_u8};
