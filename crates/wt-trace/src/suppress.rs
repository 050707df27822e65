use log::{Level, debug, log_enabled};
use wt_core::{Image, ImageView, Rgb8, rgb8_to_gray};
use wt_filter::{GaussianKernel1D, adaptive_threshold_mean_u8, gaussian_blur_u8, invert_u8};
use wt_morph::{
    close_rect_binary_u8, count_foreground, median3x3_binary_u8, open_rect_binary_u8,
    subtract_binary_u8, union_binary_u8,
};

use crate::Error;

/// Tuning of the grid suppression filter.
///
/// Defaults are tuned for pages rendered at 3508x2480 with a ruled grid of a
/// few pixels pitch per millimetre. Scale the sizes with the page resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSuppressConfig {
    /// Gaussian pre-smoothing size (odd); sigma is derived from it.
    pub blur_ksize: usize,
    /// Adaptive threshold window (odd, >= 3).
    pub threshold_block: usize,
    /// Constant subtracted from the local mean; negative raises the bar.
    pub threshold_offset: i32,
    /// Length of the segment a ruling must hold along its axis.
    pub ruling_len: usize,
    /// Square opening that removes isolated specks.
    pub open_size: usize,
    /// Square closing that bridges gaps left by the subtraction.
    pub close_size: usize,
}

impl Default for GridSuppressConfig {
    fn default() -> Self {
        Self {
            blur_ksize: 5,
            threshold_block: 35,
            threshold_offset: -5,
            ruling_len: 61,
            open_size: 3,
            close_size: 5,
        }
    }
}

impl GridSuppressConfig {
    pub fn validate(&self) -> Result<(), Error> {
        check_odd("blur_ksize", self.blur_ksize, 1)?;
        check_odd("threshold_block", self.threshold_block, 3)?;
        check_odd("ruling_len", self.ruling_len, 3)?;
        check_odd("open_size", self.open_size, 1)?;
        check_odd("close_size", self.close_size, 1)?;
        Ok(())
    }
}

fn check_odd(name: &'static str, value: usize, min: usize) -> Result<(), Error> {
    if value < min || value % 2 == 0 {
        return Err(Error::InvalidParameter {
            name,
            value,
            requirement: if min > 1 {
                "odd and at least 3"
            } else {
                "odd and positive"
            },
        });
    }
    Ok(())
}

/// Intermediate masks of one suppression run, all the size of the input crop.
#[derive(Debug, Clone)]
pub struct SuppressionStages {
    /// Adaptive threshold output: curve, grid and noise.
    pub binary: Image<u8>,
    /// Union of the horizontal and vertical rulings found in `binary`.
    pub grid: Image<u8>,
    /// `binary` minus `grid`, despeckled.
    pub mask: Image<u8>,
}

pub fn suppress_grid_rgb8(crop: &ImageView<'_, Rgb8>, cfg: &GridSuppressConfig) -> Image<u8> {
    let gray = rgb8_to_gray(crop);
    suppress_grid_u8(&gray.as_view(), cfg)
}

pub fn suppress_grid_u8(gray: &ImageView<'_, u8>, cfg: &GridSuppressConfig) -> Image<u8> {
    suppress_grid_stages_u8(gray, cfg).mask
}

/// Runs the full filter on an intensity crop and keeps the intermediate masks.
///
/// # Panics
/// If `cfg` fails [`GridSuppressConfig::validate`].
pub fn suppress_grid_stages_u8(
    gray: &ImageView<'_, u8>,
    cfg: &GridSuppressConfig,
) -> SuppressionStages {
    if let Err(err) = cfg.validate() {
        panic!("grid suppression config rejected: {err}");
    }

    let blurred = gaussian_blur_u8(gray, &GaussianKernel1D::new(cfg.blur_ksize, 0.0));
    let inverted = invert_u8(&blurred.as_view());
    let binary = adaptive_threshold_mean_u8(
        &inverted.as_view(),
        cfg.threshold_block,
        cfg.threshold_offset,
    );

    let horizontal = open_rect_binary_u8(&binary.as_view(), cfg.ruling_len, 1);
    let vertical = open_rect_binary_u8(&binary.as_view(), 1, cfg.ruling_len);
    let grid = union_binary_u8(&horizontal.as_view(), &vertical.as_view());

    let residual = subtract_binary_u8(&binary.as_view(), &grid.as_view());
    let opened = open_rect_binary_u8(&residual.as_view(), cfg.open_size, cfg.open_size);
    let closed = close_rect_binary_u8(&opened.as_view(), cfg.close_size, cfg.close_size);
    let mask = median3x3_binary_u8(&closed.as_view());

    if log_enabled!(Level::Debug) {
        debug!(
            "grid suppression {}x{}: {} thresholded, {} grid, {} kept",
            gray.width(),
            gray.height(),
            count_foreground(&binary.as_view()),
            count_foreground(&grid.as_view()),
            count_foreground(&mask.as_view()),
        );
    }

    SuppressionStages { binary, grid, mask }
}
