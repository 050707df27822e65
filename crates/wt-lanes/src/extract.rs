use log::{debug, warn};
use wt_core::{Image, ImageView, Point2f, Point2u, Region, Rgb8, rgb8_to_gray};
use wt_trace::{GridSuppressConfig, normalize_points, reduce_columns, suppress_grid_stages_u8};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::resample::{resize_rgb8, resize_u8};
use crate::{Error, LayoutConfig};

/// Extraction output for one configured lane.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneTrace {
    /// Position of the lane in [`LayoutConfig::lanes`].
    pub index: usize,
    /// Lane rectangle in canonical page coordinates.
    pub region: Region,
    /// One point per occupied column, bottom-left origin, crop-relative.
    pub points: Vec<Point2u>,
    /// Final binary mask, the size of the lane crop.
    pub mask: Image<u8>,
    /// Grid estimate, kept only when requested with [`LaneExtractor::keep_grid`].
    pub grid: Option<Image<u8>>,
}

impl LaneTrace {
    /// Points scaled into `[0, 1]` on both axes of the lane.
    pub fn normalized(&self) -> Result<Vec<Point2f>, Error> {
        Ok(normalize_points(
            &self.points,
            self.region.width(),
            self.region.height(),
        )?)
    }
}

/// Runs grid suppression and column reduction over every lane of a page.
///
/// The layout is validated at construction, so extraction only fails on
/// unusable input pages.
#[derive(Debug, Clone)]
pub struct LaneExtractor {
    layout: LayoutConfig,
    filter: GridSuppressConfig,
    keep_grid: bool,
}

impl LaneExtractor {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            filter: GridSuppressConfig::default(),
            keep_grid: false,
        }
    }

    pub fn with_filter(layout: LayoutConfig, filter: GridSuppressConfig) -> Result<Self, Error> {
        filter.validate()?;
        Ok(Self {
            layout,
            filter,
            keep_grid: false,
        })
    }

    /// Also return the grid estimate of every lane.
    pub fn keep_grid(mut self, keep: bool) -> Self {
        self.keep_grid = keep;
        self
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn filter(&self) -> &GridSuppressConfig {
        &self.filter
    }

    /// The page resampled to the layout's canonical size.
    pub fn resample_rgb8(&self, page: &ImageView<'_, Rgb8>) -> Result<Image<Rgb8>, Error> {
        let (w, h) = self.layout.page_size();
        if page.is_empty() {
            return Err(Error::EmptyInput {
                width: page.width(),
                height: page.height(),
            });
        }
        if (page.width(), page.height()) != (w, h) {
            debug!(
                "resampling page {}x{} -> {w}x{h}",
                page.width(),
                page.height()
            );
        }
        resize_rgb8(page, w, h)
    }

    /// Extracts every lane of a color page of any resolution.
    pub fn extract_rgb8(&self, page: &ImageView<'_, Rgb8>) -> Result<Vec<LaneTrace>, Error> {
        let resampled;
        let page = if self.is_canonical(page) {
            *page
        } else {
            resampled = self.resample_rgb8(page)?;
            resampled.as_view()
        };

        let canvas = self.layout.canvas().crop(&page)?;
        let gray = rgb8_to_gray(&canvas);
        self.extract_canvas(&gray.as_view())
    }

    /// Extracts every lane of an intensity page of any resolution.
    pub fn extract_u8(&self, page: &ImageView<'_, u8>) -> Result<Vec<LaneTrace>, Error> {
        let resampled;
        let page = if self.is_canonical(page) {
            *page
        } else {
            if page.is_empty() {
                return Err(Error::EmptyInput {
                    width: page.width(),
                    height: page.height(),
                });
            }
            let (w, h) = self.layout.page_size();
            debug!(
                "resampling page {}x{} -> {w}x{h}",
                page.width(),
                page.height()
            );
            resampled = resize_u8(page, w, h)?;
            resampled.as_view()
        };

        let canvas = self.layout.canvas().crop(&page)?;
        self.extract_canvas(&canvas)
    }

    fn is_canonical<T>(&self, page: &ImageView<'_, T>) -> bool {
        (page.width(), page.height()) == self.layout.page_size()
    }

    fn extract_canvas(&self, canvas: &ImageView<'_, u8>) -> Result<Vec<LaneTrace>, Error> {
        let lanes = self.layout.lanes();

        #[cfg(feature = "parallel")]
        {
            lanes
                .par_iter()
                .enumerate()
                .map(|(index, region)| self.trace_lane(index, region, canvas))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            lanes
                .iter()
                .enumerate()
                .map(|(index, region)| self.trace_lane(index, region, canvas))
                .collect()
        }
    }

    fn trace_lane(
        &self,
        index: usize,
        region: &Region,
        canvas: &ImageView<'_, u8>,
    ) -> Result<LaneTrace, Error> {
        let crop = self.layout.canvas_relative(region).crop(canvas)?;
        let stages = suppress_grid_stages_u8(&crop, &self.filter);
        let points = reduce_columns(&stages.mask.as_view());

        if points.is_empty() {
            warn!("lane {index} {region}: no trace found");
        } else {
            debug!(
                "lane {index} {region}: {} of {} columns traced",
                points.len(),
                region.width()
            );
        }

        Ok(LaneTrace {
            index,
            region: *region,
            points,
            mask: stages.mask,
            grid: self.keep_grid.then_some(stages.grid),
        })
    }
}

#[cfg(test)]
mod tests {
    use wt_core::{Image, Region, Rgb8};
    use wt_trace::GridSuppressConfig;

    use super::LaneExtractor;
    use crate::{Error, ErrorKind, LayoutConfig};

    const PAPER: Rgb8 = [255, 255, 255];
    const INK: Rgb8 = [20, 20, 120];

    fn small_layout() -> LayoutConfig {
        LayoutConfig::new(
            400,
            300,
            Region::new(20, 20, 380, 280),
            vec![Region::new(20, 20, 380, 150), Region::new(20, 150, 380, 280)],
        )
        .expect("valid layout")
    }

    /// Page rows of a straight stroke across lane 0, one per lane column.
    fn diagonal_rows() -> Vec<usize> {
        (0..360)
            .map(|x| (135.0 - 100.0 * x as f64 / 359.0).round() as usize)
            .collect()
    }

    fn page_with_diagonal() -> Image<Rgb8> {
        let rows = diagonal_rows();
        Image::from_fn(400, 300, |x, y| {
            if !(20..380).contains(&x) {
                return PAPER;
            }
            let lx = x - 20;
            let near = |cx: usize| rows[cx].abs_diff(y) <= 1;
            let hit = near(lx)
                || (lx > 0 && near(lx - 1))
                || (lx + 1 < rows.len() && near(lx + 1));
            if hit { INK } else { PAPER }
        })
    }

    #[test]
    fn traces_stroke_and_reports_blank_lane_as_empty() {
        let page = page_with_diagonal();
        let ext = LaneExtractor::new(small_layout());
        let traces = ext.extract_rgb8(&page.as_view()).expect("extract");

        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].index, 0);
        assert_eq!(traces[1].region, Region::new(20, 150, 380, 280));
        assert_eq!((traces[0].mask.width(), traces[0].mask.height()), (360, 130));
        assert!(traces[0].grid.is_none());

        let rows = diagonal_rows();
        let lane0 = &traces[0].points;
        assert_eq!(lane0.len(), 360);
        for p in lane0 {
            let expected = 129 - (rows[p.x] - 20);
            assert!(p.y.abs_diff(expected) <= 2, "column {}: {} vs {expected}", p.x, p.y);
        }

        assert!(traces[1].points.is_empty());
    }

    #[test]
    fn gray_and_color_pages_agree() {
        let page = page_with_diagonal();
        let gray = wt_core::rgb8_to_gray(&page.as_view());
        let ext = LaneExtractor::new(small_layout());

        let from_rgb = ext.extract_rgb8(&page.as_view()).expect("rgb");
        let from_gray = ext.extract_u8(&gray.as_view()).expect("gray");
        assert_eq!(from_rgb, from_gray);
    }

    #[test]
    fn repeated_extraction_is_identical() {
        let page = page_with_diagonal();
        let ext = LaneExtractor::new(small_layout()).keep_grid(true);

        let a = ext.extract_rgb8(&page.as_view()).expect("first");
        let b = ext.extract_rgb8(&page.as_view()).expect("second");
        assert_eq!(a, b);
        assert!(a.iter().all(|t| t.grid.is_some()));
    }

    #[test]
    fn smaller_page_is_resampled_first() {
        let page = page_with_diagonal();
        let half = Image::from_fn(200, 150, |x, y| {
            *page.get(2 * x, 2 * y).expect("inside")
        });
        let ext = LaneExtractor::new(small_layout());

        let resampled = ext.resample_rgb8(&half.as_view()).expect("resample");
        assert_eq!((resampled.width(), resampled.height()), (400, 300));

        let traces = ext.extract_rgb8(&half.as_view()).expect("extract");
        assert_eq!(traces.len(), 2);
        assert_eq!((traces[1].mask.width(), traces[1].mask.height()), (360, 130));
        assert!(!traces[0].points.is_empty());
        assert!(traces[0].points.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn empty_page_is_an_input_error() {
        let page = Image::<Rgb8>::new_fill(0, 0, PAPER);
        let err = LaneExtractor::new(small_layout())
            .extract_rgb8(&page.as_view())
            .expect_err("nothing to extract");

        assert_eq!(err, Error::EmptyInput { width: 0, height: 0 });
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn invalid_filter_is_a_config_error() {
        let filter = GridSuppressConfig {
            ruling_len: 60,
            ..GridSuppressConfig::default()
        };
        let err = LaneExtractor::with_filter(small_layout(), filter).expect_err("even length");
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn normalized_points_stay_in_unit_square() {
        let page = page_with_diagonal();
        let traces = LaneExtractor::new(small_layout())
            .extract_rgb8(&page.as_view())
            .expect("extract");

        let pts = traces[0].normalized().expect("non-degenerate lane");
        assert_eq!(pts.len(), traces[0].points.len());
        assert!(
            pts.iter()
                .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y))
        );
        assert_eq!(pts.last().map(|p| p.x), Some(1.0));
    }

    #[test]
    fn single_column_lane_cannot_be_normalized() {
        let layout = LayoutConfig::new(
            40,
            40,
            Region::new(0, 0, 40, 40),
            vec![Region::new(10, 0, 11, 40)],
        )
        .expect("valid layout");
        let page = Image::new_fill(40, 40, 0u8);
        let traces = LaneExtractor::new(layout)
            .extract_u8(&page.as_view())
            .expect("extract");

        let err = traces[0].normalized().expect_err("one column");
        assert_eq!(err.kind(), ErrorKind::Domain);
    }
}
