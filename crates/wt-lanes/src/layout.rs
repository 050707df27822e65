use wt_core::Region;

use crate::{Error, RegionName};

/// Canonical page geometry: page size, canvas and ordered lanes.
///
/// Invariants, checked by [`LayoutConfig::new`]:
/// - both page dimensions are positive;
/// - the canvas and every lane are non-empty and inside the page;
/// - every lane is inside the canvas.
///
/// Lane order is the output order of extraction. Lanes may touch or overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    page_width: usize,
    page_height: usize,
    canvas: Region,
    lanes: Vec<Region>,
}

/// A4 landscape at 300 dpi.
const A4_PAGE: (usize, usize) = (3508, 2480);
const A4_CANVAS: Region = Region::new(380, 450, 3333, 1808);
const A4_LANE_ROWS: [(usize, usize); 6] = [
    (450, 630),
    (630, 870),
    (870, 1160),
    (1160, 1330),
    (1330, 1560),
    (1560, 1808),
];

impl LayoutConfig {
    pub fn new(
        page_width: usize,
        page_height: usize,
        canvas: Region,
        lanes: Vec<Region>,
    ) -> Result<Self, Error> {
        if page_width == 0 || page_height == 0 {
            return Err(Error::InvalidPageSize {
                width: page_width,
                height: page_height,
            });
        }

        check_on_page(RegionName::Canvas, &canvas, page_width, page_height)?;
        for (index, lane) in lanes.iter().enumerate() {
            check_on_page(RegionName::Lane(index), lane, page_width, page_height)?;
            if !canvas.contains(lane) {
                return Err(Error::LaneOutsideCanvas {
                    index,
                    lane: *lane,
                    canvas,
                });
            }
        }

        Ok(Self {
            page_width,
            page_height,
            canvas,
            lanes,
        })
    }

    pub fn page_width(&self) -> usize {
        self.page_width
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn page_size(&self) -> (usize, usize) {
        (self.page_width, self.page_height)
    }

    pub fn canvas(&self) -> &Region {
        &self.canvas
    }

    pub fn lanes(&self) -> &[Region] {
        &self.lanes
    }

    /// `lane` shifted into canvas-local coordinates.
    pub(crate) fn canvas_relative(&self, lane: &Region) -> Region {
        Region::new(
            lane.left - self.canvas.left,
            lane.top - self.canvas.top,
            lane.right - self.canvas.left,
            lane.bottom - self.canvas.top,
        )
    }
}

impl Default for LayoutConfig {
    /// Six stacked lanes spanning the canvas width on an A4 landscape page.
    fn default() -> Self {
        Self {
            page_width: A4_PAGE.0,
            page_height: A4_PAGE.1,
            canvas: A4_CANVAS,
            lanes: A4_LANE_ROWS
                .iter()
                .map(|&(top, bottom)| Region::new(A4_CANVAS.left, top, A4_CANVAS.right, bottom))
                .collect(),
        }
    }
}

fn check_on_page(
    name: RegionName,
    region: &Region,
    page_width: usize,
    page_height: usize,
) -> Result<(), Error> {
    if region.is_empty() {
        return Err(Error::EmptyRegion {
            name,
            region: *region,
        });
    }
    if !region.fits_within(page_width, page_height) {
        return Err(Error::RegionOutsidePage {
            name,
            region: *region,
            page_width,
            page_height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wt_core::Region;

    use super::LayoutConfig;
    use crate::{Error, ErrorKind, RegionName};

    #[test]
    fn default_layout_is_valid() {
        let layout = LayoutConfig::default();
        let rebuilt = LayoutConfig::new(
            layout.page_width(),
            layout.page_height(),
            *layout.canvas(),
            layout.lanes().to_vec(),
        )
        .expect("default layout validates");

        assert_eq!(rebuilt, layout);
        assert_eq!(layout.page_size(), (3508, 2480));
        assert_eq!(layout.lanes().len(), 6);
        assert_eq!(layout.lanes()[0], Region::new(380, 450, 3333, 630));
        assert_eq!(layout.lanes()[5].bottom, layout.canvas().bottom);
        assert!(layout.lanes().windows(2).all(|w| w[0].bottom == w[1].top));
    }

    #[test]
    fn lane_poking_out_of_canvas_is_rejected() {
        let canvas = Region::new(10, 10, 90, 90);
        let lanes = vec![Region::new(10, 10, 90, 50), Region::new(5, 50, 90, 90)];

        let err = LayoutConfig::new(100, 100, canvas, lanes).expect_err("lane 1 escapes");
        assert_eq!(
            err,
            Error::LaneOutsideCanvas {
                index: 1,
                lane: Region::new(5, 50, 90, 90),
                canvas,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn regions_must_fit_on_the_page() {
        let err = LayoutConfig::new(100, 100, Region::new(0, 0, 101, 50), vec![])
            .expect_err("canvas too wide");
        assert!(matches!(
            err,
            Error::RegionOutsidePage {
                name: RegionName::Canvas,
                ..
            }
        ));

        let canvas = Region::new(0, 0, 100, 100);
        assert!(LayoutConfig::new(100, 100, canvas, vec![canvas]).is_ok());
    }

    #[test]
    fn zero_page_is_rejected() {
        let err = LayoutConfig::new(0, 2480, Region::new(0, 0, 1, 1), vec![])
            .expect_err("zero width");
        assert_eq!(
            err,
            Error::InvalidPageSize {
                width: 0,
                height: 2480
            }
        );
    }

    #[test]
    fn inverted_lane_is_rejected() {
        let canvas = Region::new(0, 0, 50, 50);
        let err = LayoutConfig::new(50, 50, canvas, vec![Region::new(0, 30, 50, 20)])
            .expect_err("bottom above top");
        assert!(matches!(
            err,
            Error::EmptyRegion {
                name: RegionName::Lane(0),
                ..
            }
        ));
        assert!(err.to_string().starts_with("lane 0"));
    }
}
