use core::fmt;

use wt_core::Region;

/// Which configured region an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionName {
    Canvas,
    Lane(usize),
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas => write!(f, "canvas"),
            Self::Lane(i) => write!(f, "lane {i}"),
        }
    }
}

/// Coarse classification used by callers to decide who has to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The layout or filter parameters are unusable.
    Config,
    /// The supplied page cannot be processed.
    Input,
    /// A computed quantity is undefined for the given geometry.
    Domain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidPageSize {
        width: usize,
        height: usize,
    },
    EmptyRegion {
        name: RegionName,
        region: Region,
    },
    RegionOutsidePage {
        name: RegionName,
        region: Region,
        page_width: usize,
        page_height: usize,
    },
    LaneOutsideCanvas {
        index: usize,
        lane: Region,
        canvas: Region,
    },
    EmptyInput {
        width: usize,
        height: usize,
    },
    PageTooLarge {
        width: usize,
        height: usize,
    },
    Trace(wt_trace::Error),
    Raster(wt_core::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPageSize { .. }
            | Self::EmptyRegion { .. }
            | Self::RegionOutsidePage { .. }
            | Self::LaneOutsideCanvas { .. } => ErrorKind::Config,
            Self::Trace(wt_trace::Error::InvalidParameter { .. }) => ErrorKind::Config,
            Self::Trace(wt_trace::Error::DegenerateRegion { .. }) => ErrorKind::Domain,
            Self::EmptyInput { .. } | Self::PageTooLarge { .. } | Self::Raster(_) => {
                ErrorKind::Input
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPageSize { width, height } => {
                write!(f, "page size {width}x{height} must be positive")
            }
            Self::EmptyRegion { name, region } => {
                write!(f, "{name} {region} has zero width or height")
            }
            Self::RegionOutsidePage {
                name,
                region,
                page_width,
                page_height,
            } => write!(
                f,
                "{name} {region} exceeds the {page_width}x{page_height} page"
            ),
            Self::LaneOutsideCanvas {
                index,
                lane,
                canvas,
            } => write!(f, "lane {index} {lane} is not inside canvas {canvas}"),
            Self::EmptyInput { width, height } => {
                write!(f, "cannot resample a {width}x{height} page")
            }
            Self::PageTooLarge { width, height } => {
                write!(f, "page {width}x{height} exceeds the resampler's limits")
            }
            Self::Trace(err) => write!(f, "{err}"),
            Self::Raster(err) => write!(f, "raster: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Trace(err) => Some(err),
            Self::Raster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<wt_trace::Error> for Error {
    fn from(err: wt_trace::Error) -> Self {
        Self::Trace(err)
    }
}

impl From<wt_core::Error> for Error {
    fn from(err: wt_core::Error) -> Self {
        Self::Raster(err)
    }
}
