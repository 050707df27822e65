use core::fmt;

use crate::Region;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A pixel buffer too short (or too long, for owned images) for its shape.
    BufferLength {
        width: usize,
        height: usize,
        len: usize,
    },
    /// Row pitch smaller than the row width.
    StrideTooShort { width: usize, stride: usize },
    /// A window reaching past the right or bottom edge of its parent.
    WindowOutside {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    EmptyRegion(Region),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferLength { width, height, len } => {
                write!(f, "{len} pixels do not fit a {width}x{height} raster")
            }
            Self::StrideTooShort { width, stride } => {
                write!(f, "stride {stride} is shorter than row width {width}")
            }
            Self::WindowOutside {
                x,
                y,
                width,
                height,
            } => write!(f, "{width}x{height} window at ({x}, {y}) leaves the raster"),
            Self::EmptyRegion(region) => write!(f, "region {region} is empty"),
        }
    }
}

impl std::error::Error for Error {}
