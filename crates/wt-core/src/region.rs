use core::fmt;

use crate::Error;
use crate::image::ImageView;

/// Half-open rectangle `[left, right) x [top, bottom)` in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Region {
    pub const fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Zero when `right <= left`.
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    /// Zero when `bottom <= top`.
    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// True when the region is non-empty and lies inside `[0, width) x [0, height)`.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        !self.is_empty() && self.right <= width && self.bottom <= height
    }

    /// True when `inner` lies entirely inside `self`; shared edges count as inside.
    pub fn contains(&self, inner: &Region) -> bool {
        self.left <= inner.left
            && inner.left <= inner.right
            && inner.right <= self.right
            && self.top <= inner.top
            && inner.top <= inner.bottom
            && inner.bottom <= self.bottom
    }

    /// Borrows the pixels covered by this region.
    pub fn crop<'a, T>(&self, img: &ImageView<'a, T>) -> Result<ImageView<'a, T>, Error> {
        if self.is_empty() {
            return Err(Error::EmptyRegion(*self));
        }
        img.subview(self.left, self.top, self.width(), self.height())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.left, self.right, self.top, self.bottom
        )
    }
}
