use crate::Error;

/// Owned raster with rows packed back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    pixels: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, pixels: Vec<T>) -> Result<Self, Error> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(Error::BufferLength {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Evaluates `f(x, y)` for every pixel, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.pixels[y * self.width + x])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            Some(&mut self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            pixels: &self.pixels,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }
}

/// Borrowed window into a raster, `stride` elements between row starts.
///
/// Views are `Copy`; narrowing one with [`ImageView::subview`] never copies
/// pixels.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    pixels: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        pixels: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::StrideTooShort { width, stride });
        }
        match span_len(width, height, stride) {
            Some(needed) if needed <= pixels.len() => Ok(Self {
                width,
                height,
                stride,
                pixels,
            }),
            _ => Err(Error::BufferLength {
                width,
                height,
                len: pixels.len(),
            }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row {y} out of {} rows", self.height);
        let start = y * self.stride;
        &self.pixels[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        (x < self.width && y < self.height).then(|| &self.pixels[y * self.stride + x])
    }

    /// The `width x height` window whose top-left pixel is `(x, y)`.
    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'a, T>, Error> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height);
        if !(fits_x && fits_y) {
            return Err(Error::WindowOutside {
                x,
                y,
                width,
                height,
            });
        }

        let pixels: &'a [T] = if width == 0 || height == 0 {
            &[]
        } else {
            &self.pixels[y * self.stride + x..]
        };
        Ok(ImageView {
            width,
            height,
            stride: self.stride,
            pixels,
        })
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// Packs the visible pixels into an owned image.
    pub fn to_image(&self) -> Image<T> {
        let mut pixels = Vec::with_capacity(self.width * self.height);
        for row in self.rows() {
            pixels.extend_from_slice(row);
        }
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Replaces `out` with column `x`, top to bottom.
    pub fn gather_col(&self, x: usize, out: &mut Vec<T>) {
        assert!(x < self.width, "column {x} out of {} columns", self.width);
        out.clear();
        out.extend((0..self.height).map(|y| self.pixels[y * self.stride + x]));
    }
}

/// Elements spanned from the first pixel to the last, `None` on overflow.
fn span_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    (height - 1).checked_mul(stride)?.checked_add(width)
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView};
    use crate::Error;

    #[test]
    fn padded_rows_are_skipped() {
        let data = vec![1u8, 2, 3, 99, 4, 5, 6, 88];
        let view = ImageView::from_slice(3, 2, 4, &data).expect("valid view");

        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 1), None);
        assert_eq!(view.to_image().data(), &[1, 2, 3, 4, 5, 6]);

        assert_eq!(
            ImageView::from_slice(3, 2, 2, &data).unwrap_err(),
            Error::StrideTooShort {
                width: 3,
                stride: 2
            }
        );
    }

    #[test]
    fn nested_subview_keeps_parent_stride() {
        let page = Image::from_fn(6, 4, |x, y| (10 * y + x) as u8);
        let lane = page.as_view().subview(1, 1, 4, 3).expect("lane inside page");
        let inner = lane.subview(1, 1, 2, 2).expect("inner inside lane");

        assert_eq!(inner.stride(), 6);
        assert_eq!(inner.row(0), &[22, 23]);
        assert_eq!(inner.row(1), &[32, 33]);

        let mut col = Vec::new();
        lane.gather_col(2, &mut col);
        assert_eq!(col, vec![13, 23, 33]);
    }

    #[test]
    fn subview_rejects_overhang() {
        let page = Image::new_fill(5, 5, 0u8);
        assert_eq!(
            page.as_view().subview(3, 0, 3, 1).unwrap_err(),
            Error::WindowOutside {
                x: 3,
                y: 0,
                width: 3,
                height: 1
            }
        );

        let corner = page.as_view().subview(5, 5, 0, 0).expect("empty corner");
        assert!(corner.is_empty());
    }

    #[test]
    fn from_vec_checks_length() {
        assert_eq!(
            Image::from_vec(2, 2, vec![0u8; 3]).unwrap_err(),
            Error::BufferLength {
                width: 2,
                height: 2,
                len: 3
            }
        );
        assert!(Image::<u8>::from_vec(0, 7, Vec::new()).is_ok());
    }
}
