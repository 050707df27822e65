use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, RgbImage};
use wt_core::{Image, ImageView, Rgb8};

use crate::Error;

/// Resamples a color page to `width x height` with a Lanczos-3 filter.
///
/// A request for the current size returns an untouched copy.
pub fn resize_rgb8(
    src: &ImageView<'_, Rgb8>,
    width: usize,
    height: usize,
) -> Result<Image<Rgb8>, Error> {
    if (src.width(), src.height()) == (width, height) {
        return Ok(src.to_image());
    }
    let (sw, sh) = input_dims(src)?;
    let (dw, dh) = target_dims(width, height)?;

    let mut raw = Vec::with_capacity(src.width() * src.height() * 3);
    for row in src.rows() {
        raw.extend(row.iter().flatten());
    }
    let len = raw.len();
    let buf = RgbImage::from_raw(sw, sh, raw).ok_or(wt_core::Error::BufferLength {
        width: src.width(),
        height: src.height(),
        len,
    })?;

    let out = imageops::resize(&buf, dw, dh, FilterType::Lanczos3);
    let data = out
        .into_raw()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    Ok(Image::from_vec(width, height, data)?)
}

/// Single-channel counterpart of [`resize_rgb8`].
pub fn resize_u8(src: &ImageView<'_, u8>, width: usize, height: usize) -> Result<Image<u8>, Error> {
    if (src.width(), src.height()) == (width, height) {
        return Ok(src.to_image());
    }
    let (sw, sh) = input_dims(src)?;
    let (dw, dh) = target_dims(width, height)?;

    let mut raw = Vec::with_capacity(src.width() * src.height());
    for row in src.rows() {
        raw.extend_from_slice(row);
    }
    let len = raw.len();
    let buf: GrayImage =
        ImageBuffer::from_raw(sw, sh, raw).ok_or(wt_core::Error::BufferLength {
            width: src.width(),
            height: src.height(),
            len,
        })?;

    let out = imageops::resize(&buf, dw, dh, FilterType::Lanczos3);
    Ok(Image::from_vec(width, height, out.into_raw())?)
}

fn input_dims<T>(src: &ImageView<'_, T>) -> Result<(u32, u32), Error> {
    if src.is_empty() {
        return Err(Error::EmptyInput {
            width: src.width(),
            height: src.height(),
        });
    }
    to_u32(src.width(), src.height())
}

fn target_dims(width: usize, height: usize) -> Result<(u32, u32), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidPageSize { width, height });
    }
    to_u32(width, height)
}

fn to_u32(width: usize, height: usize) -> Result<(u32, u32), Error> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::PageTooLarge { width, height }),
    }
}
