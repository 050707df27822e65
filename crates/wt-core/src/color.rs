use crate::image::{Image, ImageView};

pub type Rgb8 = [u8; 3];

// BT.601 weights scaled by 2^14; they sum to exactly 1 << 14.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Luminance of an RGB pixel, rounded to nearest.
#[inline]
pub fn luma_bt601(px: Rgb8) -> u8 {
    let [r, g, b] = px;
    let acc = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((acc + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

pub fn rgb8_to_gray(src: &ImageView<'_, Rgb8>) -> Image<u8> {
    let mut out = Vec::with_capacity(src.width() * src.height());
    for row in src.rows() {
        out.extend(row.iter().map(|&px| luma_bt601(px)));
    }
    Image::from_vec(src.width(), src.height(), out).expect("gray plane matches source size")
}
