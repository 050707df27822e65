//! Binary morphology helpers.
//!
//! Pixels are treated as binary with threshold `> 0`.
//! Outputs are `0` or `255` in `u8`.
//!
//! Structuring elements are filled rectangles of `kw x kh` pixels anchored at
//! `(kw / 2, kh / 2)`. Pixels outside the image never constrain an erosion and
//! never feed a dilation, so a line that runs into the border is not shortened
//! by it. Rectangles are separable; each pass is a running count over one
//! line, so cost does not grow with the element size.

use wt_core::{Image, ImageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Erode,
    Dilate,
}

pub fn erode_rect_binary_u8(src: &ImageView<'_, u8>, kw: usize, kh: usize) -> Image<u8> {
    morph_rect(src, kw, kh, Sweep::Erode)
}

pub fn dilate_rect_binary_u8(src: &ImageView<'_, u8>, kw: usize, kh: usize) -> Image<u8> {
    morph_rect(src, kw, kh, Sweep::Dilate)
}

/// Keeps only foreground that a `kw x kh` rectangle fits inside.
pub fn open_rect_binary_u8(src: &ImageView<'_, u8>, kw: usize, kh: usize) -> Image<u8> {
    let eroded = erode_rect_binary_u8(src, kw, kh);
    dilate_rect_binary_u8(&eroded.as_view(), kw, kh)
}

/// Fills gaps and holes narrower than a `kw x kh` rectangle.
pub fn close_rect_binary_u8(src: &ImageView<'_, u8>, kw: usize, kh: usize) -> Image<u8> {
    let dilated = dilate_rect_binary_u8(src, kw, kh);
    erode_rect_binary_u8(&dilated.as_view(), kw, kh)
}

/// 3x3 median of a binary mask with replicated borders.
///
/// On binary input the median is a majority vote: a pixel is set iff at
/// least 5 of its 9 neighbors are set.
pub fn median3x3_binary_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    let (w, h) = (src.width(), src.height());
    if src.is_empty() {
        return Image::new_fill(w, h, 0u8);
    }

    Image::from_fn(w, h, |x, y| {
        let mut count = 0usize;
        for ny in [y.saturating_sub(1), y, (y + 1).min(h - 1)] {
            let row = src.row(ny);
            for nx in [x.saturating_sub(1), x, (x + 1).min(w - 1)] {
                if row[nx] != 0 {
                    count += 1;
                }
            }
        }
        if count >= 5 { 255 } else { 0 }
    })
}

/// Pixels set in `a` and clear in `b`.
pub fn subtract_binary_u8(a: &ImageView<'_, u8>, b: &ImageView<'_, u8>) -> Image<u8> {
    combine(a, b, |pa, pb| pa && !pb)
}

pub fn union_binary_u8(a: &ImageView<'_, u8>, b: &ImageView<'_, u8>) -> Image<u8> {
    combine(a, b, |pa, pb| pa || pb)
}

pub fn count_foreground(src: &ImageView<'_, u8>) -> usize {
    src.rows()
        .map(|row| row.iter().filter(|&&v| v != 0).count())
        .sum()
}

fn combine(
    a: &ImageView<'_, u8>,
    b: &ImageView<'_, u8>,
    op: impl Fn(bool, bool) -> bool,
) -> Image<u8> {
    assert_eq!(
        (a.width(), a.height()),
        (b.width(), b.height()),
        "binary operands must have equal dimensions"
    );

    let mut out = Vec::with_capacity(a.width() * a.height());
    for (ra, rb) in a.rows().zip(b.rows()) {
        out.extend(
            ra.iter()
                .zip(rb)
                .map(|(&pa, &pb)| if op(pa != 0, pb != 0) { 255u8 } else { 0 }),
        );
    }
    Image::from_vec(a.width(), a.height(), out).expect("combined mask matches operand size")
}

fn morph_rect(src: &ImageView<'_, u8>, kw: usize, kh: usize, sweep: Sweep) -> Image<u8> {
    assert!(kw > 0 && kh > 0, "structuring element must be non-empty");

    let (w, h) = (src.width(), src.height());
    let mut data = Vec::with_capacity(w * h);
    for row in src.rows() {
        data.extend(row.iter().map(|&v| if v != 0 { 255u8 } else { 0 }));
    }
    if w == 0 || h == 0 {
        return Image::from_vec(w, h, data).expect("empty image");
    }

    let mut line = Vec::with_capacity(w.max(h));
    let mut swept = vec![0u8; w.max(h)];

    if kw > 1 {
        for y in 0..h {
            let row = &mut data[y * w..(y + 1) * w];
            line.clear();
            line.extend_from_slice(row);
            sweep_line(&line, kw, sweep, &mut swept[..w]);
            row.copy_from_slice(&swept[..w]);
        }
    }

    if kh > 1 {
        for x in 0..w {
            line.clear();
            line.extend((0..h).map(|y| data[y * w + x]));
            sweep_line(&line, kh, sweep, &mut swept[..h]);
            for (y, &v) in swept[..h].iter().enumerate() {
                data[y * w + x] = v;
            }
        }
    }

    Image::from_vec(w, h, data).expect("morphology output matches source size")
}

/// One separable pass of a length-`k` segment along `line`.
///
/// The window for index `i` is `[i - k/2, i - k/2 + k)` clipped to the line.
fn sweep_line(line: &[u8], k: usize, sweep: Sweep, out: &mut [u8]) {
    debug_assert_eq!(line.len(), out.len());

    let n = line.len();
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0usize);
    let mut acc = 0usize;
    for &v in line {
        acc += usize::from(v != 0);
        prefix.push(acc);
    }

    let anchor = k / 2;
    for (i, out_i) in out.iter_mut().enumerate() {
        let lo = i.saturating_sub(anchor);
        let hi = (i + k - anchor).min(n);
        let set = prefix[hi] - prefix[lo];
        let keep = match sweep {
            Sweep::Erode => set == hi - lo,
            Sweep::Dilate => set > 0,
        };
        *out_i = if keep { 255 } else { 0 };
    }
}
