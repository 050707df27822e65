use wt_core::{BorderMode, Image, ImageView, pad_line};

pub fn invert_u8(src: &ImageView<'_, u8>) -> Image<u8> {
    let mut out = Vec::with_capacity(src.width() * src.height());
    for row in src.rows() {
        out.extend(row.iter().map(|&v| 255 - v));
    }
    Image::from_vec(src.width(), src.height(), out).expect("inverted plane matches source size")
}

/// Mean over a `block x block` window with replicated borders, rounded to nearest.
pub fn box_mean_u8(src: &ImageView<'_, u8>, block: usize) -> Image<u8> {
    assert!(block % 2 == 1, "block size must be odd, got {block}");

    let (w, h) = (src.width(), src.height());
    if src.is_empty() {
        return Image::new_fill(w, h, 0u8);
    }

    let radius = block / 2;
    let mut row_sums = vec![0u32; w * h];
    let mut line = Vec::with_capacity(w.max(h));
    for (y, row) in src.rows().enumerate() {
        line.clear();
        line.extend(row.iter().map(|&v| v as u32));
        window_sums(&line, radius, &mut row_sums[y * w..(y + 1) * w]);
    }

    let area = (block * block) as u32;
    let mut out = vec![0u8; w * h];
    let mut col_sums = vec![0u32; h];
    for x in 0..w {
        line.clear();
        line.extend((0..h).map(|y| row_sums[y * w + x]));
        window_sums(&line, radius, &mut col_sums);
        for (y, &s) in col_sums.iter().enumerate() {
            out[y * w + x] = ((s + area / 2) / area) as u8;
        }
    }

    Image::from_vec(w, h, out).expect("mean plane matches source size")
}

/// Marks pixels brighter than their local mean by more than `-offset`.
///
/// Output is `255` where `src > mean - offset`, `0` elsewhere. A negative
/// offset demands a margin above the mean; the tuned value for ruled chart
/// paper is `-5` with a 35 pixel block.
pub fn adaptive_threshold_mean_u8(src: &ImageView<'_, u8>, block: usize, offset: i32) -> Image<u8> {
    let mean = box_mean_u8(src, block);
    let mut out = Vec::with_capacity(src.width() * src.height());
    for (row, mean_row) in src.rows().zip(mean.data().chunks_exact(src.width().max(1))) {
        out.extend(row.iter().zip(mean_row).map(|(&v, &m)| {
            if v as i32 > m as i32 - offset {
                255u8
            } else {
                0u8
            }
        }));
    }
    Image::from_vec(src.width(), src.height(), out).expect("mask matches source size")
}

/// Sliding sums over `[i - radius, i + radius]` with clamped indices.
fn window_sums(line: &[u32], radius: usize, out: &mut [u32]) {
    debug_assert_eq!(line.len(), out.len());
    let padded = pad_line(line, radius, radius, BorderMode::Clamp);

    let mut prefix = Vec::with_capacity(padded.len() + 1);
    prefix.push(0u32);
    let mut acc = 0u32;
    for &v in &padded {
        acc += v;
        prefix.push(acc);
    }

    let span = 2 * radius + 1;
    for (i, out_i) in out.iter_mut().enumerate() {
        *out_i = prefix[i + span] - prefix[i];
    }
}
