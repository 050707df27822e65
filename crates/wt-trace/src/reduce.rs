use wt_core::{ImageView, Point2u};

/// Reduces a binary mask to at most one point per column.
///
/// Each column with any foreground contributes `(x, y)` where `y` is the
/// median foreground row flipped to a bottom-left origin. Columns without
/// foreground are skipped, so the output is sorted by strictly increasing
/// `x` but may have gaps.
pub fn reduce_columns(mask: &ImageView<'_, u8>) -> Vec<Point2u> {
    let (w, h) = (mask.width(), mask.height());
    let mut points = Vec::new();
    if mask.is_empty() {
        return points;
    }

    let mut rows = Vec::with_capacity(h);
    let mut col = Vec::with_capacity(h);
    for x in 0..w {
        mask.gather_col(x, &mut col);
        rows.clear();
        rows.extend(
            col.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0)
                .map(|(y, _)| y),
        );

        if let Some(row) = median_row(&rows) {
            points.push(Point2u { x, y: h - 1 - row });
        }
    }
    points
}

/// Median of ascending row indices; the lower mean for even counts.
fn median_row(sorted: &[usize]) -> Option<usize> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2),
    }
}

#[cfg(test)]
mod tests {
    use wt_core::{Image, Point2u};

    use super::{median_row, reduce_columns};

    #[test]
    fn empty_mask_gives_no_points() {
        let img = Image::new_fill(8, 6, 0u8);
        assert!(reduce_columns(&img.as_view()).is_empty());

        let none = Image::<u8>::new_fill(0, 0, 0);
        assert!(reduce_columns(&none.as_view()).is_empty());
    }

    #[test]
    fn even_counts_round_down() {
        assert_eq!(median_row(&[3]), Some(3));
        assert_eq!(median_row(&[2, 5, 9]), Some(5));
        assert_eq!(median_row(&[2, 5]), Some(3));
        assert_eq!(median_row(&[1, 2, 7, 8]), Some(4));
        assert_eq!(median_row(&[]), None);
    }

    #[test]
    fn rows_are_flipped_to_bottom_origin() {
        let img = Image::from_fn(3, 10, |x, y| match (x, y) {
            (0, 9) | (2, 0) => 255u8,
            _ => 0,
        });
        let points = reduce_columns(&img.as_view());

        assert_eq!(points, vec![Point2u { x: 0, y: 0 }, Point2u { x: 2, y: 9 }]);
    }

    #[test]
    fn median_ignores_a_stray_blob() {
        // Stroke on rows 4..=6 plus a lone pixel on row 0 in every column.
        let img = Image::from_fn(5, 12, |_, y| if y == 0 || (4..=6).contains(&y) { 255u8 } else { 0 });
        let points = reduce_columns(&img.as_view());

        assert_eq!(points.len(), 5);
        // Rows [0, 4, 5, 6]: (4 + 5) / 2 = 4, flipped to 11 - 4.
        assert!(points.iter().all(|p| p.y == 7));
        assert!(points.windows(2).all(|w| w[0].x < w[1].x));
    }
}
