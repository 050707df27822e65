use wt_core::{Point2f, Point2u};

use crate::Error;

/// Maps trace points into the unit square of a `width x height` crop.
///
/// `x / (width - 1)` and `y / (height - 1)`, so the last column and the top
/// row land exactly on `1.0`.
pub fn normalize_points(
    points: &[Point2u],
    width: usize,
    height: usize,
) -> Result<Vec<Point2f>, Error> {
    if width <= 1 || height <= 1 {
        return Err(Error::DegenerateRegion { width, height });
    }

    let sx = (width - 1) as f32;
    let sy = (height - 1) as f32;
    Ok(points
        .iter()
        .map(|p| Point2f {
            x: p.x as f32 / sx,
            y: p.y as f32 / sy,
        })
        .collect())
}
