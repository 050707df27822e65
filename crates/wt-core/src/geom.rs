/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point2u {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl From<Point2u> for Point2f {
    fn from(p: Point2u) -> Self {
        Point2f {
            x: p.x as f32,
            y: p.y as f32,
        }
    }
}
