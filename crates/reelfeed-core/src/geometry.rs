/// Position in viewport coordinates (logical pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True when `other` is more than `threshold` away on either axis.
    pub fn exceeds(self, other: Point, threshold: f32) -> bool {
        (other.x - self.x).abs() > threshold || (other.y - self.y).abs() > threshold
    }
}
