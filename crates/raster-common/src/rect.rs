//! Rectangles in pixel space.
//!
//! Rows grow downwards, so `y` is the top edge and `y + height` the bottom.

use serde::{Deserialize, Serialize};

/// A rectangle of whole pixels.
///
/// Coordinates are signed: a source may start left of or above the
/// composite origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of pixels, zero for empty rectangles.
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width * self.height
        }
    }

    /// Overlapping pixels of two rectangles; an empty default when disjoint.
    pub fn intersection(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return PixelRect::default();
        }
        PixelRect::new(x, y, right - x, bottom - y)
    }

    /// Same rectangle expressed relative to `(origin_x, origin_y)`.
    pub fn relative_to(&self, origin_x: i64, origin_y: i64) -> PixelRect {
        PixelRect::new(self.x - origin_x, self.y - origin_y, self.width, self.height)
    }

    /// Width and height as `usize`, zero for empty rectangles.
    pub fn dimensions(&self) -> (usize, usize) {
        if self.is_empty() {
            (0, 0)
        } else {
            (self.width as usize, self.height as usize)
        }
    }
}

impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}x{} at {},{}]", self.width, self.height, self.x, self.y)
    }
}

/// A rectangle with fractional pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect2d {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect2d {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `(cx, cy)`.
    ///
    /// Width and height are those of the edges actually representable
    /// around the center, so a very small rectangle far from the origin
    /// collapses to zero size.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        let (x0, x1) = (cx - width / 2.0, cx + width / 2.0);
        let (y0, y1) = (cy - height / 2.0, cy + height / 2.0);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// Length of the horizontal span shared with another rectangle.
    pub fn overlap_x(&self, other: &Rect2d) -> f64 {
        (self.right().min(other.right()) - self.x.max(other.x)).max(0.0)
    }

    /// Length of the vertical span shared with another rectangle.
    pub fn overlap_y(&self, other: &Rect2d) -> f64 {
        (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0)
    }

    /// True if the point lies strictly inside (never on an edge).
    pub fn contains_strict(&self, px: f64, py: f64) -> bool {
        px > self.x && px < self.right() && py > self.y && py < self.bottom()
    }
}

impl std::fmt::Display for Rect2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}x{} at {},{}]", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_intersection() {
        let a = PixelRect::new(0, 0, 10, 10);
        let b = PixelRect::new(5, -3, 10, 5);
        assert_eq!(a.intersection(&b), PixelRect::new(5, 0, 5, 2));
        assert_eq!(b.intersection(&a), PixelRect::new(5, 0, 5, 2));
    }

    #[test]
    fn test_pixel_rect_disjoint_is_empty() {
        let a = PixelRect::new(0, 0, 10, 10);
        let b = PixelRect::new(10, 0, 5, 5);
        let roi = a.intersection(&b);
        assert!(roi.is_empty());
        assert_eq!(roi.area(), 0);
    }

    #[test]
    fn test_rect2d_overlap_spans() {
        let a = Rect2d::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect2d::new(3.0, 2.0, 4.0, 4.0);
        assert_eq!(a.overlap_x(&b), 1.0);
        assert_eq!(a.overlap_y(&b), 2.0);
        assert_eq!(a.overlap_x(&Rect2d::new(5.0, 0.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_centered_collapses_below_precision() {
        let r = Rect2d::centered(2.5, 6.5, 2e-200, 2e-200);
        assert_eq!(r.area(), 0.0);
        let r = Rect2d::centered(0.0, 0.0, 2e-200, 2e-200);
        assert!(r.width > 0.0);
    }

    #[test]
    fn test_rect2d_contains_strict() {
        let r = Rect2d::new(0.0, 0.0, 2.0, 2.0);
        assert!(r.contains_strict(0.5, 1.5));
        assert!(!r.contains_strict(0.0, 1.0));
        assert!(!r.contains_strict(2.0, 1.0));
    }

    #[test]
    fn test_centered() {
        let r = Rect2d::centered(5.5, 2.5, 4.0, 2.0);
        assert_eq!(r, Rect2d::new(3.5, 1.5, 4.0, 2.0));
    }
}
