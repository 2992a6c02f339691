//! Placement of sources in the composite pixel frame.
//!
//! The composite frame has its origin at the upper-left corner of the
//! aligned output extents; columns grow with world X and rows grow against
//! world Y.

use raster_common::{Extents, GeoTransform, PixelRect, Point2, Rect2d, Resolution};

/// Pixel grid of the composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeFrame {
    /// Aligned output extents in world coordinates.
    pub extents: Extents,
    /// Output pixel size.
    pub resolution: Resolution,
}

impl CompositeFrame {
    /// Snap `requested` outwards onto the pixel grid through `origin`.
    ///
    /// Lower bounds are floored and upper bounds ceiled per axis, relative
    /// to the origin, so every requested point stays covered.
    pub fn aligned(requested: &Extents, origin: Point2, resolution: Resolution) -> Self {
        let snap_down = |v: f64, o: f64, r: f64| ((v - o) / r).floor() * r + o;
        let snap_up = |v: f64, o: f64, r: f64| ((v - o) / r).ceil() * r + o;

        let extents = Extents::new(
            snap_down(requested.min_x, origin.x, resolution.x),
            snap_down(requested.min_y, origin.y, resolution.y),
            snap_up(requested.max_x, origin.x, resolution.x),
            snap_up(requested.max_y, origin.y, resolution.y),
        );

        Self {
            extents,
            resolution,
        }
    }

    /// Output raster size; fractional pixel counts are truncated.
    pub fn size(&self) -> (usize, usize) {
        (
            (self.extents.width() / self.resolution.x) as usize,
            (self.extents.height() / self.resolution.y) as usize,
        )
    }

    /// North-up transform of the composite.
    pub fn geo_transform(&self) -> GeoTransform {
        GeoTransform::north_up(self.extents.upper_left(), self.resolution)
    }

    /// Fractional composite pixel position of a world point.
    pub fn world_to_pixel(&self, p: Point2) -> (f64, f64) {
        let ul = self.extents.upper_left();
        (
            (p.x - ul.x) / self.resolution.x,
            -(p.y - ul.y) / self.resolution.y,
        )
    }

    /// Whole-pixel rectangle a source of `size` pixels occupies, given its
    /// world extents.
    pub fn pixel_extents(&self, world: &Extents, size: (usize, usize)) -> PixelRect {
        let (x, y) = self.world_to_pixel(world.upper_left());
        PixelRect::new(
            x.round() as i64,
            y.round() as i64,
            size.0 as i64,
            size.1 as i64,
        )
    }

    /// Fractional rectangle covered by world extents.
    pub fn pixel_valid(&self, valid: &Extents) -> Rect2d {
        let (x0, y0) = self.world_to_pixel(valid.upper_left());
        let (x1, y1) = self.world_to_pixel(valid.lower_right());
        Rect2d::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// Where one source lands in the composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// World extents of the source's four corners.
    pub world: Extents,
    /// Source pixels in the composite frame.
    pub extents: PixelRect,
    /// Authoritative area in the composite frame.
    pub valid: Rect2d,
}

impl Footprint {
    /// Place a source with the given transform and size in `frame`.
    pub fn compute(
        frame: &CompositeFrame,
        transform: &GeoTransform,
        size: (usize, usize),
        valid: &Extents,
    ) -> Self {
        let world = transform.world_extents(size.0, size.1);
        Self {
            world,
            extents: frame.pixel_extents(&world, size),
            valid: frame.pixel_valid(valid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_snaps_outwards() {
        let frame = CompositeFrame::aligned(
            &Extents::new(0.3, 0.3, 9.7, 9.7),
            Point2::new(0.0, 0.0),
            Resolution::new(1.0, 1.0),
        );
        assert_eq!(frame.extents, Extents::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(frame.size(), (10, 10));
    }

    #[test]
    fn test_alignment_follows_origin_offset() {
        let frame = CompositeFrame::aligned(
            &Extents::new(1.0, 1.0, 4.0, 4.0),
            Point2::new(0.5, 10.5),
            Resolution::new(1.0, 1.0),
        );
        assert_eq!(frame.extents, Extents::new(0.5, 0.5, 4.5, 4.5));
        assert_eq!(frame.size(), (4, 4));
    }

    #[test]
    fn test_geo_transform() {
        let frame = CompositeFrame::aligned(
            &Extents::new(10.0, 20.0, 30.0, 40.0),
            Point2::new(0.0, 0.0),
            Resolution::new(2.0, 4.0),
        );
        assert_eq!(frame.geo_transform().0, [10.0, 2.0, 0.0, 40.0, 0.0, -4.0]);
        assert_eq!(frame.size(), (10, 5));
    }

    #[test]
    fn test_world_to_pixel_inverts_y() {
        let frame = CompositeFrame::aligned(
            &Extents::new(0.0, 0.0, 8.0, 8.0),
            Point2::new(0.0, 8.0),
            Resolution::new(1.0, 1.0),
        );
        assert_eq!(frame.world_to_pixel(Point2::new(0.0, 8.0)), (0.0, 0.0));
        assert_eq!(frame.world_to_pixel(Point2::new(3.0, 2.0)), (3.0, 6.0));
    }

    #[test]
    fn test_footprint() {
        let frame = CompositeFrame::aligned(
            &Extents::new(0.0, 0.0, 8.0, 8.0),
            Point2::new(0.0, 8.0),
            Resolution::new(1.0, 1.0),
        );
        let transform = GeoTransform::new([4.0, 1.0, 0.0, 6.0, 0.0, -1.0]);
        let fp = Footprint::compute(&frame, &transform, (4, 6), &Extents::new(5.0, 1.0, 7.0, 5.0));

        assert_eq!(fp.world, Extents::new(4.0, 0.0, 8.0, 6.0));
        assert_eq!(fp.extents, PixelRect::new(4, 2, 4, 6));
        assert_eq!(fp.valid, Rect2d::new(5.0, 3.0, 2.0, 4.0));
    }

    #[test]
    fn test_fractional_offsets_round_to_nearest_pixel() {
        let frame = CompositeFrame::aligned(
            &Extents::new(0.0, 0.0, 8.0, 8.0),
            Point2::new(0.0, 8.0),
            Resolution::new(1.0, 1.0),
        );
        let valid = Extents::new(0.0, 0.0, 8.0, 8.0);

        // (4.4, 6.6) lands at pixel (4.4, 1.4)
        let low = GeoTransform::new([4.4, 1.0, 0.0, 6.6, 0.0, -1.0]);
        let fp = Footprint::compute(&frame, &low, (2, 2), &valid);
        assert_eq!(fp.extents, PixelRect::new(4, 1, 2, 2));

        // (4.6, 6.4) lands at pixel (4.6, 1.6)
        let high = GeoTransform::new([4.6, 1.0, 0.0, 6.4, 0.0, -1.0]);
        let fp = Footprint::compute(&frame, &high, (2, 2), &valid);
        assert_eq!(fp.extents, PixelRect::new(5, 2, 2, 2));

        // float noise just below a pixel edge does not shift the source
        let noisy = GeoTransform::new([3.0 - 1e-9, 1.0, 0.0, 5.0 + 1e-9, 0.0, -1.0]);
        let fp = Footprint::compute(&frame, &noisy, (2, 2), &valid);
        assert_eq!(fp.extents, PixelRect::new(3, 3, 2, 2));
    }
}
