//! Common test fixtures for raster blending tests.
//!
//! This module provides pre-defined geotransforms, extents and spatial
//! references that represent common scenarios in mosaicking.

/// Geotransform coefficient arrays.
pub mod transforms {
    /// North-up transform with the given upper-left corner and square pixel.
    pub const fn north_up(ulx: f64, uly: f64, res: f64) -> [f64; 6] {
        [ulx, res, 0.0, uly, 0.0, -res]
    }

    /// Unit pixels with the upper-left corner at (0, 8): an 8x8 raster
    /// covers world (0, 0)-(8, 8).
    pub const UNIT_8X8: [f64; 6] = north_up(0.0, 8.0, 1.0);

    /// Carries a shear term (a2) and must be rejected.
    pub const SHEARED: [f64; 6] = [0.0, 1.0, 0.25, 8.0, 0.0, -1.0];

    /// Carries a rotation term (a4) and must be rejected.
    pub const ROTATED: [f64; 6] = [0.0, 1.0, 0.0, 8.0, 0.1, -1.0];
}

/// Extents as (min_x, min_y, max_x, max_y).
pub mod extents {
    /// Unaligned request that snaps to (0, 0)-(10, 10) on a unit grid.
    pub const UNALIGNED_10X10: (f64, f64, f64, f64) = (0.3, 0.3, 9.7, 9.7);

    /// Area covered by [`super::transforms::UNIT_8X8`] at 8x8 pixels.
    pub const UNIT_8X8: (f64, f64, f64, f64) = (0.0, 0.0, 8.0, 8.0);

    /// Left half of the 8x8 area.
    pub const WEST_HALF: (f64, f64, f64, f64) = (0.0, 0.0, 4.0, 8.0);

    /// Right half of the 8x8 area.
    pub const EAST_HALF: (f64, f64, f64, f64) = (4.0, 0.0, 8.0, 8.0);
}

/// Common spatial reference identifiers.
pub mod srs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";
}
