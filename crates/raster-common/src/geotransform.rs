//! Affine mapping between pixel and world coordinates.

use serde::{Deserialize, Serialize};

use crate::bbox::{Extents, Point2};

/// Tolerance used for shear terms and resolution comparisons.
pub const ORTHOGONALITY_EPSILON: f64 = 1e-4;

/// Pixel size in world units along each axis (always positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

impl Resolution {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Per-axis comparison within [`ORTHOGONALITY_EPSILON`].
    pub fn almost_equals(&self, other: &Resolution) -> bool {
        (self.x - other.x).abs() < ORTHOGONALITY_EPSILON
            && (self.y - other.y).abs() < ORTHOGONALITY_EPSILON
    }

    /// True if both axes are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Six-coefficient affine geotransform.
///
/// Pixel `(x, y)` maps to world `(X, Y)` as
///
/// ```text
/// X = a0 + x * a1 + y * a2
/// Y = a3 + x * a4 + y * a5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    pub fn new(coefficients: [f64; 6]) -> Self {
        Self(coefficients)
    }

    /// North-up transform with the given upper-left corner and pixel size.
    pub fn north_up(upper_left: Point2, resolution: Resolution) -> Self {
        Self([
            upper_left.x,
            resolution.x,
            0.0,
            upper_left.y,
            0.0,
            -resolution.y,
        ])
    }

    pub fn coefficients(&self) -> &[f64; 6] {
        &self.0
    }

    /// Map a pixel position to world coordinates.
    pub fn apply(&self, x: f64, y: f64) -> Point2 {
        let a = &self.0;
        Point2::new(a[0] + x * a[1] + y * a[2], a[3] + x * a[4] + y * a[5])
    }

    /// World position of pixel (0, 0)'s outer corner.
    pub fn origin(&self) -> Point2 {
        Point2::new(self.0[0], self.0[3])
    }

    /// Pixel size along each axis, independent of axis orientation.
    pub fn resolution(&self) -> Resolution {
        let a = &self.0;
        Resolution::new(a[1].hypot(a[4]), a[2].hypot(a[5]))
    }

    /// True if the transform has no rotation or shear terms.
    pub fn is_orthogonal(&self) -> bool {
        self.0[2].abs() < ORTHOGONALITY_EPSILON && self.0[4].abs() < ORTHOGONALITY_EPSILON
    }

    /// World extents covered by a raster of the given pixel size.
    ///
    /// All four corners are transformed, so flipped or rotated rasters still
    /// yield a proper min/max rectangle.
    pub fn world_extents(&self, width: usize, height: usize) -> Extents {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.apply(0.0, h),
            self.apply(w, h),
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
        ];
        let origin = self.origin();

        Extents::from_points(corners)
            .unwrap_or_else(|| Extents::new(origin.x, origin.y, origin.x, origin.y))
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(coefficients: [f64; 6]) -> Self {
        Self(coefficients)
    }
}
