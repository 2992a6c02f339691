//! Geometry primitives shared across the raster blending workspace.
//!
//! World-space rectangles ([`Extents`]), affine pixel/world mapping
//! ([`GeoTransform`]) and pixel-space rectangles ([`PixelRect`] for whole
//! pixels, [`Rect2d`] for fractional areas).

pub mod bbox;
pub mod geotransform;
pub mod rect;

pub use bbox::{Extents, ExtentsParseError, Point2};
pub use geotransform::{GeoTransform, Resolution, ORTHOGONALITY_EPSILON};
pub use rect::{PixelRect, Rect2d};
