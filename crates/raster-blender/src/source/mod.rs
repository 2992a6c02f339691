//! Raster source abstraction.
//!
//! The compositor only ever talks to these traits; concrete formats (GDAL,
//! COG readers, in-memory grids) plug in by implementing them. Band indices
//! are zero-based.

mod memory;

pub use memory::{MemoryBand, MemoryCatalog, MemoryRaster};

use std::path::Path;
use std::sync::Arc;

use raster_common::{GeoTransform, PixelRect};

use crate::error::Result;
use crate::types::{ColorInterpretation, DataType, Validity};

/// Read access to one opened raster dataset.
///
/// Windows are given in the source's own pixel coordinates and are always
/// fully inside the raster. Implementations must be reentrant for the
/// composite to be read from several threads.
pub trait RasterSource: Send + Sync {
    /// Raster size in pixels (width, height).
    fn size(&self) -> (usize, usize);

    /// Affine transform from pixel to world coordinates.
    fn geo_transform(&self) -> GeoTransform;

    /// Number of bands.
    fn band_count(&self) -> usize;

    /// Numeric type of a band.
    fn band_type(&self, band: usize) -> Result<DataType>;

    /// Color interpretation of a band.
    fn color_interpretation(&self, _band: usize) -> ColorInterpretation {
        ColorInterpretation::Undefined
    }

    /// Read a window of a band as f64 samples, row-major.
    fn read_window(&self, band: usize, window: &PixelRect) -> Result<Vec<f64>>;

    /// Whether the band has nodata pixels.
    fn validity(&self, _band: usize) -> Validity {
        Validity::AllValid
    }

    /// Read the validity mask of a window; non-zero means valid.
    ///
    /// Only called for bands reporting [`Validity::Partial`].
    fn read_mask(&self, _band: usize, window: &PixelRect) -> Result<Vec<u8>> {
        let (w, h) = window.dimensions();
        Ok(vec![255; w * h])
    }
}

impl<T: RasterSource + ?Sized> RasterSource for Arc<T> {
    fn size(&self) -> (usize, usize) {
        (**self).size()
    }

    fn geo_transform(&self) -> GeoTransform {
        (**self).geo_transform()
    }

    fn band_count(&self) -> usize {
        (**self).band_count()
    }

    fn band_type(&self, band: usize) -> Result<DataType> {
        (**self).band_type(band)
    }

    fn color_interpretation(&self, band: usize) -> ColorInterpretation {
        (**self).color_interpretation(band)
    }

    fn read_window(&self, band: usize, window: &PixelRect) -> Result<Vec<f64>> {
        (**self).read_window(band, window)
    }

    fn validity(&self, band: usize) -> Validity {
        (**self).validity(band)
    }

    fn read_mask(&self, band: usize, window: &PixelRect) -> Result<Vec<u8>> {
        (**self).read_mask(band, window)
    }
}

/// Opens raster sources by path.
pub trait RasterOpener {
    /// Open the raster at `path` read-only.
    fn open(&self, path: &Path) -> Result<Box<dyn RasterSource>>;
}

impl<F> RasterOpener for F
where
    F: Fn(&Path) -> Result<Box<dyn RasterSource>>,
{
    fn open(&self, path: &Path) -> Result<Box<dyn RasterSource>> {
        self(path)
    }
}
