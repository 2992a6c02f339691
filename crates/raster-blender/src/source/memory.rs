//! In-memory raster sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use raster_common::{GeoTransform, PixelRect};

use super::{RasterOpener, RasterSource};
use crate::error::{BlendError, Result};
use crate::types::{ColorInterpretation, DataType, Validity};

/// One band of a [`MemoryRaster`].
#[derive(Debug, Clone)]
pub struct MemoryBand {
    data: Vec<f64>,
    data_type: DataType,
    color: ColorInterpretation,
    mask: Option<Vec<u8>>,
}

impl MemoryBand {
    /// Band backed by row-major samples.
    pub fn new(data: Vec<f64>, data_type: DataType) -> Self {
        Self {
            data,
            data_type,
            color: ColorInterpretation::Undefined,
            mask: None,
        }
    }

    /// Band with every sample set to `value`.
    pub fn constant(width: usize, height: usize, value: f64, data_type: DataType) -> Self {
        Self::new(vec![value; width * height], data_type)
    }

    /// Attach a validity mask (non-zero = valid); the band then reports
    /// partial validity.
    pub fn with_mask(mut self, mask: Vec<u8>) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_color(mut self, color: ColorInterpretation) -> Self {
        self.color = color;
        self
    }
}

/// A raster held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    width: usize,
    height: usize,
    geo_transform: GeoTransform,
    bands: Vec<MemoryBand>,
}

impl MemoryRaster {
    pub fn new(width: usize, height: usize, geo_transform: GeoTransform) -> Self {
        Self {
            width,
            height,
            geo_transform,
            bands: Vec::new(),
        }
    }

    /// Append a band, checking its sample and mask counts.
    pub fn with_band(mut self, band: MemoryBand) -> Result<Self> {
        let expected = self.width * self.height;
        if band.data.len() != expected {
            return Err(BlendError::construction(format!(
                "band {} holds {} samples, raster needs {}",
                self.bands.len(),
                band.data.len(),
                expected
            )));
        }
        if let Some(mask) = &band.mask {
            if mask.len() != expected {
                return Err(BlendError::construction(format!(
                    "mask of band {} holds {} samples, raster needs {}",
                    self.bands.len(),
                    mask.len(),
                    expected
                )));
            }
        }
        self.bands.push(band);
        Ok(self)
    }

    fn band(&self, band: usize) -> Result<&MemoryBand> {
        self.bands.get(band).ok_or_else(|| {
            BlendError::read_failed(
                "",
                format!("band {} out of range ({} bands)", band, self.bands.len()),
            )
        })
    }

    fn check_window(&self, window: &PixelRect) -> Result<()> {
        let inside = window.x >= 0
            && window.y >= 0
            && window.right() <= self.width as i64
            && window.bottom() <= self.height as i64;
        if !inside {
            return Err(BlendError::read_failed(
                "",
                format!(
                    "window {} outside raster of {}x{}",
                    window, self.width, self.height
                ),
            ));
        }
        Ok(())
    }

    fn copy_window<T: Copy>(&self, samples: &[T], window: &PixelRect) -> Vec<T> {
        let (w, h) = window.dimensions();
        let (x, y) = (window.x as usize, window.y as usize);
        let mut out = Vec::with_capacity(w * h);
        for row in y..y + h {
            let start = row * self.width + x;
            out.extend_from_slice(&samples[start..start + w]);
        }
        out
    }
}

impl RasterSource for MemoryRaster {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn geo_transform(&self) -> GeoTransform {
        self.geo_transform
    }

    fn band_count(&self) -> usize {
        self.bands.len()
    }

    fn band_type(&self, band: usize) -> Result<DataType> {
        Ok(self.band(band)?.data_type)
    }

    fn color_interpretation(&self, band: usize) -> ColorInterpretation {
        self.bands
            .get(band)
            .map(|b| b.color)
            .unwrap_or_default()
    }

    fn read_window(&self, band: usize, window: &PixelRect) -> Result<Vec<f64>> {
        let band = self.band(band)?;
        self.check_window(window)?;
        Ok(self.copy_window(&band.data, window))
    }

    fn validity(&self, band: usize) -> Validity {
        match self.bands.get(band) {
            Some(MemoryBand { mask: Some(_), .. }) => Validity::Partial,
            _ => Validity::AllValid,
        }
    }

    fn read_mask(&self, band: usize, window: &PixelRect) -> Result<Vec<u8>> {
        let band = self.band(band)?;
        self.check_window(window)?;
        match &band.mask {
            Some(mask) => Ok(self.copy_window(mask, window)),
            None => {
                let (w, h) = window.dimensions();
                Ok(vec![255; w * h])
            }
        }
    }
}

/// Path-addressed collection of in-memory rasters acting as an opener.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    rasters: HashMap<PathBuf, Arc<MemoryRaster>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raster under `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, raster: MemoryRaster) {
        self.rasters.insert(path.into(), Arc::new(raster));
    }

    pub fn with(mut self, path: impl Into<PathBuf>, raster: MemoryRaster) -> Self {
        self.insert(path, raster);
        self
    }

    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }
}

impl RasterOpener for MemoryCatalog {
    fn open(&self, path: &Path) -> Result<Box<dyn RasterSource>> {
        let raster = self.rasters.get(path).ok_or_else(|| {
            BlendError::open_failed(path.display().to_string(), "no such raster")
        })?;
        Ok(Box::new(Arc::clone(raster)))
    }
}
