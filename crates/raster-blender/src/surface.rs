//! The blended composite raster.

use raster_common::{GeoTransform, PixelRect, Point2, Resolution};

use crate::compositor::{BlockCompositor, FeatherMode};
use crate::config::{BlockSize, CompositeConfig};
use crate::error::{BlendError, Result};
use crate::footprint::CompositeFrame;
use crate::registry::{OpenedSources, SourceRegistry};
use crate::source::RasterOpener;
use crate::types::{BandData, BlockBuffer, ColorInterpretation, DataType};

/// Per-band metadata taken from the reference source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandInfo {
    pub data_type: DataType,
    pub color: ColorInterpretation,
}

/// A read-only virtual raster blending several sources.
///
/// Everything but the pixels is computed in [`CompositeSurface::open`];
/// blocks are composed on each [`read_block`](CompositeSurface::read_block)
/// call and never cached.
#[derive(Debug)]
pub struct CompositeSurface {
    srs: String,
    frame: CompositeFrame,
    feather: FeatherMode,
    block_size: BlockSize,
    bands: Vec<BandInfo>,
    registry: SourceRegistry,
}

impl CompositeSurface {
    /// Build a composite from `config`, opening sources through `opener`.
    ///
    /// Fails without producing an instance if the configuration is
    /// malformed, a source cannot be opened, a source is incompatible with
    /// the first one, or a band type is unsupported.
    pub fn open(config: &CompositeConfig, opener: &dyn RasterOpener) -> Result<Self> {
        config.validate()?;

        let sources = OpenedSources::open(&config.datasets, opener)?;
        let reference = sources.reference();

        let origin: Point2 = reference.geo_transform().origin();
        let resolution: Resolution = config
            .resolution
            .unwrap_or_else(|| reference.geo_transform().resolution());
        if !resolution.is_valid() {
            return Err(BlendError::construction(format!(
                "reference resolution {} is not usable",
                resolution
            )));
        }

        let frame = CompositeFrame::aligned(&config.extents, origin, resolution);
        let feather = FeatherMode::from_overlap(config.overlap, resolution);

        let bands = (0..reference.band_count())
            .map(|band| {
                let data_type = reference.band_type(band)?;
                if !data_type.is_supported() {
                    return Err(BlendError::UnsupportedType(data_type));
                }
                Ok(BandInfo {
                    data_type,
                    color: reference.color_interpretation(band),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let registry = sources.place(&frame, &config.datasets);
        let (width, height) = frame.size();

        tracing::info!(
            width,
            height,
            bands = bands.len(),
            sources = registry.len(),
            resolution = %resolution,
            hard_edge = feather.is_hard_edge(),
            "Opened blended composite"
        );

        Ok(Self {
            srs: config.srs.clone(),
            frame,
            feather,
            block_size: config.block_size,
            bands,
            registry,
        })
    }

    /// Raster size in pixels (width, height).
    pub fn size(&self) -> (usize, usize) {
        self.frame.size()
    }

    pub fn geo_transform(&self) -> GeoTransform {
        self.frame.geo_transform()
    }

    /// Spatial reference definition, as configured.
    pub fn srs(&self) -> &str {
        &self.srs
    }

    pub fn frame(&self) -> &CompositeFrame {
        &self.frame
    }

    pub fn feather(&self) -> FeatherMode {
        self.feather
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn band_type(&self, band: usize) -> Result<DataType> {
        Ok(self.band(band)?.data_type)
    }

    pub fn color_interpretation(&self, band: usize) -> Result<ColorInterpretation> {
        Ok(self.band(band)?.color)
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Number of blocks per row and per column.
    pub fn block_count(&self) -> (usize, usize) {
        let (width, height) = self.size();
        (
            width.div_ceil(self.block_size.width),
            height.div_ceil(self.block_size.height),
        )
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Pixel rectangle of block `(col, row)`.
    pub fn block_rect(&self, col: usize, row: usize) -> PixelRect {
        let BlockSize { width, height } = self.block_size;
        PixelRect::new(
            (col * width) as i64,
            (row * height) as i64,
            width as i64,
            height as i64,
        )
    }

    /// Compose block `(col, row)` of `band`.
    ///
    /// The buffer always holds a full block; parts past the raster edge are
    /// blended like any other pixel.
    pub fn read_block(&self, band: usize, col: usize, row: usize) -> Result<BlockBuffer> {
        let info = self.band(band)?;
        let (cols, rows) = self.block_count();
        if col >= cols || row >= rows {
            return Err(BlendError::invalid_request(format!(
                "block ({}, {}) outside {}x{} block grid",
                col, row, cols, rows
            )));
        }

        let block = self.block_rect(col, row);
        let values = BlockCompositor::new(&self.registry, self.feather).compose(band, block)?;
        let data = BandData::from_f64(&values, info.data_type)
            .ok_or(BlendError::UnsupportedType(info.data_type))?;

        Ok(BlockBuffer {
            width: self.block_size.width,
            height: self.block_size.height,
            data,
        })
    }

    fn band(&self, band: usize) -> Result<&BandInfo> {
        self.bands.get(band).ok_or_else(|| {
            BlendError::invalid_request(format!(
                "band {} out of range ({} bands)",
                band,
                self.bands.len()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemoryBand, MemoryCatalog, MemoryRaster};
    use raster_common::Extents;

    fn catalog(data_type: DataType) -> MemoryCatalog {
        let raster = MemoryRaster::new(10, 6, GeoTransform::new([0.0, 1.0, 0.0, 6.0, 0.0, -1.0]))
            .with_band(MemoryBand::constant(10, 6, 3.0, data_type).with_color(ColorInterpretation::Gray))
            .unwrap();
        MemoryCatalog::new().with("a.tif", raster)
    }

    fn config() -> CompositeConfig {
        CompositeConfig::new("EPSG:3857", Extents::new(0.0, 0.0, 10.0, 6.0))
            .with_block_size(BlockSize::new(4, 4))
            .with_dataset("a.tif", Extents::new(0.0, 0.0, 10.0, 6.0))
    }

    #[test]
    fn test_open_exposes_geometry() {
        let surface = CompositeSurface::open(&config(), &catalog(DataType::Byte)).unwrap();
        assert_eq!(surface.size(), (10, 6));
        assert_eq!(surface.geo_transform().0, [0.0, 1.0, 0.0, 6.0, 0.0, -1.0]);
        assert_eq!(surface.srs(), "EPSG:3857");
        assert_eq!(surface.band_count(), 1);
        assert_eq!(surface.band_type(0).unwrap(), DataType::Byte);
        assert_eq!(surface.color_interpretation(0).unwrap(), ColorInterpretation::Gray);
        assert!(surface.feather().is_hard_edge());
        assert_eq!(surface.registry().len(), 1);
    }

    #[test]
    fn test_block_grid_rounds_up() {
        let surface = CompositeSurface::open(&config(), &catalog(DataType::Byte)).unwrap();
        assert_eq!(surface.block_count(), (3, 2));
        assert_eq!(surface.block_rect(2, 1), PixelRect::new(8, 4, 4, 4));
    }

    #[test]
    fn test_edge_block_is_full_size() {
        let surface = CompositeSurface::open(&config(), &catalog(DataType::Byte)).unwrap();
        let block = surface.read_block(0, 2, 1).unwrap();
        assert_eq!((block.width, block.height), (4, 4));
        assert_eq!(block.data.len(), 16);
        assert_eq!(block.get(0, 0), Some(3.0));
        assert_eq!(block.get(1, 1), Some(3.0));
        // past the raster edge nothing contributes
        assert_eq!(block.get(2, 0), Some(0.0));
        assert_eq!(block.get(0, 2), Some(0.0));
    }

    #[test]
    fn test_invalid_indices() {
        let surface = CompositeSurface::open(&config(), &catalog(DataType::Byte)).unwrap();
        assert!(matches!(surface.read_block(1, 0, 0), Err(BlendError::InvalidRequest(_))));
        assert!(matches!(surface.read_block(0, 3, 0), Err(BlendError::InvalidRequest(_))));
        assert!(matches!(surface.read_block(0, 0, 2), Err(BlendError::InvalidRequest(_))));
        assert!(surface.band_type(1).is_err());
    }

    #[test]
    fn test_unsupported_band_type() {
        let err = CompositeSurface::open(&config(), &catalog(DataType::CFloat32)).unwrap_err();
        assert!(matches!(err, BlendError::UnsupportedType(DataType::CFloat32)));
    }

    #[test]
    fn test_resolution_override() {
        let config = config().with_resolution(Resolution::new(2.0, 2.0));
        let surface = CompositeSurface::open(&config, &catalog(DataType::Float32)).unwrap();
        assert_eq!(surface.size(), (5, 3));
        assert_eq!(surface.frame().resolution, Resolution::new(2.0, 2.0));
    }

    #[test]
    fn test_overlap_selects_feathering() {
        let config = config().with_overlap(1.5);
        let surface = CompositeSurface::open(&config, &catalog(DataType::Float32)).unwrap();
        assert_eq!(
            surface.feather(),
            FeatherMode::Feather {
                half_width: 1.5,
                half_height: 1.5
            }
        );
    }
}
