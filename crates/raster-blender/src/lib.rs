//! Seamless blending of overlapping georeferenced rasters.
//!
//! A [`CompositeSurface`] presents several rasters that share one spatial
//! reference and pixel size as a single read-only raster. Each output pixel
//! is a weighted mean of the sources covering it; with a non-zero overlap
//! the weights ramp linearly across each source's valid rectangle so tile
//! seams disappear.
//!
//! # Architecture
//!
//! ```text
//! CompositeConfig
//!      │
//!      ▼
//! CompositeSurface::open(config, opener)
//!      │
//!      ├─► RasterOpener::open each dataset (first one is the reference)
//!      ├─► check_compatibility against the reference
//!      ├─► CompositeFrame::aligned (snap extents to the pixel grid)
//!      └─► SourceRegistry (sources + footprints)
//!
//! CompositeSurface::read_block(band, col, row)
//!      │
//!      └─► BlockCompositor::compose ─► BandData in the band's type
//! ```
//!
//! # Example
//!
//! ```ignore
//! use raster_blender::{CompositeConfig, CompositeSurface, Extents};
//!
//! let config = CompositeConfig::new("EPSG:3857", Extents::new(0.0, 0.0, 512.0, 512.0))
//!     .with_overlap(8.0)
//!     .with_dataset("west.tif", Extents::new(0.0, 0.0, 256.0, 512.0))
//!     .with_dataset("east.tif", Extents::new(256.0, 0.0, 512.0, 512.0));
//!
//! let surface = CompositeSurface::open(&config, &opener)?;
//! let block = surface.read_block(0, 0, 0)?;
//! ```

pub mod compat;
pub mod compositor;
pub mod config;
pub mod error;
pub mod footprint;
pub mod registry;
pub mod source;
pub mod surface;
pub mod types;

// Re-export commonly used types at crate root
pub use compat::{check_compatibility, NamedSource};
pub use compositor::{BlockCompositor, FeatherMode};
pub use config::{BlockSize, CompositeConfig, DatasetConfig};
pub use error::{BlendError, Incompatibility, Result};
pub use footprint::{CompositeFrame, Footprint};
pub use registry::{BandReader, RegisteredSource, SourceId, SourceRegistry};
pub use source::{MemoryBand, MemoryCatalog, MemoryRaster, RasterOpener, RasterSource};
pub use surface::{BandInfo, CompositeSurface};
pub use types::{BandData, BlockBuffer, ColorInterpretation, DataType, Validity};

pub use raster_common::{Extents, GeoTransform, PixelRect, Point2, Rect2d, Resolution};
