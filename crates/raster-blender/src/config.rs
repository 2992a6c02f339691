//! Configuration for a blended composite.

use std::path::PathBuf;

use raster_common::{Extents, Resolution};
use serde::{Deserialize, Serialize};

use crate::error::{BlendError, Result};

/// Environment variable overriding the default block size.
pub const BLOCK_SIZE_ENV: &str = "BLENDER_BLOCK_SIZE";

/// Configuration of one composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Spatial reference shared by every source (WKT, +proj or EPSG:n).
    pub srs: String,

    /// Requested world extents; snapped outwards to the pixel grid.
    pub extents: Extents,

    /// Feather distance in resolution units; zero selects hard edges.
    #[serde(default)]
    pub overlap: f64,

    /// Output resolution, defaults to the first dataset's resolution.
    #[serde(default)]
    pub resolution: Option<Resolution>,

    /// Size of the blocks the composite is read in.
    #[serde(default)]
    pub block_size: BlockSize,

    /// Ordered input datasets; the first one is the reference.
    pub datasets: Vec<DatasetConfig>,
}

/// One input dataset of the composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Location handed to the raster opener.
    pub path: PathBuf,

    /// Authoritative part of the dataset in world coordinates.
    pub valid: Extents,
}

impl CompositeConfig {
    /// Start a configuration with no datasets, hard edges and the default
    /// block size.
    ///
    /// Hosts that honour `BLENDER_BLOCK_SIZE` opt in with
    /// `.with_block_size(BlockSize::from_env())`.
    pub fn new(srs: impl Into<String>, extents: Extents) -> Self {
        Self {
            srs: srs.into(),
            extents,
            overlap: 0.0,
            resolution: None,
            block_size: BlockSize::default(),
            datasets: Vec::new(),
        }
    }

    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_block_size(mut self, block_size: BlockSize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_dataset(mut self, path: impl Into<PathBuf>, valid: Extents) -> Self {
        self.datasets.push(DatasetConfig {
            path: path.into(),
            valid,
        });
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.srs.trim().is_empty() {
            return Err(BlendError::construction("srs must not be empty"));
        }

        if self.datasets.is_empty() {
            return Err(BlendError::construction("at least one dataset is required"));
        }

        if !self.overlap.is_finite() || self.overlap < 0.0 {
            return Err(BlendError::construction(format!(
                "overlap must be a non-negative number, got {}",
                self.overlap
            )));
        }

        if self.extents.is_empty() || !extents_finite(&self.extents) {
            return Err(BlendError::construction(format!(
                "extents {} enclose no area",
                self.extents
            )));
        }

        if let Some(resolution) = &self.resolution {
            if !resolution.is_valid() {
                return Err(BlendError::construction(format!(
                    "resolution must be positive, got {}",
                    resolution
                )));
            }
        }

        if self.block_size.width == 0 || self.block_size.height == 0 {
            return Err(BlendError::construction("block size must be > 0"));
        }

        for dataset in &self.datasets {
            if !extents_finite(&dataset.valid) {
                return Err(BlendError::construction(format!(
                    "valid extents of {} are not finite",
                    dataset.path.display()
                )));
            }
        }

        Ok(())
    }
}

fn extents_finite(e: &Extents) -> bool {
    e.min_x.is_finite() && e.min_y.is_finite() && e.max_x.is_finite() && e.max_y.is_finite()
}

/// Block dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSize {
    pub width: usize,
    pub height: usize,
}

impl Default for BlockSize {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

impl BlockSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Load the block size from `BLENDER_BLOCK_SIZE`, falling back to the
    /// default when unset or malformed.
    pub fn from_env() -> Self {
        std::env::var(BLOCK_SIZE_ENV)
            .ok()
            .and_then(|val| Self::parse(&val))
            .unwrap_or_default()
    }

    /// Parse "256" (square) or "512x256" (width x height).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let (w, h) = match s.split_once('x') {
            Some((w, h)) => (w.trim().parse().ok()?, h.trim().parse().ok()?),
            None => {
                let size = s.parse().ok()?;
                (size, size)
            }
        };

        if w == 0 || h == 0 {
            return None;
        }
        Some(Self::new(w, h))
    }

    /// Number of samples in one block.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for BlockSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
