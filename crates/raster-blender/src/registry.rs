//! Opened sources and their footprints.

use std::path::Path;

use raster_common::PixelRect;

use crate::compat::{check_compatibility, NamedSource};
use crate::config::DatasetConfig;
use crate::error::{BlendError, Incompatibility, Result};
use crate::footprint::{CompositeFrame, Footprint};
use crate::source::{RasterOpener, RasterSource};
use crate::types::Validity;

/// Index of a source inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub usize);

/// One admitted source.
pub struct RegisteredSource {
    path: String,
    source: Box<dyn RasterSource>,
    footprint: Footprint,
}

impl RegisteredSource {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }
}

impl std::fmt::Debug for RegisteredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSource")
            .field("path", &self.path)
            .field("footprint", &self.footprint)
            .finish_non_exhaustive()
    }
}

/// Sources opened for a composite, in configuration order.
///
/// The first entry is the reference source every other one is checked
/// against.
#[derive(Debug)]
pub struct SourceRegistry {
    entries: Vec<RegisteredSource>,
}

/// Sources opened and checked, but not yet placed in a frame.
pub(crate) struct OpenedSources {
    sources: Vec<(String, Box<dyn RasterSource>)>,
}

impl std::fmt::Debug for OpenedSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedSources")
            .field(
                "paths",
                &self.sources.iter().map(|(p, _)| p).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl OpenedSources {
    /// Open every dataset in order, checking each against the first.
    pub(crate) fn open(datasets: &[DatasetConfig], opener: &dyn RasterOpener) -> Result<Self> {
        let mut sources: Vec<(String, Box<dyn RasterSource>)> = Vec::with_capacity(datasets.len());

        for dataset in datasets {
            let path = dataset.path.display().to_string();
            let source = open_source(opener, &dataset.path, &path)?;

            tracing::debug!(
                path = %path,
                size = ?source.size(),
                bands = source.band_count(),
                "Opened raster source"
            );

            match sources.first() {
                Some((ref_path, reference)) => check_compatibility(
                    &NamedSource {
                        path: ref_path,
                        source: reference.as_ref(),
                    },
                    &NamedSource {
                        path: &path,
                        source: source.as_ref(),
                    },
                )?,
                // The reference can only be checked against itself.
                None if !source.geo_transform().is_orthogonal() => {
                    return Err(BlendError::incompatible(
                        path.as_str(),
                        path.as_str(),
                        Incompatibility::NonOrthogonal,
                    ));
                }
                None => {}
            }

            sources.push((path, source));
        }

        if sources.is_empty() {
            return Err(BlendError::construction("at least one dataset is required"));
        }
        Ok(Self { sources })
    }

    /// The reference (first) source.
    pub(crate) fn reference(&self) -> &dyn RasterSource {
        self.sources[0].1.as_ref()
    }

    /// Place every source in `frame`, producing the registry.
    pub(crate) fn place(self, frame: &CompositeFrame, datasets: &[DatasetConfig]) -> SourceRegistry {
        let composite = PixelRect::new(0, 0, frame.size().0 as i64, frame.size().1 as i64);

        let entries = self
            .sources
            .into_iter()
            .zip(datasets)
            .map(|((path, source), dataset)| {
                let footprint =
                    Footprint::compute(frame, &source.geo_transform(), source.size(), &dataset.valid);

                tracing::debug!(
                    path = %path,
                    extents = %footprint.extents,
                    valid = %footprint.valid,
                    "Computed source footprint"
                );
                if composite.intersection(&footprint.extents).is_empty() {
                    tracing::warn!(path = %path, "Source does not overlap the composite extents");
                }

                RegisteredSource {
                    path,
                    source,
                    footprint,
                }
            })
            .collect();

        SourceRegistry { entries }
    }
}

fn open_source(
    opener: &dyn RasterOpener,
    path: &Path,
    display: &str,
) -> Result<Box<dyn RasterSource>> {
    opener.open(path).map_err(|err| match err {
        BlendError::Open { .. } => err,
        other => BlendError::open_failed(display, other.to_string()),
    })
}

impl SourceRegistry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: SourceId) -> Option<&RegisteredSource> {
        self.entries.get(id.0)
    }

    /// The reference source.
    pub fn reference(&self) -> &RegisteredSource {
        &self.entries[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &RegisteredSource)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (SourceId(i), entry))
    }

    /// Sources whose pixel extents intersect `rect`.
    pub fn overlapping(&self, rect: PixelRect) -> impl Iterator<Item = (SourceId, &RegisteredSource)> {
        self.iter()
            .filter(move |(_, entry)| !rect.intersection(&entry.footprint.extents).is_empty())
    }

    /// Reader for one band of one source.
    pub fn band_reader(&self, id: SourceId, band: usize) -> Option<BandReader<'_>> {
        self.get(id).map(|entry| BandReader { entry, band })
    }
}

/// Band-scoped read access to a registered source.
///
/// Windows are given in composite pixel coordinates and translated to the
/// source's own frame; read errors carry the source path.
pub struct BandReader<'a> {
    entry: &'a RegisteredSource,
    band: usize,
}

impl<'a> BandReader<'a> {
    pub fn footprint(&self) -> &'a Footprint {
        &self.entry.footprint
    }

    pub fn validity(&self) -> Validity {
        self.entry.source.validity(self.band)
    }

    fn local(&self, roi: &PixelRect) -> PixelRect {
        let origin = self.entry.footprint.extents;
        roi.relative_to(origin.x, origin.y)
    }

    /// Read the samples of `roi` (composite coordinates).
    pub fn read(&self, roi: &PixelRect) -> Result<Vec<f64>> {
        let window = self.local(roi);
        let samples = self
            .entry
            .source
            .read_window(self.band, &window)
            .map_err(|e| self.read_error(e))?;
        self.check_len(samples.len(), roi)?;
        Ok(samples)
    }

    /// Read the validity mask of `roi` (composite coordinates).
    pub fn read_mask(&self, roi: &PixelRect) -> Result<Vec<u8>> {
        let window = self.local(roi);
        let mask = self
            .entry
            .source
            .read_mask(self.band, &window)
            .map_err(|e| self.read_error(e))?;
        self.check_len(mask.len(), roi)?;
        Ok(mask)
    }

    fn read_error(&self, err: BlendError) -> BlendError {
        match err {
            BlendError::Read { .. } => err.with_source_path(&self.entry.path),
            other => BlendError::read_failed(self.entry.path.clone(), other.to_string()),
        }
    }

    fn check_len(&self, len: usize, roi: &PixelRect) -> Result<()> {
        let (w, h) = roi.dimensions();
        if len != w * h {
            return Err(BlendError::read_failed(
                self.entry.path.clone(),
                format!("window {} returned {} samples, expected {}", roi, len, w * h),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemoryBand, MemoryCatalog, MemoryRaster};
    use crate::types::DataType;
    use raster_common::{Extents, GeoTransform, Point2, Resolution};

    fn catalog() -> MemoryCatalog {
        let a = MemoryRaster::new(4, 4, GeoTransform::new([0.0, 1.0, 0.0, 4.0, 0.0, -1.0]))
            .with_band(MemoryBand::new((0..16).map(|v| v as f64).collect(), DataType::Byte))
            .unwrap();
        let b = MemoryRaster::new(4, 4, GeoTransform::new([4.0, 1.0, 0.0, 4.0, 0.0, -1.0]))
            .with_band(MemoryBand::constant(4, 4, 9.0, DataType::Byte))
            .unwrap();
        MemoryCatalog::new().with("a", a).with("b", b)
    }

    fn datasets() -> Vec<DatasetConfig> {
        vec![
            DatasetConfig {
                path: "a".into(),
                valid: Extents::new(0.0, 0.0, 4.0, 4.0),
            },
            DatasetConfig {
                path: "b".into(),
                valid: Extents::new(4.0, 0.0, 8.0, 4.0),
            },
        ]
    }

    fn registry() -> SourceRegistry {
        let frame = CompositeFrame::aligned(
            &Extents::new(0.0, 0.0, 8.0, 4.0),
            Point2::new(0.0, 4.0),
            Resolution::new(1.0, 1.0),
        );
        OpenedSources::open(&datasets(), &catalog())
            .unwrap()
            .place(&frame, &datasets())
    }

    #[test]
    fn test_registry_order_and_footprints() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.reference().path(), "a");
        let b = registry.get(SourceId(1)).unwrap();
        assert_eq!(b.footprint().extents, PixelRect::new(4, 0, 4, 4));
    }

    #[test]
    fn test_overlapping() {
        let registry = registry();
        let ids: Vec<_> = registry
            .overlapping(PixelRect::new(0, 0, 2, 2))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![SourceId(0)]);

        let ids: Vec<_> = registry
            .overlapping(PixelRect::new(3, 0, 2, 2))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![SourceId(0), SourceId(1)]);
    }

    #[test]
    fn test_band_reader_translates_window() {
        let registry = registry();
        let reader = registry.band_reader(SourceId(0), 0).unwrap();
        assert_eq!(reader.read(&PixelRect::new(2, 1, 2, 1)).unwrap(), vec![6.0, 7.0]);

        let reader = registry.band_reader(SourceId(1), 0).unwrap();
        assert_eq!(reader.read(&PixelRect::new(4, 0, 1, 1)).unwrap(), vec![9.0]);
    }

    #[test]
    fn test_read_error_names_source() {
        let registry = registry();
        let reader = registry.band_reader(SourceId(1), 0).unwrap();
        let err = reader.read(&PixelRect::new(0, 0, 1, 1)).unwrap_err();
        assert!(matches!(err, BlendError::Read { ref path, .. } if path == "b"));
    }

    #[test]
    fn test_missing_source_is_open_error() {
        let mut ds = datasets();
        ds[1].path = "missing".into();
        let err = OpenedSources::open(&ds, &catalog()).unwrap_err();
        assert!(matches!(err, BlendError::Open { ref path, .. } if path == "missing"));
    }
}
