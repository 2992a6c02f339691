//! Block-wise weighted blending of overlapping sources.
//!
//! For every requested block the compositor:
//!
//! ```text
//! block ──► sources whose pixel extents intersect it
//!              │
//!              ├─► roi = block ∩ source extents
//!              ├─► read roi samples (+ validity mask when partial)
//!              ├─► weight each pixel against the source's valid rectangle
//!              └─► acc += samples × weight, wacc += weight
//!
//! output = acc / wacc   (wacc == 0 counts as 1, leaving 0)
//! ```
//!
//! With a zero overlap weights are binary: a pixel counts only if its
//! center is strictly inside the valid rectangle. With a non-zero overlap a
//! kernel of twice the feather half-extent is centered on the pixel and the
//! weight is the fraction of the kernel covered by the valid rectangle,
//! giving an exact linear ramp across the valid edge.

use raster_common::{PixelRect, Rect2d, Resolution};

use crate::error::Result;
use crate::registry::{BandReader, SourceRegistry};
use crate::types::Validity;

/// How source weights fall off at valid-rectangle edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatherMode {
    /// Binary weights.
    HardEdge,
    /// Linear ramp over a kernel of `2 * half_width` by `2 * half_height`.
    /// Both half-extents are finite and positive.
    Feather { half_width: f64, half_height: f64 },
}

impl FeatherMode {
    /// Feather half-extent in pixels is `overlap × resolution` per axis.
    pub fn from_overlap(overlap: f64, resolution: Resolution) -> Self {
        let half_width = overlap * resolution.x;
        let half_height = overlap * resolution.y;
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(half_width) && usable(half_height) {
            Self::Feather {
                half_width,
                half_height,
            }
        } else {
            Self::HardEdge
        }
    }

    pub fn is_hard_edge(&self) -> bool {
        matches!(self, Self::HardEdge)
    }

    /// Weight of a pixel centered at `(cx, cy)` against `valid`, before
    /// the source's own validity is applied.
    pub fn weight(&self, valid: &Rect2d, cx: f64, cy: f64) -> f64 {
        match *self {
            Self::HardEdge => {
                if valid.contains_strict(cx, cy) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Feather {
                half_width,
                half_height,
            } => {
                let kernel = Rect2d::centered(cx, cy, 2.0 * half_width, 2.0 * half_height);
                // A kernel too small to resolve around the center degenerates
                // to the hard-edge rule.
                if kernel.area() == 0.0 {
                    return Self::HardEdge.weight(valid, cx, cy);
                }
                let fx = valid.overlap_x(&kernel) / kernel.width;
                let fy = valid.overlap_y(&kernel) / kernel.height;
                (fx * fy).min(1.0)
            }
        }
    }
}

/// Running weighted sums for one block.
struct Accumulator {
    width: usize,
    acc: Vec<f64>,
    wacc: Vec<f64>,
}

impl Accumulator {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            acc: vec![0.0; width * height],
            wacc: vec![0.0; width * height],
        }
    }

    /// Add weighted samples of a `w × h` view starting at block-local
    /// `(x, y)`.
    fn add(&mut self, x: usize, y: usize, w: usize, samples: &[f64], weights: &[f64]) {
        for (row, (s_row, w_row)) in samples.chunks(w).zip(weights.chunks(w)).enumerate() {
            let start = (y + row) * self.width + x;
            let acc = &mut self.acc[start..start + w];
            let wacc = &mut self.wacc[start..start + w];
            for i in 0..w {
                if w_row[i] == 0.0 {
                    continue;
                }
                acc[i] += s_row[i] * w_row[i];
                wacc[i] += w_row[i];
            }
        }
    }

    fn finish(self) -> Vec<f64> {
        self.acc
            .into_iter()
            .zip(self.wacc)
            .map(|(value, weight)| value / if weight == 0.0 { 1.0 } else { weight })
            .collect()
    }
}

/// Blends the registry's sources into output blocks.
pub struct BlockCompositor<'a> {
    registry: &'a SourceRegistry,
    feather: FeatherMode,
}

impl<'a> BlockCompositor<'a> {
    pub fn new(registry: &'a SourceRegistry, feather: FeatherMode) -> Self {
        Self { registry, feather }
    }

    /// Blend `band` over `block` (composite pixel coordinates).
    ///
    /// Returns `block.width × block.height` row-major samples. Pixels no
    /// source covers are 0. Any source read failure fails the whole block.
    pub fn compose(&self, band: usize, block: PixelRect) -> Result<Vec<f64>> {
        let (width, height) = block.dimensions();
        let mut accumulator = Accumulator::new(width, height);
        let mut contributing = 0usize;

        for (id, entry) in self.registry.overlapping(block) {
            let roi = block.intersection(&entry.footprint().extents);
            if roi.is_empty() {
                continue;
            }
            let Some(reader) = self.registry.band_reader(id, band) else {
                continue;
            };

            tracing::trace!(path = entry.path(), roi = %roi, "Reading source window");
            let samples = reader.read(&roi)?;
            let weights = self.weights(&reader, &roi)?;

            let view = roi.relative_to(block.x, block.y);
            accumulator.add(
                view.x as usize,
                view.y as usize,
                roi.dimensions().0,
                &samples,
                &weights,
            );
            contributing += 1;
        }

        tracing::trace!(
            band,
            block = %block,
            sources = contributing,
            "Composed block"
        );

        Ok(accumulator.finish())
    }

    /// Per-pixel weights of `roi` for one source.
    fn weights(&self, reader: &BandReader<'_>, roi: &PixelRect) -> Result<Vec<f64>> {
        let (w, h) = roi.dimensions();

        let mut weights = match reader.validity() {
            Validity::AllValid => vec![1.0; w * h],
            Validity::Partial => reader
                .read_mask(roi)?
                .into_iter()
                .map(|flag| if flag != 0 { 1.0 } else { 0.0 })
                .collect(),
        };

        let valid = &reader.footprint().valid;
        for (row, weight_row) in weights.chunks_mut(w).enumerate() {
            let cy = (roi.y + row as i64) as f64 + 0.5;
            for (col, weight) in weight_row.iter_mut().enumerate() {
                if *weight == 0.0 {
                    continue;
                }
                let cx = (roi.x + col as i64) as f64 + 0.5;
                *weight *= self.feather.weight(valid, cx, cy);
            }
        }

        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_overlap() {
        assert!(FeatherMode::from_overlap(0.0, Resolution::new(1.0, 1.0)).is_hard_edge());
        assert_eq!(
            FeatherMode::from_overlap(2.0, Resolution::new(1.0, 0.5)),
            FeatherMode::Feather {
                half_width: 2.0,
                half_height: 1.0
            }
        );
    }

    #[test]
    fn test_hard_edge_weights_are_binary() {
        let valid = Rect2d::new(0.0, 0.0, 5.0, 5.0);
        let mode = FeatherMode::HardEdge;
        assert_eq!(mode.weight(&valid, 0.5, 0.5), 1.0);
        assert_eq!(mode.weight(&valid, 4.5, 4.5), 1.0);
        assert_eq!(mode.weight(&valid, 5.5, 0.5), 0.0);
        assert_eq!(mode.weight(&valid, 5.0, 2.5), 0.0);
    }

    #[test]
    fn test_feather_weights_ramp() {
        let valid = Rect2d::new(0.0, 0.0, 10.0, 10.0);
        let mode = FeatherMode::Feather {
            half_width: 2.0,
            half_height: 2.0,
        };
        // kernel fully inside
        assert_eq!(mode.weight(&valid, 5.0, 5.0), 1.0);
        // kernel fully outside
        assert_eq!(mode.weight(&valid, 12.5, 5.0), 0.0);
        // kernel centered on the edge: half covered
        assert_eq!(mode.weight(&valid, 10.0, 5.0), 0.5);
        // a quarter of the way in
        assert_eq!(mode.weight(&valid, 9.0, 5.0), 0.75);
    }

    #[test]
    fn test_tiny_overlap_keeps_outside_weight_zero() {
        let valid = Rect2d::new(0.0, 0.0, 4.0, 8.0);
        let mode = FeatherMode::from_overlap(1e-200, Resolution::new(1.0, 1.0));
        assert!(!mode.is_hard_edge());
        assert_eq!(mode.weight(&valid, 6.5, 2.5), 0.0);
        assert_eq!(mode.weight(&valid, 2.5, 2.5), 1.0);
        // kernel still resolvable at the origin
        assert_eq!(mode.weight(&Rect2d::new(-1.0, -1.0, 2.0, 2.0), 0.0, 0.0), 1.0);
        assert_eq!(mode.weight(&Rect2d::new(1.0, 1.0, 2.0, 2.0), 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_overflowing_overlap_falls_back_to_hard_edge() {
        assert!(FeatherMode::from_overlap(1e300, Resolution::new(1e10, 1.0)).is_hard_edge());
    }

    #[test]
    fn test_accumulator_normalizes_and_zero_fills() {
        let mut acc = Accumulator::new(2, 2);
        acc.add(0, 0, 2, &[10.0, 10.0], &[1.0, 0.5]);
        acc.add(1, 0, 1, &[20.0], &[0.5]);
        let out = acc.finish();
        assert_eq!(out, vec![10.0, 15.0, 0.0, 0.0]);
    }
}
