//! Admission checks for sources joining a composite.

use crate::error::{BlendError, Incompatibility, Result};
use crate::source::RasterSource;

/// Source handle paired with the path it was opened from.
pub struct NamedSource<'a> {
    pub path: &'a str,
    pub source: &'a dyn RasterSource,
}

/// Check that `candidate` can be blended with the `reference` source.
///
/// Rejects rotated/sheared transforms, differing resolution and differing
/// band counts. Band data type and color interpretation are not enforced;
/// mismatches are only logged.
pub fn check_compatibility(reference: &NamedSource<'_>, candidate: &NamedSource<'_>) -> Result<()> {
    let fail = |kind| BlendError::incompatible(candidate.path, reference.path, kind);

    let transform = candidate.source.geo_transform();
    if !transform.is_orthogonal() {
        return Err(fail(Incompatibility::NonOrthogonal));
    }

    let expected = reference.source.geo_transform().resolution();
    let actual = transform.resolution();
    if !expected.almost_equals(&actual) {
        return Err(fail(Incompatibility::ResolutionMismatch { expected, actual }));
    }

    let expected = reference.source.band_count();
    let actual = candidate.source.band_count();
    if expected != actual {
        return Err(fail(Incompatibility::BandCountMismatch { expected, actual }));
    }

    for band in 0..expected {
        let (ref_type, cand_type) = (
            reference.source.band_type(band),
            candidate.source.band_type(band),
        );
        if let (Ok(r), Ok(c)) = (&ref_type, &cand_type) {
            if r != c {
                tracing::warn!(
                    path = candidate.path,
                    reference = reference.path,
                    band,
                    data_type = %c,
                    reference_type = %r,
                    "Band data type differs from reference; samples will be converted"
                );
            }
        }

        let (ref_color, cand_color) = (
            reference.source.color_interpretation(band),
            candidate.source.color_interpretation(band),
        );
        if ref_color != cand_color {
            tracing::warn!(
                path = candidate.path,
                reference = reference.path,
                band,
                color = ?cand_color,
                reference_color = ?ref_color,
                "Band color interpretation differs from reference"
            );
        }
    }

    Ok(())
}
