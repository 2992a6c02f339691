//! Tests for world extents and pixel rectangle operations.

use raster_common::{Extents, ExtentsParseError, GeoTransform, PixelRect, Rect2d};

// ============================================================================
// Parsing tests
// ============================================================================

#[test]
fn test_parse_extents_integer() {
    let e = Extents::parse("0,0,100,100").unwrap();
    assert_eq!(e, Extents::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_parse_extents_projected() {
    let e = Extents::parse("-20037508.34,-20037508.34,20037508.34,20037508.34").unwrap();
    assert!((e.min_x - (-20037508.34)).abs() < 0.01);
    assert!((e.max_y - 20037508.34).abs() < 0.01);
}

#[test]
fn test_parse_extents_tolerates_spaces() {
    let e = Extents::parse(" 1, 2 ,3,4 ").unwrap();
    assert_eq!(e, Extents::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn test_parse_extents_invalid_format() {
    assert!(matches!(
        Extents::parse("0,0,100"),
        Err(ExtentsParseError::InvalidFormat(_))
    ));
    assert!(matches!(
        Extents::parse(""),
        Err(ExtentsParseError::InvalidFormat(_))
    ));
}

#[test]
fn test_parse_extents_invalid_number() {
    assert!(matches!(
        Extents::parse("abc,0,100,100"),
        Err(ExtentsParseError::InvalidNumber(_))
    ));
}

// ============================================================================
// Extents geometry
// ============================================================================

#[test]
fn test_extents_dimensions() {
    let e = Extents::new(-10.0, 5.0, 10.0, 25.0);
    assert_eq!(e.width(), 20.0);
    assert_eq!(e.height(), 20.0);
    assert!(!e.is_empty());
}

#[test]
fn test_extents_degenerate_is_empty() {
    assert!(Extents::new(5.0, 5.0, 5.0, 10.0).is_empty());
    assert!(Extents::new(10.0, 10.0, 0.0, 0.0).is_empty());
}

#[test]
fn test_extents_adjacent_do_not_intersect() {
    let a = Extents::new(0.0, 0.0, 10.0, 10.0);
    let b = Extents::new(10.0, 0.0, 20.0, 10.0);
    assert!(!a.intersects(&b));
    assert!(a.intersection(&b).is_none());
}

#[test]
fn test_extents_intersection_result() {
    let a = Extents::new(0.0, 0.0, 10.0, 10.0);
    let b = Extents::new(5.0, 5.0, 15.0, 15.0);
    assert_eq!(a.intersection(&b), Some(Extents::new(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn test_extents_deserialize() {
    let e: Extents =
        serde_json::from_str(r#"{"min_x":1.0,"min_y":2.0,"max_x":3.0,"max_y":4.0}"#).unwrap();
    assert_eq!(e, Extents::new(1.0, 2.0, 3.0, 4.0));
}

// ============================================================================
// Geotransform + rectangles
// ============================================================================

#[test]
fn test_rotated_transform_extents_cover_all_corners() {
    // 90 degree rotation: x axis maps to -Y, y axis maps to -X
    let gt = GeoTransform::new([0.0, 0.0, -1.0, 0.0, -1.0, 0.0]);
    let e = gt.world_extents(4, 2);
    assert_eq!(e, Extents::new(-2.0, -4.0, 0.0, 0.0));
    assert!(!gt.is_orthogonal());
}

#[test]
fn test_pixel_rect_negative_origin() {
    let source = PixelRect::new(-4, -4, 8, 8);
    let block = PixelRect::new(0, 0, 256, 256);
    let roi = block.intersection(&source);
    assert_eq!(roi, PixelRect::new(0, 0, 4, 4));
    assert_eq!(roi.relative_to(source.x, source.y), PixelRect::new(4, 4, 4, 4));
    assert_eq!(roi.dimensions(), (4, 4));
}

#[test]
fn test_rect2d_kernel_on_edge_overlaps_half() {
    let valid = Rect2d::new(0.0, 0.0, 5.0, 5.0);
    let kernel = Rect2d::centered(5.0, 2.5, 2.0, 2.0);
    assert!((valid.overlap_x(&kernel) - 1.0).abs() < 1e-12);
    assert!((valid.overlap_y(&kernel) - 2.0).abs() < 1e-12);
}
