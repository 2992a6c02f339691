//! Shared test utilities for the raster blending workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Approximate float assertions
//! - Synthetic raster data generators
//! - Geotransform and extents fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures, create_constant_grid};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro asserting every sample of a rectangular region equals a value.
///
/// `$get` is called with `(col, row)` and must return `Option<f64>`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_region_eq;
///
/// assert_region_eq!(|c, r| block.get(c, r), 0..3, 0..3, 10.0);
/// ```
#[macro_export]
macro_rules! assert_region_eq {
    ($get:expr, $cols:expr, $rows:expr, $expected:expr) => {{
        let get = $get;
        let expected: f64 = $expected as f64;
        for row in $rows {
            for col in ($cols).clone() {
                let actual: Option<f64> = get(col, row);
                if actual != Some(expected) {
                    panic!(
                        "assertion failed: sample at (col {}, row {}) is {:?}, expected {:?}",
                        col, row, actual, expected
                    );
                }
            }
        }
    }};
}
