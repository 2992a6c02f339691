//! Test data generators for synthetic raster bands.
//!
//! These generators create predictable, verifiable sample patterns that can
//! be used across the test suite. All grids are row-major (row 0 first).

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that windows are read and placed correctly
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[0], 0.0);    // col=0, row=0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0
/// assert_eq!(grid[10], 1.0);   // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// Creates a grid with every cell set to `value`.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a horizontal ramp from `start` (first column) to `end` (last
/// column), constant along each column.
pub fn create_gradient_grid(width: usize, height: usize, start: f64, end: f64) -> Vec<f64> {
    let step = if width > 1 {
        (end - start) / (width - 1) as f64
    } else {
        0.0
    };
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            data.push(start + col as f64 * step);
        }
    }
    data
}

/// Creates a validity mask (255 = valid, 0 = nodata) alternating in a
/// checkerboard of `cell`-sized squares, starting valid at the top-left.
pub fn create_checker_mask(width: usize, height: usize, cell: usize) -> Vec<u8> {
    let cell = cell.max(1);
    let mut mask = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let valid = (row / cell + col / cell) % 2 == 0;
            mask.push(if valid { 255 } else { 0 });
        }
    }
    mask
}

/// Creates a mask valid everywhere except inside the given column range.
pub fn create_column_gap_mask(
    width: usize,
    height: usize,
    gap: std::ops::Range<usize>,
) -> Vec<u8> {
    let mut mask = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            mask.push(if gap.contains(&col) { 0 } else { 255 });
        }
    }
    mask
}
