//! Air-cell grids.
//!
//! Air-cell variables are stored as a dense row-major grid matching the
//! dataset's world dimensions: sample `z * height * width + y * width + x`
//! holds cell `(x, y, z)`.

use crate::error::{QesError, Result};
use ndarray::Array3;

/// Reshape flat air-cell samples into a `[z, y, x]` grid.
///
/// `shape` is `(width, height, depth)`.
pub fn into_grid(values: Vec<f32>, shape: (usize, usize, usize)) -> Result<Array3<f32>> {
    let (width, height, depth) = shape;
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(depth))
        .ok_or_else(|| {
            QesError::format(format!(
                "Air-cell grid {}x{}x{} is too large",
                width, height, depth
            ))
        })?;
    if values.len() != expected {
        return Err(QesError::format(format!(
            "Air-cell data has {} values, expected {} for a {}x{}x{} grid",
            values.len(),
            expected,
            width,
            height,
            depth
        )));
    }

    Array3::from_shape_vec((depth, height, width), values)
        .map_err(|e| QesError::format(format!("Invalid air-cell grid: {}", e)))
}

/// Flat sample index of cell `(x, y, z)` in a grid of `(width, height, _)`.
pub fn cell_index(x: usize, y: usize, z: usize, width: usize, height: usize) -> usize {
    z * height * width + y * width + x
}
