//! Axis swapping for running the column engine on rows
//!
//! The engine only ever removes columns. Reducing height is done outside it:
//! transpose the inputs, remove "columns" of the transposed grid, and
//! transpose the result back.

use ndarray::{Array2, Array3};

/// Swap rows and columns of an `H×W×C` image, keeping channels last
pub fn transpose_image(image: &Array3<f64>) -> Array3<f64> {
    image
        .view()
        .permuted_axes([1, 0, 2])
        .as_standard_layout()
        .into_owned()
}

/// Swap rows and columns of a scalar map
pub fn transpose_map(map: &Array2<f64>) -> Array2<f64> {
    map.t().as_standard_layout().into_owned()
}
