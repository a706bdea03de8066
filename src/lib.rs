//! Content-aware image reduction by seam merging
//!
//! Instead of deleting low-energy seams, each seam pixel is merged into its
//! right neighbour. A factorized representation of the structure map lets the
//! cost of a merge be evaluated without revisiting the pixels that were
//! already merged, so the image keeps its average colours while shrinking.

#![deny(unsafe_code)]

/// Energy model, seam search, and the reduction driver
pub mod algorithm;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Numerical helpers for the factorized cost
pub mod math;
/// Factorized state matrices and array utilities
pub mod spatial;

pub use algorithm::executor::{ReducedImage, ReductionConfig, SeamMerging};
pub use io::error::{ReductionError, Result};
