//! Spatial data structures for seam merging
//!
//! This module contains the array-level building blocks:
//! - The long-lived factorized state and its initialization
//! - Look-ahead shifted sums of that state
//! - Axis swapping for external row reduction

/// Look-ahead shifted sums and differences
pub mod lookahead;
/// Transposition helpers for row reduction
pub mod orientation;
/// Factorized state matrices and reconstruction
pub mod state;

pub use lookahead::LookAhead;
pub use state::MergeState;
