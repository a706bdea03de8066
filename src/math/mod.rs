//! Mathematical utilities for the algorithm

/// Quadratic cost form and factorized mean recovery
pub mod quadratic;
