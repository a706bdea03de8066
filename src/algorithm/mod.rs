/// Directional structure cost fields
pub mod energy;
/// Reduction engine and iteration driver
pub mod executor;
/// Seam deletion and rightward merging
pub mod merge;
/// One-time weight normalization
pub mod normalization;
/// Dynamic programming over seam costs
pub mod path;
/// Seam representation and backtracking
pub mod seam;
/// Tie-break sources for equally cheap seams
pub mod tiebreak;
