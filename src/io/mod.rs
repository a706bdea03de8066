/// Command-line interface and batch processing
pub mod cli;
/// Constants shared across the crate
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Image file loading and saving
pub mod image;
/// Progress reporting
pub mod progress;
