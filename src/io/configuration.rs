//! Algorithm constants and runtime configuration defaults

// Channel layout of the four-direction difference tensor (p12, p22)
/// Number of neighbour directions tracked per pixel
pub const DIRECTIONS: usize = 4;
/// Component holding the difference to the pixel above
pub const UP: usize = 0;
/// Component holding the difference to the pixel below
pub const DOWN: usize = 1;
/// Component holding the difference to the pixel on the right
pub const RIGHT: usize = 2;
/// Component holding the difference to the pixel on the left
pub const LEFT: usize = 3;

// Default values for configurable parameters
/// Default weight of the structure term (importance receives `1 - alpha`)
pub const DEFAULT_ALPHA: f64 = 0.5;
/// Default weight of the iteration-count term
pub const DEFAULT_BETA: f64 = 0.5;
/// Fixed seed for reproducible tie-breaking
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_reduced";
/// Extensions the command line picks up when scanning a directory
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
