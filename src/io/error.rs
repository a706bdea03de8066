//! Error types for seam merging and its image I/O surface

use std::fmt;
use std::path::{Path, PathBuf};

/// Every way a reduction, or the file handling around it, can fail
#[derive(Debug)]
pub enum ReductionError {
    /// Input grids do not satisfy the engine's construction contract
    ///
    /// Raised for mismatched image/structure/importance shapes, empty images,
    /// and importance maps whose maximum is not strictly positive.
    InvalidInput {
        /// What the inputs got wrong
        reason: String,
    },

    /// More seams were requested than the image has columns to give
    OutOfBounds {
        /// Total number of seams requested
        requested: usize,
        /// Width of the input image
        width: usize,
    },

    /// More rows were requested than the image has to give
    RowsOutOfBounds {
        /// Number of rows requested
        requested: usize,
        /// Height of the input image
        height: usize,
    },

    /// The first-iteration energy maxima cannot scale the weights
    DegenerateNormalization {
        /// Maximum accumulated importance over any seam
        imp_max: f64,
        /// Maximum over the last row of the minimum structure cost
        str_max: f64,
    },

    /// A weight of the reduction is unusable
    InvalidParameter {
        /// Weight name as the command line spells it
        parameter: &'static str,
        /// Rejected value
        value: f64,
        /// Constraint the value broke
        reason: &'static str,
    },

    /// Seam search or merging reached a state it cannot continue from
    Computation {
        /// Stage that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// The command-line target cannot be reduced as given
    InvalidTarget {
        /// File or directory named on the command line
        path: PathBuf,
        /// Why it was refused
        reason: &'static str,
    },

    /// An image or map file could not be opened or decoded
    ImageLoad {
        /// File that was read
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// A reduced image could not be encoded or written
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Directory scanning or creation failed
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// What was being done to `path`
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ReductionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::OutOfBounds { requested, width } => write!(
                f,
                "{requested} seams requested but the image is only {width} columns wide"
            ),
            Self::RowsOutOfBounds { requested, height } => write!(
                f,
                "{requested} rows requested but the image is only {height} rows tall"
            ),
            Self::DegenerateNormalization { imp_max, str_max } => write!(
                f,
                "cannot normalize seam energy (importance max {imp_max}, structure max {str_max})"
            ),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "--{parameter} {value}: {reason}"),
            Self::Computation { operation, reason } => write!(f, "{operation} failed: {reason}"),
            Self::InvalidTarget { path, reason } => write!(f, "{}: {reason}", path.display()),
            Self::ImageLoad { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(f, "cannot {operation} {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for ReductionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::InvalidInput { .. }
            | Self::OutOfBounds { .. }
            | Self::RowsOutOfBounds { .. }
            | Self::DegenerateNormalization { .. }
            | Self::InvalidParameter { .. }
            | Self::Computation { .. }
            | Self::InvalidTarget { .. } => None,
        }
    }
}

/// Result of any fallible reduction step
pub type Result<T> = std::result::Result<T, ReductionError>;

/// Create an invalid input error
pub fn invalid_input(reason: &impl ToString) -> ReductionError {
    ReductionError::InvalidInput {
        reason: reason.to_string(),
    }
}

/// Create an invalid weight error
pub const fn invalid_parameter(
    parameter: &'static str,
    value: f64,
    reason: &'static str,
) -> ReductionError {
    ReductionError::InvalidParameter {
        parameter,
        value,
        reason,
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> ReductionError {
    ReductionError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Refuse a command-line target
pub fn invalid_target(path: &Path, reason: &'static str) -> ReductionError {
    ReductionError::InvalidTarget {
        path: path.to_path_buf(),
        reason,
    }
}

/// Adapter for `map_err` that attaches the path and operation to an I/O error
pub fn file_system(
    path: &Path,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> ReductionError {
    let path = path.to_path_buf();
    move |source| ReductionError::FileSystem {
        path,
        operation,
        source,
    }
}
