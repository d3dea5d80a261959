//! Error types for pgw-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the pgw-io crate.
///
/// Covers missing files, NetCDF library failures, variables or dimensions
/// that are absent or mis-sized, and time axes that cannot be decoded.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when none of the requested variable names is present.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a field has no dimension of the requested name.
    #[error("dimension '{name}' not found on field '{field}'")]
    MissingDimension {
        /// Name of the missing dimension.
        name: String,
        /// Name of the field that was inspected.
        field: String,
    },

    /// Returned when a dimension or rank has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension, or a description of the mismatched rank.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}
