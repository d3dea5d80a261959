//! Error types for the pgw-annual crate.

/// Error type for all fallible operations in the pgw-annual crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnnualError {
    /// Returned when a cycle is too short for the fixed number of harmonics.
    #[error("series of length {len} is too short for {harmonics} harmonics")]
    SeriesTooShort {
        /// Length of the periodic series.
        len: usize,
        /// Number of harmonics used for reconstruction.
        harmonics: usize,
    },

    /// Returned when a field does not have 3 or 4 dimensions.
    #[error("expected a 3-D or 4-D field with time on axis 0, got {ndim} dimension(s)")]
    UnsupportedRank {
        /// Number of dimensions of the input.
        ndim: usize,
    },

    /// Returned when the time axis has no steps.
    #[error("time axis is empty")]
    EmptyTimeAxis,

    /// Returned when the number of timestamps differs from the time axis.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched input.
        field: &'static str,
    },

    /// Returned when a timestamp cannot be moved into the target year.
    #[error("cannot move {date} into year {year}")]
    InvalidDate {
        /// Original timestamp.
        date: String,
        /// Requested year.
        year: i32,
    },

    /// Returned when the target lies outside the periodic cycle.
    #[error("target {target} is outside the annual cycle [{start}, {end}]")]
    TargetOutsideCycle {
        /// Requested timestamp.
        target: String,
        /// First timestamp of the padded cycle.
        start: String,
        /// Last timestamp of the padded cycle.
        end: String,
    },
}
