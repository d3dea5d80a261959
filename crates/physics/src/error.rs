//! Error types for the pgw-physics crate.

/// Error type for all fallible operations in the pgw-physics crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PhysicsError {
    /// Returned when the reference pressure lies above the top half level.
    #[error("reference pressure {p_ref} Pa is above the model top at {top} Pa")]
    ReferenceAboveModelTop {
        /// Requested reference pressure.
        p_ref: f64,
        /// Pressure of the top half level.
        top: f64,
    },

    /// Returned when no half level has a pressure at or above the reference.
    #[error("reference pressure {p_ref} Pa is below the surface at {surface} Pa")]
    ReferenceBelowSurface {
        /// Requested reference pressure.
        p_ref: f64,
        /// Pressure of the lowest half level.
        surface: f64,
    },

    /// Returned when two fields that must align have different shapes.
    #[error("shape mismatch for {field}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the mismatched input.
        field: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Returned when a column has the wrong number of levels.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched input.
        field: &'static str,
    },

    /// Returned when a physical constant is not finite and positive.
    #[error("invalid constant {name}: {value} (must be finite and > 0)")]
    InvalidConstant {
        /// Name of the constant.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
