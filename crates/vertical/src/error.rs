//! Error types for the pgw-vertical crate.

/// Error type for all fallible operations in the pgw-vertical crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VerticalError {
    /// Returned when a target pressure needs extrapolation but the
    /// extrapolation mode is `Off`.
    #[error(
        "extrapolation deactivated but target {target} is outside the source range [{min}, {max}]"
    )]
    OutOfRange {
        /// Target coordinate that fell outside the source column.
        target: f64,
        /// First (smallest) source coordinate.
        min: f64,
        /// Last (largest) source coordinate.
        max: f64,
    },

    /// Returned when the target grid reaches above the top of the source grid.
    #[error(
        "target top pressure {target_top} is lower than source top pressure {source_top}; \
         enable ignore_top_pressure_error if the levels above are not needed"
    )]
    TopBoundary {
        /// Minimum target pressure over the whole field.
        target_top: f64,
        /// Minimum source pressure over the whole field.
        source_top: f64,
    },

    /// Returned when the surface pressure is not below any source level.
    #[error("surface pressure {surface_pressure} is not below the shallowest source level {shallowest}")]
    SurfaceBounds {
        /// Declared surface pressure.
        surface_pressure: f64,
        /// Smallest source pressure of the column.
        shallowest: f64,
    },

    /// Returned when a source column has no levels.
    #[error("source column is empty")]
    EmptyColumn,

    /// Returned when paired slices differ in length.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched input.
        field: &'static str,
    },

    /// Returned when source pressures are not ascending.
    #[error("source coordinates are not ascending at index {index}")]
    UnsortedColumn {
        /// Index of the first element smaller than its predecessor.
        index: usize,
    },

    /// Returned when a pressure cannot be log-transformed.
    #[error("non-positive pressure {value} in {field}")]
    NonPositivePressure {
        /// Offending pressure value.
        value: f64,
        /// Name of the field the value came from.
        field: &'static str,
    },

    /// Returned when two fields have incompatible shapes.
    #[error("shape mismatch for {field}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected shape (axes not constrained are reported as the actual size).
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },
}
