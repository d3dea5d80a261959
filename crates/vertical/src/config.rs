//! Configuration types for vertical interpolation.

use std::fmt;

/// How target coordinates outside the source column are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtrapolationMode {
    /// Fail with [`VerticalError::OutOfRange`](crate::VerticalError::OutOfRange).
    Off,
    /// Extend the trend through the two nearest source points.
    Linear,
    /// Repeat the nearest boundary value.
    #[default]
    Constant,
}

impl ExtrapolationMode {
    /// Lower-case name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Linear => "linear",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for ExtrapolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for grid-level vertical interpolation.
#[derive(Debug, Clone)]
pub struct VerticalConfig {
    /// Extrapolation policy handed to every column.
    mode: ExtrapolationMode,
    /// Tolerate target pressures above the source model top.
    ignore_top_pressure_error: bool,
}

impl VerticalConfig {
    /// Creates a configuration with constant extrapolation and a fatal
    /// model-top check.
    pub fn new() -> Self {
        Self {
            mode: ExtrapolationMode::Constant,
            ignore_top_pressure_error: false,
        }
    }

    /// Sets the extrapolation mode.
    pub fn with_mode(mut self, mode: ExtrapolationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether a target grid reaching above the source top is tolerated.
    pub fn with_ignore_top_pressure_error(mut self, ignore: bool) -> Self {
        self.ignore_top_pressure_error = ignore;
        self
    }

    /// Returns the extrapolation mode.
    pub fn mode(&self) -> ExtrapolationMode {
        self.mode
    }

    /// Returns whether the model-top check is tolerated.
    pub fn ignore_top_pressure_error(&self) -> bool {
        self.ignore_top_pressure_error
    }
}

impl Default for VerticalConfig {
    fn default() -> Self {
        Self::new()
    }
}
