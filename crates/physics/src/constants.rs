//! Physical constants used by the integration routines.

use crate::error::PhysicsError;

/// Dry-air gas constant and gravitational acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Gas constant of dry air in J kg-1 K-1.
    rd: f64,
    /// Gravitational acceleration in m s-2.
    g: f64,
}

impl PhysicalConstants {
    /// Creates the standard constants (`rd = 287.06`, `g = 9.80665`).
    pub fn new() -> Self {
        Self {
            rd: 287.06,
            g: 9.80665,
        }
    }

    /// Sets the dry-air gas constant.
    pub fn with_rd(mut self, rd: f64) -> Self {
        self.rd = rd;
        self
    }

    /// Sets the gravitational acceleration.
    pub fn with_g(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Returns the dry-air gas constant.
    pub fn rd(&self) -> f64 {
        self.rd
    }

    /// Returns the gravitational acceleration.
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Converts a geopotential in m2 s-2 to a geopotential height in m.
    pub fn geopotential_height(&self, phi: f64) -> f64 {
        phi / self.g
    }

    /// Validates that both constants are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidConstant`] naming the first bad value.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        for (name, value) in [("rd", self.rd), ("g", self.g)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PhysicsError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::new()
    }
}
