//! Dimension naming of GCM delta and reanalysis files.

use crate::error::IoError;

/// Names of the dimensions used to order fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimNames {
    /// Time dimension.
    time: String,
    /// GCM pressure level dimension of climate deltas.
    pressure_level: String,
    /// Reanalysis hybrid model level dimension.
    model_level: String,
    /// Reanalysis half-level dimension (one more entry than `model_level`).
    half_level: String,
    /// Latitude dimension.
    lat: String,
    /// Longitude dimension.
    lon: String,
}

impl Default for DimNames {
    fn default() -> Self {
        Self {
            time: "time".into(),
            pressure_level: "plev".into(),
            model_level: "level".into(),
            half_level: "half_level".into(),
            lat: "lat".into(),
            lon: "lon".into(),
        }
    }
}

impl DimNames {
    /// Set the time dimension name.
    pub fn with_time(mut self, name: impl Into<String>) -> Self {
        self.time = name.into();
        self
    }

    /// Set the GCM pressure level dimension name.
    pub fn with_pressure_level(mut self, name: impl Into<String>) -> Self {
        self.pressure_level = name.into();
        self
    }

    /// Set the model level dimension name.
    pub fn with_model_level(mut self, name: impl Into<String>) -> Self {
        self.model_level = name.into();
        self
    }

    /// Set the half-level dimension name.
    pub fn with_half_level(mut self, name: impl Into<String>) -> Self {
        self.half_level = name.into();
        self
    }

    /// Set the latitude dimension name.
    pub fn with_lat(mut self, name: impl Into<String>) -> Self {
        self.lat = name.into();
        self
    }

    /// Set the longitude dimension name.
    pub fn with_lon(mut self, name: impl Into<String>) -> Self {
        self.lon = name.into();
        self
    }

    /// Returns the time dimension name.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the GCM pressure level dimension name.
    pub fn pressure_level(&self) -> &str {
        &self.pressure_level
    }

    /// Returns the model level dimension name.
    pub fn model_level(&self) -> &str {
        &self.model_level
    }

    /// Returns the half-level dimension name.
    pub fn half_level(&self) -> &str {
        &self.half_level
    }

    /// Returns the latitude dimension name.
    pub fn lat(&self) -> &str {
        &self.lat
    }

    /// Returns the longitude dimension name.
    pub fn lon(&self) -> &str {
        &self.lon
    }

    /// `(time, plev, lat, lon)`
    pub fn pressure_order(&self) -> [&str; 4] {
        [&self.time, &self.pressure_level, &self.lat, &self.lon]
    }

    /// `(time, level, lat, lon)`
    pub fn model_order(&self) -> [&str; 4] {
        [&self.time, &self.model_level, &self.lat, &self.lon]
    }

    /// `(time, half_level, lat, lon)`
    pub fn half_level_order(&self) -> [&str; 4] {
        [&self.time, &self.half_level, &self.lat, &self.lon]
    }

    /// `(time, lat, lon)`
    pub fn surface_order(&self) -> [&str; 3] {
        [&self.time, &self.lat, &self.lon]
    }

    /// Validate that names are non-empty and that the axes of each ordering
    /// are distinct.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingDimension`] naming the offending entry.
    pub fn validate(&self) -> Result<(), IoError> {
        for order in [
            self.pressure_order(),
            self.model_order(),
            self.half_level_order(),
        ] {
            for (i, name) in order.iter().enumerate() {
                if name.is_empty() || order[..i].contains(name) {
                    return Err(IoError::MissingDimension {
                        name: (*name).to_string(),
                        field: "dimension configuration".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orders() {
        let d = DimNames::default();
        assert_eq!(d.pressure_order(), ["time", "plev", "lat", "lon"]);
        assert_eq!(d.model_order(), ["time", "level", "lat", "lon"]);
        assert_eq!(d.half_level_order(), ["time", "half_level", "lat", "lon"]);
        assert_eq!(d.surface_order(), ["time", "lat", "lon"]);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let d = DimNames::default()
            .with_model_level("hybrid")
            .with_lat("rlat")
            .with_lon("rlon");
        assert_eq!(d.model_order(), ["time", "hybrid", "rlat", "rlon"]);
    }

    #[test]
    fn validate_rejects_duplicates_and_empty() {
        let d = DimNames::default().with_lat("lon");
        assert!(matches!(
            d.validate(),
            Err(IoError::MissingDimension { ref name, .. }) if name == "lon"
        ));
        assert!(DimNames::default().with_time("").validate().is_err());
    }
}
