//! Named-dimension fields and coordinates.

use chrono::NaiveDateTime;
use ndarray::{Array3, Array4, ArrayD, Axis, IxDyn};

use crate::error::IoError;
use crate::time::encode_times;

/// An n-dimensional variable with a name per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    dims: Vec<String>,
    data: ArrayD<f64>,
    units: Option<String>,
}

impl Field {
    /// Creates a field, checking that there is one name per axis.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `dims.len()` differs from the
    /// rank of `data`.
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        data: ArrayD<f64>,
    ) -> Result<Self, IoError> {
        let name = name.into();
        if dims.len() != data.ndim() {
            return Err(IoError::DimensionMismatch {
                name: format!("{name} rank"),
                expected: data.ndim(),
                got: dims.len(),
            });
        }
        Ok(Self {
            name,
            dims,
            data,
            units: None,
        })
    }

    /// Sets the `units` attribute.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dimension names in axis order.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Returns the data.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Returns the `units` attribute if present.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the axis index of dimension `name`.
    pub fn axis_of(&self, name: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == name)
    }

    fn require_axis(&self, name: &str) -> Result<usize, IoError> {
        self.axis_of(name).ok_or_else(|| IoError::MissingDimension {
            name: name.to_string(),
            field: self.name.clone(),
        })
    }

    /// Permutes the axes so that they follow `order`.
    ///
    /// The result is in standard layout.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingDimension`] if a name in `order` is not a
    /// dimension of the field and [`IoError::DimensionMismatch`] if `order`
    /// does not name every dimension.
    pub fn into_order(self, order: &[&str]) -> Result<Self, IoError> {
        let perm = order
            .iter()
            .map(|name| self.require_axis(name))
            .collect::<Result<Vec<_>, _>>()?;
        if perm.len() != self.dims.len() {
            return Err(IoError::DimensionMismatch {
                name: format!("{} rank", self.name),
                expected: self.dims.len(),
                got: perm.len(),
            });
        }
        if perm.iter().enumerate().all(|(i, &p)| i == p) {
            return Ok(self);
        }
        let data = self
            .data
            .permuted_axes(IxDyn(&perm))
            .as_standard_layout()
            .into_owned();
        Ok(Self {
            dims: order.iter().map(|s| s.to_string()).collect(),
            data,
            ..self
        })
    }

    /// Inserts a length-1 axis named `name` at position `index`, unless the
    /// field already has that dimension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `index` is past the last axis.
    pub fn with_axis(self, name: &str, index: usize) -> Result<Self, IoError> {
        if self.axis_of(name).is_some() {
            return Ok(self);
        }
        if index > self.dims.len() {
            return Err(IoError::DimensionMismatch {
                name: format!("{} insertion index", self.name),
                expected: self.dims.len(),
                got: index,
            });
        }
        let Self {
            name: field_name,
            mut dims,
            data,
            units,
        } = self;
        dims.insert(index, name.to_string());
        Ok(Self {
            name: field_name,
            dims,
            data: data.insert_axis(Axis(index)),
            units,
        })
    }

    /// Replaces the data, keeping name, dimensions and units.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the rank changes.
    pub fn with_data(self, data: ArrayD<f64>) -> Result<Self, IoError> {
        let units = self.units;
        let mut field = Self::new(self.name, self.dims, data)?;
        field.units = units;
        Ok(field)
    }

    /// Converts the data to a 4-D array.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the field is not 4-D.
    pub fn to_array4(&self) -> Result<Array4<f64>, IoError> {
        self.data
            .clone()
            .into_dimensionality()
            .map_err(|_| self.rank_error(4))
    }

    /// Converts the data to a 3-D array.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the field is not 3-D.
    pub fn to_array3(&self) -> Result<Array3<f64>, IoError> {
        self.data
            .clone()
            .into_dimensionality()
            .map_err(|_| self.rank_error(3))
    }

    fn rank_error(&self, expected: usize) -> IoError {
        IoError::DimensionMismatch {
            name: format!("{} rank", self.name),
            expected,
            got: self.data.ndim(),
        }
    }
}

/// A 1-D coordinate variable named after its dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    name: String,
    values: Vec<f64>,
    units: Option<String>,
    calendar: Option<String>,
}

impl Coordinate {
    /// Creates a coordinate without attributes.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            units: None,
            calendar: None,
        }
    }

    /// Creates a time coordinate encoded as seconds since the first timestamp.
    pub fn from_times(name: impl Into<String>, times: &[NaiveDateTime]) -> Self {
        let (values, units) = encode_times(times);
        Self::new(name, values)
            .with_units(units)
            .with_calendar("proleptic_gregorian")
    }

    /// Sets the `units` attribute.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Sets the `calendar` attribute.
    pub fn with_calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Returns the dimension and variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the coordinate values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the `units` attribute if present.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Returns the `calendar` attribute if present.
    pub fn calendar(&self) -> Option<&str> {
        self.calendar.as_deref()
    }
}

/// Shape of a field as `(dimension name, length)` pairs.
pub(crate) fn named_shape(field: &Field) -> impl Iterator<Item = (&str, usize)> {
    field
        .dims
        .iter()
        .map(String::as_str)
        .zip(field.data.shape().iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, array};

    fn dims(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Field {
        let data = Array::from_shape_fn((2, 3, 4), |(a, b, c)| (100 * a + 10 * b + c) as f64);
        Field::new("ta", dims(&["lat", "plev", "lon"]), data.into_dyn()).unwrap()
    }

    #[test]
    fn rank_must_match() {
        let result = Field::new("x", dims(&["a"]), array![[1.0]].into_dyn());
        assert!(matches!(result, Err(IoError::DimensionMismatch { expected: 2, got: 1, .. })));
    }

    #[test]
    fn into_order_permutes_data() {
        let f = sample().into_order(&["plev", "lat", "lon"]).unwrap();
        assert_eq!(f.dims(), dims(&["plev", "lat", "lon"]).as_slice());
        assert_eq!(f.data().shape(), &[3, 2, 4]);
        assert_eq!(f.data()[[2, 1, 3].as_slice()], 123.0);
        assert!(f.data().is_standard_layout());
    }

    #[test]
    fn into_order_identity_is_noop() {
        let f = sample();
        let g = f.clone().into_order(&["lat", "plev", "lon"]).unwrap();
        assert_eq!(f, g);
    }

    #[test]
    fn into_order_reports_missing_dimension() {
        let result = sample().into_order(&["time", "plev", "lat", "lon"]);
        assert!(matches!(
            result,
            Err(IoError::MissingDimension { ref name, .. }) if name == "time"
        ));
    }

    #[test]
    fn into_order_requires_every_dimension() {
        let result = sample().into_order(&["plev", "lat"]);
        assert!(matches!(result, Err(IoError::DimensionMismatch { .. })));
    }

    #[test]
    fn with_axis_inserts_singleton() {
        let f = sample().with_axis("time", 0).unwrap();
        assert_eq!(f.data().shape(), &[1, 2, 3, 4]);
        assert_eq!(f.axis_of("time"), Some(0));
        assert_eq!(f.axis_of("lon"), Some(3));
        let again = f.clone().with_axis("time", 2).unwrap();
        assert_eq!(again, f);
    }

    #[test]
    fn to_array_checks_rank() {
        let f = sample();
        assert!(f.to_array3().is_ok());
        assert!(matches!(
            f.to_array4(),
            Err(IoError::DimensionMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn with_data_keeps_units() {
        let f = sample().with_units("K");
        let g = f.with_data(ArrayD::zeros(vec![1, 1, 1])).unwrap();
        assert_eq!(g.units(), Some("K"));
        assert_eq!(g.name(), "ta");
    }

    #[test]
    fn time_coordinate() {
        let t0 = chrono::NaiveDate::from_ymd_opt(2071, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let c = Coordinate::from_times("time", &[t0, t0 + chrono::TimeDelta::hours(6)]);
        assert_eq!(c.values(), &[0.0, 21_600.0]);
        assert_eq!(c.units(), Some("seconds since 2071-06-01 00:00:00"));
    }
}
