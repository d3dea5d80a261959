//! NetCDF output of fields and their coordinates.

use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::field::{Coordinate, Field, named_shape};

/// Record `name` with length `len`, failing if it was seen with another length.
fn register_dim(dims: &mut Vec<(String, usize)>, name: &str, len: usize) -> Result<(), IoError> {
    match dims.iter().find(|(n, _)| n == name) {
        Some(&(_, existing)) if existing != len => Err(IoError::DimensionMismatch {
            name: name.to_string(),
            expected: existing,
            got: len,
        }),
        Some(_) => Ok(()),
        None => {
            dims.push((name.to_string(), len));
            Ok(())
        }
    }
}

/// Write `fields` and `coords` to a new NetCDF file at `path`.
///
/// Dimensions are created from the coordinates first and then from the
/// fields in order of appearance. Every data variable gets a NaN
/// `_FillValue`. An existing file is overwritten.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if a dimension name is used with
/// two lengths, or [`IoError::Netcdf`] if file creation or writing fails.
pub fn write_fields(path: &Path, fields: &[&Field], coords: &[Coordinate]) -> Result<(), IoError> {
    let mut dims = Vec::new();
    for coord in coords {
        register_dim(&mut dims, coord.name(), coord.values().len())?;
    }
    for field in fields {
        for (name, len) in named_shape(field) {
            register_dim(&mut dims, name, len)?;
        }
    }

    let mut file = netcdf::create(path)?;
    for (name, len) in &dims {
        file.add_dimension(name, *len)?;
    }

    for coord in coords {
        let mut var = file.add_variable::<f64>(coord.name(), &[coord.name()])?;
        if let Some(units) = coord.units() {
            var.put_attribute("units", units)?;
        }
        if let Some(calendar) = coord.calendar() {
            var.put_attribute("calendar", calendar)?;
        }
        var.put_values(coord.values(), ..)?;
    }

    for field in fields {
        let dim_refs: Vec<&str> = field.dims().iter().map(String::as_str).collect();
        let mut var = file.add_variable::<f64>(field.name(), &dim_refs)?;
        var.put_attribute("_FillValue", f64::NAN)?;
        if let Some(units) = field.units() {
            var.put_attribute("units", units)?;
        }
        let values: Vec<f64> = field.data().iter().copied().collect();
        var.put_values(&values, ..)?;
    }

    info!(
        path = %path.display(),
        n_fields = fields.len(),
        n_coords = coords.len(),
        "wrote NetCDF"
    );
    Ok(())
}
