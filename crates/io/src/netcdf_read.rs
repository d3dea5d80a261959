//! NetCDF extraction of fields, coordinates and time axes.

use std::path::Path;

use chrono::NaiveDateTime;
use ndarray::{ArrayD, IxDyn};
use netcdf::AttributeValue;
use tracing::debug;

use crate::error::IoError;
use crate::field::{Coordinate, Field};
use crate::time::{Calendar, decode_offsets, parse_time_units};

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Look up a variable, trying each alias in order.
fn find_variable<'f>(
    file: &'f netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    aliases
        .iter()
        .find_map(|&alias| file.variable(alias))
        .ok_or_else(|| IoError::MissingVariable {
            name: aliases.first().copied().unwrap_or("unknown").to_string(),
            path: path.to_path_buf(),
        })
}

fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    var.attribute_value(name)
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        })
}

fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|res| res.ok())
        .and_then(|av| match av {
            AttributeValue::Double(v) => Some(v),
            AttributeValue::Float(v) => Some(f64::from(v)),
            AttributeValue::Schar(v) => Some(f64::from(v)),
            AttributeValue::Uchar(v) => Some(f64::from(v)),
            AttributeValue::Short(v) => Some(f64::from(v)),
            AttributeValue::Ushort(v) => Some(f64::from(v)),
            AttributeValue::Int(v) => Some(f64::from(v)),
            AttributeValue::Uint(v) => Some(f64::from(v)),
            _ => None,
        })
}

/// Read a variable as a [`Field`], trying `name` first and then `aliases`.
///
/// Values equal to `_FillValue` or `missing_value` are replaced by NaN. The
/// remaining values are unpacked as `v * scale_factor + add_offset` when
/// either attribute is present. The field is named `name` regardless of
/// which alias matched.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingVariable`] or
/// [`IoError::Netcdf`] on failure.
pub fn read_field(path: &Path, name: &str, aliases: &[&str]) -> Result<Field, IoError> {
    let file = open_file(path)?;
    let candidates: Vec<&str> = std::iter::once(name).chain(aliases.iter().copied()).collect();
    let var = find_variable(&file, &candidates, path)?;

    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let mut values = var.get_values::<f64, _>(..)?;
    let fills: Vec<f64> = ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|attr| numeric_attribute(&var, attr))
        .collect();
    let scale = numeric_attribute(&var, "scale_factor");
    let offset = numeric_attribute(&var, "add_offset");
    let (scale_v, offset_v) = (scale.unwrap_or(1.0), offset.unwrap_or(0.0));
    let packed = scale.is_some() || offset.is_some();
    let mut n_masked = 0usize;
    for v in values.iter_mut() {
        if fills.contains(v) {
            *v = f64::NAN;
            n_masked += 1;
        } else if packed {
            *v = *v * scale_v + offset_v;
        }
    }

    let n_values = values.len();
    let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| {
        IoError::DimensionMismatch {
            name: format!("{name} values"),
            expected: shape.iter().product(),
            got: n_values,
        }
    })?;
    debug!(var = name, ?dims, ?shape, n_masked, packed, "read field");

    let field = Field::new(name, dims, data)?;
    Ok(match string_attribute(&var, "units") {
        Some(units) => field.with_units(units),
        None => field,
    })
}

/// Read a 1-D coordinate variable.
///
/// # Errors
///
/// Returns [`IoError::MissingVariable`] if `name` is absent.
pub fn read_coordinate(path: &Path, name: &str) -> Result<Vec<f64>, IoError> {
    let file = open_file(path)?;
    let var = find_variable(&file, &[name], path)?;
    Ok(var.get_values::<f64, _>(..)?)
}

/// Read the coordinate variables of `dims` that exist in the file, together
/// with their `units` and `calendar` attributes.
///
/// Dimensions without a 1-D variable of the same name are skipped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] or [`IoError::Netcdf`] on failure.
pub fn read_coordinates(path: &Path, dims: &[String]) -> Result<Vec<Coordinate>, IoError> {
    let file = open_file(path)?;
    let mut coords = Vec::with_capacity(dims.len());
    for dim in dims {
        let Some(var) = file.variable(dim) else {
            continue;
        };
        if var.dimensions().len() != 1 {
            continue;
        }
        let mut coord = Coordinate::new(dim.as_str(), var.get_values::<f64, _>(..)?);
        if let Some(units) = string_attribute(&var, "units") {
            coord = coord.with_units(units);
        }
        if let Some(calendar) = string_attribute(&var, "calendar") {
            coord = coord.with_calendar(calendar);
        }
        coords.push(coord);
    }
    Ok(coords)
}

/// Read and decode a CF time axis.
///
/// Units of the form `"<days|hours|minutes|seconds> since <date>"` are
/// supported for the standard, gregorian, proleptic_gregorian, noleap and
/// 365_day calendars.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] if the units or calendar cannot be
/// interpreted.
pub fn read_time_axis(path: &Path, time_var: &str) -> Result<Vec<NaiveDateTime>, IoError> {
    let file = open_file(path)?;
    let var = find_variable(&file, &[time_var], path)?;

    let units = string_attribute(&var, "units").ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_var}' has no string 'units' attribute"),
    })?;
    let units = parse_time_units(&units)?;
    let calendar = Calendar::parse(string_attribute(&var, "calendar").as_deref())?;

    let offsets = var.get_values::<f64, _>(..)?;
    let times = decode_offsets(&offsets, units, calendar)?;
    debug!(time_var, n_steps = times.len(), ?calendar, "read time axis");
    Ok(times)
}
