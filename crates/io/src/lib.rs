//! # pgw-io
//!
//! Read climate deltas and reanalysis fields from NetCDF files as
//! named-dimension `ndarray` fields and write results back. Dimension
//! names are configurable through [`DimNames`]; fields are reordered by
//! name with [`Field::into_order`] before entering the numeric crates.

mod dims;
mod error;
mod field;
mod netcdf_read;
mod time;
mod writer;

pub use dims::DimNames;
pub use error::IoError;
pub use field::{Coordinate, Field};
pub use netcdf_read::{read_coordinate, read_coordinates, read_field, read_time_axis};
pub use writer::write_fields;
