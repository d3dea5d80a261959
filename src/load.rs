//! Shared field loading for the subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::info;

use pgw_annual::interpolate_to_date;
use pgw_io::{Field, read_field, read_time_axis};

/// Reads `var` from `path` and orders its axes as `order`.
///
/// `order[0]` is the time dimension; a file without it gets a length-1 time
/// axis.
pub fn read_ordered(path: &Path, var: &str, order: &[&str]) -> Result<Field> {
    info!(path = %path.display(), var, "reading field");
    let field = read_field(path, var, &[])
        .with_context(|| format!("failed to read '{var}' from {}", path.display()))?;
    field
        .with_axis(order[0], 0)
        .and_then(|f| f.into_order(order))
        .with_context(|| format!("'{var}' in {} does not have dimensions {order:?}", path.display()))
}

/// Interpolates a time-leading annual-cycle field to `date` when one is given.
pub fn at_date(path: &Path, field: Field, time_dim: &str, date: Option<NaiveDateTime>) -> Result<Field> {
    let Some(date) = date else {
        return Ok(field);
    };
    let times = read_time_axis(path, time_dim)
        .with_context(|| format!("failed to read time axis of {}", path.display()))?;
    let data = interpolate_to_date(&times, field.data().view(), date)
        .with_context(|| format!("failed to interpolate '{}' to {date}", field.name()))?;
    info!(var = field.name(), %date, "interpolated annual cycle in time");
    Ok(field.with_data(data)?)
}
