//! Pure conversion functions: TOML config structs and CLI strings -> crate API types.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};

use pgw_io::DimNames;
use pgw_physics::PhysicalConstants;
use pgw_vertical::{ExtrapolationMode, VerticalConfig};

use crate::config::{DimsToml, PhysicsToml, VerticalToml};

/// Parses an extrapolation mode name into the corresponding enum variant.
pub fn parse_extrapolation(s: &str) -> Result<ExtrapolationMode> {
    match s.to_lowercase().as_str() {
        "off" => Ok(ExtrapolationMode::Off),
        "linear" => Ok(ExtrapolationMode::Linear),
        "constant" => Ok(ExtrapolationMode::Constant),
        other => bail!("unknown extrapolation mode: {other:?}"),
    }
}

/// Parses an ISO 8601 timestamp, with or without a time of day.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date {s:?}: expected YYYY-MM-DD[THH:MM:SS]"))?;
    match date.and_hms_opt(0, 0, 0) {
        Some(dt) => Ok(dt),
        None => bail!("invalid date {s:?}"),
    }
}

/// Builds a [`VerticalConfig`], letting CLI flags override the file.
pub fn build_vertical_config(
    toml: &VerticalToml,
    extrapolate: Option<&str>,
    ignore_top_pressure_error: bool,
) -> Result<VerticalConfig> {
    let mode = parse_extrapolation(extrapolate.unwrap_or(&toml.extrapolate))?;
    Ok(VerticalConfig::new()
        .with_mode(mode)
        .with_ignore_top_pressure_error(ignore_top_pressure_error || toml.ignore_top_pressure_error))
}

/// Builds and validates [`DimNames`].
pub fn build_dim_names(toml: &DimsToml) -> Result<DimNames> {
    let dims = DimNames::default()
        .with_time(&toml.time)
        .with_pressure_level(&toml.pressure_level)
        .with_model_level(&toml.model_level)
        .with_half_level(&toml.half_level)
        .with_lat(&toml.lat)
        .with_lon(&toml.lon);
    dims.validate().context("invalid [dims] configuration")?;
    Ok(dims)
}

/// Builds and validates [`PhysicalConstants`].
pub fn build_constants(toml: &PhysicsToml) -> Result<PhysicalConstants> {
    let constants = PhysicalConstants::new().with_rd(toml.rd).with_g(toml.g);
    constants.validate().context("invalid [physics] configuration")?;
    Ok(constants)
}
