//! Interp command: regrid a pressure-level delta onto model-level pressures.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use pgw_io::{Coordinate, Field, read_coordinate, read_coordinates, write_fields};
use pgw_vertical::{SurfaceDelta, interpolate_delta};

use crate::cli::InterpArgs;
use crate::config::PgwConfig;
use crate::convert;
use crate::load::{at_date, read_ordered};

/// Run the vertical interpolation pipeline.
pub fn run(args: InterpArgs) -> Result<()> {
    let _cmd = info_span!("interp", var = %args.var).entered();
    let config = PgwConfig::load(args.config.as_deref())?;
    let dims = convert::build_dim_names(&config.dims)?;
    let vertical = convert::build_vertical_config(
        &config.vertical,
        args.extrapolate.as_deref(),
        args.ignore_top_pressure_error,
    )?;
    let date = args.date.as_deref().map(convert::parse_datetime).transpose()?;
    info!(mode = %vertical.mode(), ?date, "interpolation settings");

    // 1. Delta on GCM pressure levels, optionally at one date.
    let delta = read_ordered(&args.delta, &args.var, &dims.pressure_order())?;
    let delta = at_date(&args.delta, delta, dims.time(), date)?;
    let plev = read_coordinate(&args.delta, dims.pressure_level()).with_context(|| {
        format!("failed to read pressure levels from {}", args.delta.display())
    })?;

    // 2. Target pressures on model levels.
    let target = read_ordered(
        &args.target_pressure,
        &config.variables.target_pressure,
        &dims.model_order(),
    )?;

    // 3. Optional surface delta and historical surface pressure.
    let surface = match (&args.surface_delta, &args.surface_pressure) {
        (Some(sfc_path), Some(ps_path)) => {
            let sfc_var = config
                .variables
                .surface_delta
                .clone()
                .unwrap_or_else(|| format!("{}s", args.var));
            let sfc = read_ordered(sfc_path, &sfc_var, &dims.surface_order())?;
            let sfc = at_date(sfc_path, sfc, dims.time(), date)?;
            let ps = read_ordered(ps_path, &config.variables.surface_pressure, &dims.surface_order())?;
            let ps = at_date(ps_path, ps, dims.time(), date)?;
            Some((ps.to_array3()?, sfc.to_array3()?))
        }
        (None, Some(ps_path)) => {
            warn!(path = %ps_path.display(), "surface pressure given without a surface delta, ignoring");
            None
        }
        _ => None,
    };

    // 4. Regrid.
    let delta_data = delta.to_array4()?;
    let target_data = target.to_array4()?;
    let surface_delta = surface
        .as_ref()
        .map(|(ps, sfc)| SurfaceDelta::new(ps.view(), sfc.view()));
    let regridded = interpolate_delta(
        &plev,
        delta_data.view(),
        target_data.view(),
        surface_delta.as_ref(),
        &vertical,
    )
    .with_context(|| format!("failed to interpolate '{}' onto target pressures", args.var))?;
    info!(shape = ?regridded.shape(), "delta interpolated");

    // 5. Write on the target grid.
    let dim_names: Vec<String> = dims.model_order().iter().map(|s| s.to_string()).collect();
    let mut out = Field::new(args.var.as_str(), dim_names, regridded.into_dyn())?;
    if let Some(units) = delta.units() {
        out = out.with_units(units);
    }
    let mut coords = read_coordinates(&args.target_pressure, out.dims())?;
    if let Some(date) = date {
        if coords.iter().all(|c| c.name() != dims.time()) {
            coords.push(Coordinate::from_times(dims.time(), &[date]));
        }
    }
    write_fields(&args.output, &[&out], &coords)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "interpolated delta written");
    Ok(())
}
