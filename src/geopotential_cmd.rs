//! Geopotential command: integrate reanalysis geopotential to a reference level.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use pgw_io::{Field, read_coordinates, write_fields};
use pgw_physics::{integrate_geopotential, select_domain_reference_level};

use crate::cli::GeopotentialArgs;
use crate::config::PgwConfig;
use crate::convert;
use crate::load::read_ordered;

/// Run the geopotential integration.
pub fn run(args: GeopotentialArgs) -> Result<()> {
    let _cmd = info_span!("geopotential").entered();
    let config = PgwConfig::load(args.config.as_deref())?;
    let dims = convert::build_dim_names(&config.dims)?;
    let constants = convert::build_constants(&config.physics)?;
    let vars = &config.variables;
    let candidates = args
        .p_ref_candidates
        .clone()
        .unwrap_or_else(|| config.physics.p_ref_candidates.clone());

    let pa_hl = read_ordered(&args.input, &vars.half_level_pressure, &dims.half_level_order())?;
    let ta = read_ordered(&args.input, &vars.temperature, &dims.model_order())?;
    let hus = read_ordered(&args.input, &vars.specific_humidity, &dims.model_order())?;
    let zgs = read_ordered(&args.input, &vars.surface_geopotential, &dims.surface_order())?;
    let ps = read_ordered(&args.input, &vars.surface_pressure, &dims.surface_order())?;
    let ps_pgw = match &args.pgw_surface_pressure {
        Some(path) => read_ordered(path, &vars.surface_pressure, &dims.surface_order())?,
        None => ps.clone(),
    };

    let p_ref = select_domain_reference_level(
        ps.data(),
        ps_pgw.data(),
        &candidates,
        args.previous_p_ref,
    )
    .with_context(|| format!("no reference pressure among {candidates:?} lies above the surface"))?;
    info!(p_ref, "reference pressure selected");

    let phi = integrate_geopotential(
        pa_hl.to_array4()?.view(),
        zgs.to_array3()?.view(),
        ta.to_array4()?.view(),
        hus.to_array4()?.view(),
        p_ref,
        &constants,
    )
    .context("failed to integrate geopotential")?;
    info!(
        max_height = phi.iter().copied().fold(f64::NAN, f64::max) / constants.g(),
        "geopotential integrated"
    );

    let dim_names: Vec<String> = dims.surface_order().iter().map(|s| s.to_string()).collect();
    let out = Field::new("phi_ref", dim_names, phi.into_dyn())?.with_units("m2 s-2");
    let coords = read_coordinates(&args.input, out.dims())?;
    write_fields(&args.output, &[&out], &coords)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "reference geopotential written");
    Ok(())
}
