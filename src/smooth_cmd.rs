//! Smooth command: harmonic smoothing of an annual-cycle delta.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use pgw_annual::smooth_field;
use pgw_io::{read_coordinates, read_field, write_fields};

use crate::cli::SmoothArgs;
use crate::config::PgwConfig;
use crate::convert;

/// Run the smoothing pipeline.
pub fn run(args: SmoothArgs) -> Result<()> {
    let _cmd = info_span!("smooth", var = %args.var).entered();
    let config = PgwConfig::load(args.config.as_deref())?;
    let dims = convert::build_dim_names(&config.dims)?;

    info!(path = %args.input.display(), "reading annual cycle");
    let field = read_field(&args.input, &args.var, &[])
        .with_context(|| format!("failed to read '{}' from {}", args.var, args.input.display()))?;
    if field.axis_of(dims.time()).is_none() {
        bail!("'{}' has no '{}' dimension", args.var, dims.time());
    }

    // Time first, other axes in file order.
    let order: Vec<String> = std::iter::once(dims.time().to_string())
        .chain(field.dims().iter().filter(|d| *d != dims.time()).cloned())
        .collect();
    let order: Vec<&str> = order.iter().map(String::as_str).collect();
    let field = field.into_order(&order)?;

    let smooth = smooth_field(field.data().view())
        .with_context(|| format!("failed to smooth '{}'", args.var))?;
    let field = field.with_data(smooth)?;
    info!("annual cycle smoothed");

    let coords = read_coordinates(&args.input, field.dims())?;
    write_fields(&args.output, &[&field], &coords)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), "smoothed delta written");
    Ok(())
}
