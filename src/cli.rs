use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pseudo global warming delta processing.
#[derive(Parser)]
#[command(
    name = "pgw",
    version,
    about = "Smooth and regrid climate deltas for pseudo global warming runs"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of worker threads for column loops (default: all cores).
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Smooth an annual-cycle delta with its first three harmonics.
    Smooth(SmoothArgs),
    /// Interpolate a pressure-level delta onto target model-level pressures.
    Interp(InterpArgs),
    /// Integrate geopotential up to a selected reference pressure.
    Geopotential(GeopotentialArgs),
}

/// Arguments for the `smooth` subcommand.
#[derive(clap::Args)]
pub struct SmoothArgs {
    /// NetCDF file holding the annual-cycle delta.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Variable to smooth.
    #[arg(long = "var")]
    pub var: String,

    /// Output NetCDF path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `interp` subcommand.
#[derive(clap::Args)]
pub struct InterpArgs {
    /// NetCDF file holding the delta on GCM pressure levels.
    #[arg(long)]
    pub delta: PathBuf,

    /// Variable to interpolate.
    #[arg(long = "var")]
    pub var: String,

    /// NetCDF file holding the target pressure field on model levels.
    #[arg(long = "target-pressure")]
    pub target_pressure: PathBuf,

    /// Output NetCDF path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// NetCDF file holding the surface delta, spliced in at the surface.
    #[arg(long = "surface-delta", requires = "surface_pressure")]
    pub surface_delta: Option<PathBuf>,

    /// NetCDF file holding the historical surface pressure.
    #[arg(long = "surface-pressure")]
    pub surface_pressure: Option<PathBuf>,

    /// Interpolate the annual cycle to this timestamp first (ISO 8601).
    #[arg(long)]
    pub date: Option<String>,

    /// Warn instead of failing when targets reach above the delta's top level.
    #[arg(long = "ignore-top-pressure-error")]
    pub ignore_top_pressure_error: bool,

    /// Extrapolation mode: off, linear or constant.
    #[arg(long)]
    pub extrapolate: Option<String>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `geopotential` subcommand.
#[derive(clap::Args)]
pub struct GeopotentialArgs {
    /// Reanalysis NetCDF file with half-level pressure, ta, hus, zgs and ps.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output NetCDF path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Surface pressure of the perturbed climate (defaults to the input's).
    #[arg(long = "pgw-surface-pressure")]
    pub pgw_surface_pressure: Option<PathBuf>,

    /// Comma-separated candidate reference pressures in Pa, tried in order.
    #[arg(long = "p-ref-candidates", value_delimiter = ',')]
    pub p_ref_candidates: Option<Vec<f64>>,

    /// Reference pressure of the previous iteration, which caps the choice.
    #[arg(long = "previous-p-ref")]
    pub previous_p_ref: Option<f64>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
