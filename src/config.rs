use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level PGW configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PgwConfig {
    /// Dimension names.
    #[serde(default)]
    pub dims: DimsToml,

    /// Vertical interpolation settings.
    #[serde(default)]
    pub vertical: VerticalToml,

    /// Physical constants and reference level candidates.
    #[serde(default)]
    pub physics: PhysicsToml,

    /// Variable names inside the input files.
    #[serde(default)]
    pub variables: VariablesToml,
}

impl PgwConfig {
    /// Reads a TOML file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config TOML: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimsToml {
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_pressure_level")]
    pub pressure_level: String,
    #[serde(default = "default_model_level")]
    pub model_level: String,
    #[serde(default = "default_half_level")]
    pub half_level: String,
    #[serde(default = "default_lat")]
    pub lat: String,
    #[serde(default = "default_lon")]
    pub lon: String,
}

impl Default for DimsToml {
    fn default() -> Self {
        Self {
            time: default_time(),
            pressure_level: default_pressure_level(),
            model_level: default_model_level(),
            half_level: default_half_level(),
            lat: default_lat(),
            lon: default_lon(),
        }
    }
}

fn default_time() -> String {
    "time".to_string()
}
fn default_pressure_level() -> String {
    "plev".to_string()
}
fn default_model_level() -> String {
    "level".to_string()
}
fn default_half_level() -> String {
    "half_level".to_string()
}
fn default_lat() -> String {
    "lat".to_string()
}
fn default_lon() -> String {
    "lon".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerticalToml {
    #[serde(default = "default_extrapolate")]
    pub extrapolate: String,
    #[serde(default)]
    pub ignore_top_pressure_error: bool,
}

impl Default for VerticalToml {
    fn default() -> Self {
        Self {
            extrapolate: default_extrapolate(),
            ignore_top_pressure_error: false,
        }
    }
}

fn default_extrapolate() -> String {
    "constant".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicsToml {
    #[serde(default = "default_rd")]
    pub rd: f64,
    #[serde(default = "default_g")]
    pub g: f64,
    #[serde(default = "default_p_ref_candidates")]
    pub p_ref_candidates: Vec<f64>,
}

impl Default for PhysicsToml {
    fn default() -> Self {
        Self {
            rd: default_rd(),
            g: default_g(),
            p_ref_candidates: default_p_ref_candidates(),
        }
    }
}

fn default_rd() -> f64 {
    287.06
}
fn default_g() -> f64 {
    9.80665
}
fn default_p_ref_candidates() -> Vec<f64> {
    vec![100_000.0, 92_500.0, 85_000.0, 70_000.0, 50_000.0, 30_000.0]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariablesToml {
    #[serde(default = "default_surface_pressure")]
    pub surface_pressure: String,
    #[serde(default = "default_target_pressure")]
    pub target_pressure: String,
    /// Surface delta variable; `<var>s` (e.g. `tas` for `ta`) when unset.
    #[serde(default)]
    pub surface_delta: Option<String>,
    #[serde(default = "default_half_level_pressure")]
    pub half_level_pressure: String,
    #[serde(default = "default_surface_geopotential")]
    pub surface_geopotential: String,
    #[serde(default = "default_temperature")]
    pub temperature: String,
    #[serde(default = "default_specific_humidity")]
    pub specific_humidity: String,
}

impl Default for VariablesToml {
    fn default() -> Self {
        Self {
            surface_pressure: default_surface_pressure(),
            target_pressure: default_target_pressure(),
            surface_delta: None,
            half_level_pressure: default_half_level_pressure(),
            surface_geopotential: default_surface_geopotential(),
            temperature: default_temperature(),
            specific_humidity: default_specific_humidity(),
        }
    }
}

fn default_surface_pressure() -> String {
    "ps".to_string()
}
fn default_target_pressure() -> String {
    "pa".to_string()
}
fn default_half_level_pressure() -> String {
    "pa_hl".to_string()
}
fn default_surface_geopotential() -> String {
    "zgs".to_string()
}
fn default_temperature() -> String {
    "ta".to_string()
}
fn default_specific_humidity() -> String {
    "hus".to_string()
}
