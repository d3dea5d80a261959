//! # pgw-vertical
//!
//! Vertical interpolation of climate deltas between pressure coordinates.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["delta on GCM levels"] -->|"sort levels, broadcast"| B["source pressure field"]
//!     B -->|"splice_surface_field()"| C["surface-aware profile"]
//!     C -->|"interpolate_field()"| D["delta on target pressures"]
//!     D -.->|"per column"| E["interpolate_column()"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use pgw_vertical::{ExtrapolationMode, SurfaceDelta, VerticalConfig, interpolate_delta};
//!
//! let config = VerticalConfig::new().with_mode(ExtrapolationMode::Constant);
//! let surface = SurfaceDelta::new(ps_hist.view(), tas_delta.view());
//! let regridded = interpolate_delta(&plev, ta_delta.view(), era_p.view(), Some(&surface), &config)?;
//! ```
//!
//! Fields are `ndarray` arrays ordered `(time, vertical, lat, lon)`.

mod column;
mod config;
mod delta;
mod error;
mod grid;
mod surface;

pub use column::interpolate_column;
pub use config::{ExtrapolationMode, VerticalConfig};
pub use delta::{SurfaceDelta, interpolate_delta};
pub use error::VerticalError;
pub use grid::interpolate_field;
pub use surface::{splice_surface, splice_surface_field};
