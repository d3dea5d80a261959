//! # pgw-physics
//!
//! Thermodynamic helpers for the PGW workflow: reference level selection,
//! hydrostatic geopotential integration and humidity conversion.
//!
//! ```mermaid
//! graph LR
//!     A["surface pressure (hist, future)"] -->|"select_domain_reference_level()"| B["p_ref"]
//!     B --> C["integrate_geopotential()"]
//!     D["half-level pressure, ta, hus, zgs"] --> C
//!     C --> E["geopotential at p_ref"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use pgw_physics::{PhysicalConstants, integrate_geopotential, select_domain_reference_level};
//!
//! let constants = PhysicalConstants::new();
//! let p_ref = select_domain_reference_level(&ps_era, &ps_pgw, &candidates, previous)
//!     .ok_or("no reference level above the surface")?;
//! let phi = integrate_geopotential(pa_hl.view(), zgs.view(), ta.view(), hus.view(), p_ref, &constants)?;
//! ```

mod constants;
mod error;
mod geopotential;
mod humidity;
mod reference;

pub use constants::PhysicalConstants;
pub use error::PhysicsError;
pub use geopotential::{
    MIN_PRESSURE, integrate_geopotential, integrate_geopotential_column, virtual_temperature,
};
pub use humidity::{
    relative_to_specific, relative_to_specific_field, specific_to_relative,
    specific_to_relative_field,
};
pub use reference::{select_domain_reference_level, select_reference_level};
