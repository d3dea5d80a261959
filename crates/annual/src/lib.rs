//! # pgw-annual
//!
//! Annual-cycle handling for climate deltas: harmonic smoothing along time
//! and periodic interpolation to a single date.
//!
//! ```mermaid
//! graph LR
//!     A["daily or monthly delta"] -->|"smooth_field()"| B["mean + 3 harmonics"]
//!     B -->|"interpolate_to_date()"| C["delta at one timestamp"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use pgw_annual::{interpolate_to_date, smooth_field};
//!
//! let smooth = smooth_field(delta.view())?;
//! let at_date = interpolate_to_date(&times, smooth.view(), target)?;
//! ```

mod error;
mod harmonic;
mod time;

pub use error::AnnualError;
pub use harmonic::{N_HARMONICS, smooth_annual_cycle, smooth_field};
pub use time::interpolate_to_date;
