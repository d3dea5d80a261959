//! Regridding of pressure-level climate deltas onto a target pressure field.

use ndarray::{Array4, ArrayView3, ArrayView4};
use tracing::debug;

use crate::config::VerticalConfig;
use crate::error::VerticalError;
use crate::grid::{VERTICAL, interpolate_field};
use crate::surface::splice_surface_field;

/// Surface information used to refine a delta before regridding.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceDelta<'a> {
    /// Historical surface pressure, `(time, lat, lon)`.
    pressure: ArrayView3<'a, f64>,
    /// Surface-level delta, `(time, lat, lon)`.
    delta: ArrayView3<'a, f64>,
}

impl<'a> SurfaceDelta<'a> {
    /// Pairs a historical surface pressure field with the surface delta.
    pub fn new(pressure: ArrayView3<'a, f64>, delta: ArrayView3<'a, f64>) -> Self {
        Self { pressure, delta }
    }

    /// Returns the historical surface pressure.
    pub fn pressure(&self) -> ArrayView3<'a, f64> {
        self.pressure
    }

    /// Returns the surface delta.
    pub fn delta(&self) -> ArrayView3<'a, f64> {
        self.delta
    }
}

/// Vertically interpolates a delta defined on fixed pressure `levels` onto
/// `target_p`.
///
/// `delta` is `(time, level, lat, lon)` with `levels.len()` levels in any
/// order. Levels are sorted top to bottom (ascending pressure) and broadcast
/// to a 4-D source pressure field. When `surface` is given, the surface delta
/// is spliced in at the historical surface pressure before interpolation.
///
/// # Errors
///
/// Returns [`VerticalError::LengthMismatch`] if `levels` does not match the
/// vertical size of `delta`, and propagates errors from
/// [`splice_surface_field`] and [`interpolate_field`].
#[tracing::instrument(skip_all, fields(n_levels = levels.len(), spliced = surface.is_some()))]
pub fn interpolate_delta(
    levels: &[f64],
    delta: ArrayView4<'_, f64>,
    target_p: ArrayView4<'_, f64>,
    surface: Option<&SurfaceDelta<'_>>,
    config: &VerticalConfig,
) -> Result<Array4<f64>, VerticalError> {
    let n_levels = delta.len_of(VERTICAL);
    if levels.len() != n_levels {
        return Err(VerticalError::LengthMismatch {
            expected: n_levels,
            got: levels.len(),
            field: "levels",
        });
    }

    let mut order: Vec<usize> = (0..n_levels).collect();
    order.sort_by(|&a, &b| levels[a].total_cmp(&levels[b]));
    let sorted_levels: Vec<f64> = order.iter().map(|&k| levels[k]).collect();
    let sorted_delta = delta.select(VERTICAL, &order);
    let source_p = Array4::from_shape_fn(sorted_delta.raw_dim(), |(_, k, _, _)| sorted_levels[k]);

    let (source_p, sorted_delta) = match surface {
        Some(surface) => {
            debug!("splicing surface delta");
            splice_surface_field(
                source_p.view(),
                surface.pressure(),
                sorted_delta.view(),
                surface.delta(),
            )?
        }
        None => (source_p, sorted_delta),
    };

    interpolate_field(sorted_delta.view(), source_p.view(), target_p, config)
}
