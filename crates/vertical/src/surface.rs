//! Splicing of surface deltas into pressure-level delta profiles.
//!
//! The level just above the historical surface is moved to the surface
//! pressure and takes the surface value. Levels below the surface are inside
//! the orography, where the climate model delta is unreliable, so they are
//! clamped to the surface value as well.

use ndarray::{Array3, Array4, ArrayView1, ArrayView3, ArrayView4, Zip};

use crate::column::check_ascending;
use crate::error::VerticalError;
use crate::grid::VERTICAL;

/// Splices `surface_value` at `surface_pressure` into one ascending column.
///
/// - Surface deeper than every level: the deepest level moves to the surface
///   and takes the surface value.
/// - Otherwise `k` is the deepest level with pressure below the surface; its
///   pressure becomes `surface_pressure` and levels `k..` take
///   `surface_value`.
///
/// Returns new `(pressures, profile)` vectors.
///
/// # Errors
///
/// Returns [`VerticalError::EmptyColumn`] if `source_p` is empty.
/// Returns [`VerticalError::LengthMismatch`] if `profile` differs in length.
/// Returns [`VerticalError::UnsortedColumn`] if `source_p` is not ascending.
/// Returns [`VerticalError::SurfaceBounds`] if no level lies above the
/// surface (including a NaN surface pressure).
pub fn splice_surface(
    source_p: &[f64],
    surface_pressure: f64,
    profile: &[f64],
    surface_value: f64,
) -> Result<(Vec<f64>, Vec<f64>), VerticalError> {
    let n = source_p.len();
    if n == 0 {
        return Err(VerticalError::EmptyColumn);
    }
    if profile.len() != n {
        return Err(VerticalError::LengthMismatch {
            expected: n,
            got: profile.len(),
            field: "profile",
        });
    }
    check_ascending(source_p)?;

    let mut out_p = source_p.to_vec();
    let mut out_v = profile.to_vec();

    if surface_pressure > source_p[n - 1] {
        out_p[n - 1] = surface_pressure;
        out_v[n - 1] = surface_value;
        return Ok((out_p, out_v));
    }

    let k = source_p
        .iter()
        .rposition(|&p| p < surface_pressure)
        .ok_or(VerticalError::SurfaceBounds {
            surface_pressure,
            shallowest: source_p[0],
        })?;
    out_p[k] = surface_pressure;
    out_v[k..].fill(surface_value);
    Ok((out_p, out_v))
}

fn splice_lane(
    source_p: ArrayView1<'_, f64>,
    surface_pressure: f64,
    delta: ArrayView1<'_, f64>,
    surface_delta: f64,
) -> Result<(Vec<f64>, Vec<f64>), VerticalError> {
    splice_surface(
        &source_p.to_vec(),
        surface_pressure,
        &delta.to_vec(),
        surface_delta,
    )
}

/// Applies [`splice_surface`] to every `(time, lat, lon)` column.
///
/// `source_p` and `delta` are `(time, level, lat, lon)` with ascending
/// levels; `surface_pressure` and `surface_delta` are `(time, lat, lon)`.
///
/// # Errors
///
/// Returns [`VerticalError::ShapeMismatch`] if the shapes disagree, otherwise
/// the first column error.
#[tracing::instrument(skip_all, fields(shape = ?delta.shape()))]
pub fn splice_surface_field(
    source_p: ArrayView4<'_, f64>,
    surface_pressure: ArrayView3<'_, f64>,
    delta: ArrayView4<'_, f64>,
    surface_delta: ArrayView3<'_, f64>,
) -> Result<(Array4<f64>, Array4<f64>), VerticalError> {
    if source_p.shape() != delta.shape() {
        return Err(VerticalError::ShapeMismatch {
            field: "source_p",
            expected: delta.shape().to_vec(),
            got: source_p.shape().to_vec(),
        });
    }
    let (nt, _, ny, nx) = delta.dim();
    for (field, dim) in [
        ("surface_pressure", surface_pressure.dim()),
        ("surface_delta", surface_delta.dim()),
    ] {
        if dim != (nt, ny, nx) {
            return Err(VerticalError::ShapeMismatch {
                field,
                expected: vec![nt, ny, nx],
                got: vec![dim.0, dim.1, dim.2],
            });
        }
    }

    let columns: Array3<Result<(Vec<f64>, Vec<f64>), VerticalError>> =
        Zip::from(source_p.lanes(VERTICAL))
            .and(surface_pressure)
            .and(delta.lanes(VERTICAL))
            .and(surface_delta)
            .par_map_collect(|p, &ps, v, &vs| splice_lane(p, ps, v, vs));

    let mut out_p = Array4::zeros(delta.raw_dim());
    let mut out_v = Array4::zeros(delta.raw_dim());
    for ((mut lane_p, mut lane_v), column) in out_p
        .lanes_mut(VERTICAL)
        .into_iter()
        .zip(out_v.lanes_mut(VERTICAL))
        .zip(columns.iter())
    {
        let (p, v) = column.as_ref().map_err(Clone::clone)?;
        lane_p.assign(&ArrayView1::from(&p[..]));
        lane_v.assign(&ArrayView1::from(&v[..]));
    }
    Ok((out_p, out_v))
}
