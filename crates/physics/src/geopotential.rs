//! Hydrostatic integration of geopotential on hybrid model levels.

use ndarray::{Array3, ArrayView1, ArrayView3, ArrayView4, Axis, Zip};
use tracing::debug;

use crate::constants::PhysicalConstants;
use crate::error::PhysicsError;

/// Floor applied to non-positive half-level pressures before taking ln.
pub const MIN_PRESSURE: f64 = 1e-4;

const VERTICAL: Axis = Axis(1);

/// Virtual temperature from temperature and specific humidity.
pub fn virtual_temperature(ta: f64, hus: f64) -> f64 {
    ta * (1.0 + 0.61 * hus)
}

/// Integrates geopotential from the surface up to `p_ref` for one column.
///
/// `pa_hl` holds the `L + 1` half-level pressures ordered from the model top
/// to the surface, `ta` and `hus` the `L` full-level values between them and
/// `zgs` the surface geopotential. The result is the geopotential at `p_ref`
/// in m2 s-2.
///
/// # Errors
///
/// Returns [`PhysicsError::LengthMismatch`] if the level counts disagree,
/// [`PhysicsError::ReferenceBelowSurface`] if every half level has a lower
/// pressure than `p_ref` and [`PhysicsError::ReferenceAboveModelTop`] if
/// `p_ref` lies above the top half level.
pub fn integrate_geopotential_column(
    pa_hl: &[f64],
    zgs: f64,
    ta: &[f64],
    hus: &[f64],
    p_ref: f64,
    constants: &PhysicalConstants,
) -> Result<f64, PhysicsError> {
    let n_full = ta.len();
    if pa_hl.len() != n_full + 1 {
        return Err(PhysicsError::LengthMismatch {
            expected: n_full + 1,
            got: pa_hl.len(),
            field: "pa_hl",
        });
    }
    if hus.len() != n_full {
        return Err(PhysicsError::LengthMismatch {
            expected: n_full,
            got: hus.len(),
            field: "hus",
        });
    }

    let p_hl: Vec<f64> = pa_hl
        .iter()
        .map(|&p| if p > 0.0 { p } else { MIN_PRESSURE })
        .collect();
    let ln_p: Vec<f64> = p_hl.iter().map(|p| p.ln()).collect();
    let tv: Vec<f64> = ta
        .iter()
        .zip(hus)
        .map(|(&t, &q)| virtual_temperature(t, q))
        .collect();

    // Half level L is the surface.
    let mut phi = vec![zgs; n_full + 1];
    for l in (0..n_full).rev() {
        phi[l] = phi[l + 1] + constants.rd() * tv[l] * (ln_p[l + 1] - ln_p[l]);
    }

    // Half level closest to p_ref from below (higher or equal pressure).
    let k = p_hl
        .iter()
        .map(|p| p - p_ref)
        .enumerate()
        .filter(|(_, d)| *d >= 0.0)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k)
        .ok_or(PhysicsError::ReferenceBelowSurface {
            p_ref,
            surface: pa_hl[n_full],
        })?;

    if k == 0 {
        if p_hl[0] == p_ref {
            return Ok(phi[0]);
        }
        return Err(PhysicsError::ReferenceAboveModelTop {
            p_ref,
            top: pa_hl[0],
        });
    }

    Ok(phi[k] - constants.rd() * tv[k - 1] * (p_ref.ln() - ln_p[k]))
}

fn integrate_lane(
    pa_hl: ArrayView1<'_, f64>,
    ta: ArrayView1<'_, f64>,
    hus: ArrayView1<'_, f64>,
    zgs: f64,
    p_ref: f64,
    constants: &PhysicalConstants,
) -> Result<f64, PhysicsError> {
    integrate_geopotential_column(
        &pa_hl.to_vec(),
        zgs,
        &ta.to_vec(),
        &hus.to_vec(),
        p_ref,
        constants,
    )
}

/// Integrates geopotential to `p_ref` for every column of a field.
///
/// Shapes are `(time, half_level, lat, lon)` for `pa_hl`,
/// `(time, level, lat, lon)` for `ta` and `hus` and `(time, lat, lon)` for
/// `zgs` and the result.
///
/// # Errors
///
/// Returns [`PhysicsError::ShapeMismatch`] for misaligned inputs and the first
/// column error in row-major order otherwise.
#[tracing::instrument(skip_all, fields(p_ref = p_ref, shape = ?ta.shape()))]
pub fn integrate_geopotential(
    pa_hl: ArrayView4<'_, f64>,
    zgs: ArrayView3<'_, f64>,
    ta: ArrayView4<'_, f64>,
    hus: ArrayView4<'_, f64>,
    p_ref: f64,
    constants: &PhysicalConstants,
) -> Result<Array3<f64>, PhysicsError> {
    constants.validate()?;
    if hus.shape() != ta.shape() {
        return Err(PhysicsError::ShapeMismatch {
            field: "hus",
            expected: ta.shape().to_vec(),
            got: hus.shape().to_vec(),
        });
    }
    let (nt, nz, ny, nx) = ta.dim();
    let expected_hl = [nt, nz + 1, ny, nx];
    if pa_hl.shape() != expected_hl {
        return Err(PhysicsError::ShapeMismatch {
            field: "pa_hl",
            expected: expected_hl.to_vec(),
            got: pa_hl.shape().to_vec(),
        });
    }
    if zgs.shape() != [nt, ny, nx] {
        return Err(PhysicsError::ShapeMismatch {
            field: "zgs",
            expected: vec![nt, ny, nx],
            got: zgs.shape().to_vec(),
        });
    }

    let columns = Zip::from(pa_hl.lanes(VERTICAL))
        .and(ta.lanes(VERTICAL))
        .and(hus.lanes(VERTICAL))
        .and(zgs)
        .par_map_collect(|p, t, q, &z| integrate_lane(p, t, q, z, p_ref, constants));

    let mut out = Array3::zeros(columns.raw_dim());
    for (o, column) in out.iter_mut().zip(columns.iter()) {
        *o = column.clone()?;
    }
    debug!(n_columns = out.len(), "geopotential integrated");
    Ok(out)
}
