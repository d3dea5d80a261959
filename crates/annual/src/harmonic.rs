//! Harmonic smoothing of annual cycles (von Storch & Zwiers, eqs. 12.19-12.23).

use std::f64::consts::PI;

use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis, Zip};
use tracing::debug;

use crate::error::AnnualError;

/// Number of harmonics summed in the reconstruction.
pub const N_HARMONICS: usize = 3;

/// Time axis of every field.
const TIME: Axis = Axis(0);

/// Reconstructs `ts` from its mean and first [`N_HARMONICS`] harmonics.
///
/// `ts` is one full period of length `P`. A series containing any NaN yields
/// an all-NaN series of the same length.
///
/// # Errors
///
/// Returns [`AnnualError::SeriesTooShort`] if a harmonic index `i` does not
/// satisfy `i < floor(P / 2)`.
pub fn smooth_annual_cycle(ts: &[f64]) -> Result<Vec<f64>, AnnualError> {
    if ts.iter().any(|v| v.is_nan()) {
        return Ok(vec![f64::NAN; ts.len()]);
    }

    let p = ts.len();
    if N_HARMONICS >= p / 2 {
        return Err(AnnualError::SeriesTooShort {
            len: p,
            harmonics: N_HARMONICS,
        });
    }

    let pf = p as f64;
    let mean = ts.iter().sum::<f64>() / pf;
    let mut smooth = vec![mean; p];

    for i in 1..=N_HARMONICS {
        let omega = 2.0 * PI * i as f64 / pf;
        // Time steps are numbered 1..=P.
        let angle = |t: usize| omega * (t + 1) as f64;

        let (mut a, mut b) = (0.0, 0.0);
        for (t, &x) in ts.iter().enumerate() {
            let (sin, cos) = angle(t).sin_cos();
            a += x * cos;
            b += x * sin;
        }
        a *= 2.0 / pf;
        b *= 2.0 / pf;

        for (t, s) in smooth.iter_mut().enumerate() {
            let (sin, cos) = angle(t).sin_cos();
            *s += a * cos + b * sin;
        }
    }

    Ok(smooth)
}

fn smooth_lane(lane: ArrayView1<'_, f64>) -> Result<Vec<f64>, AnnualError> {
    smooth_annual_cycle(&lane.to_vec())
}

/// Smooths every column of a `(time, lat, lon)` or `(time, level, lat, lon)`
/// field along the time axis.
///
/// # Errors
///
/// Returns [`AnnualError::UnsupportedRank`] for other ranks and the first
/// column error from [`smooth_annual_cycle`].
#[tracing::instrument(skip_all, fields(shape = ?data.shape()))]
pub fn smooth_field(data: ArrayViewD<'_, f64>) -> Result<ArrayD<f64>, AnnualError> {
    if !(3..=4).contains(&data.ndim()) {
        return Err(AnnualError::UnsupportedRank { ndim: data.ndim() });
    }

    let columns = Zip::from(data.lanes(TIME)).par_map_collect(smooth_lane);

    let mut out = ArrayD::zeros(data.raw_dim());
    let mut n_missing = 0usize;
    for (mut lane, column) in out.lanes_mut(TIME).into_iter().zip(columns.iter()) {
        let column = column.as_ref().map_err(Clone::clone)?;
        if column.first().is_some_and(|v| v.is_nan()) {
            n_missing += 1;
        }
        lane.assign(&ArrayView1::from(&column[..]));
    }
    debug!(n_columns = columns.len(), n_missing, "annual cycle smoothed");
    Ok(out)
}
