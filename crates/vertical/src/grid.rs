//! Grid-level vertical interpolation in log-pressure.
//!
//! Fields are ordered `(time, vertical, lat, lon)`. Every `(time, lat, lon)`
//! column is interpolated independently and in parallel.

use ndarray::{Array3, Array4, ArrayView1, ArrayView4, Axis, Zip};
use tracing::{debug, warn};

use crate::column::interpolate_column;
use crate::config::{ExtrapolationMode, VerticalConfig};
use crate::error::VerticalError;

/// Vertical axis of every 4-D field.
pub(crate) const VERTICAL: Axis = Axis(1);

/// Interpolates `values`, given on `source_p`, onto the `target_p` pressures.
///
/// `values` and `source_p` share one shape; `target_p` must match them in the
/// time, lat and lon axes while its vertical size is free. Source columns may
/// come in any vertical order; they are reordered to ascending pressure
/// before interpolation. Both coordinates are log-transformed.
///
/// # Errors
///
/// Returns [`VerticalError::ShapeMismatch`] if the shapes are incompatible.
/// Returns [`VerticalError::TopBoundary`] if the smallest target pressure is
/// below the smallest source pressure and
/// [`VerticalConfig::ignore_top_pressure_error`] is not set.
/// Returns [`VerticalError::NonPositivePressure`] if any pressure is `<= 0`.
/// Propagates column errors from [`interpolate_column`].
#[tracing::instrument(
    skip_all,
    fields(source = ?values.shape(), target = ?target_p.shape(), mode = %config.mode())
)]
pub fn interpolate_field(
    values: ArrayView4<'_, f64>,
    source_p: ArrayView4<'_, f64>,
    target_p: ArrayView4<'_, f64>,
    config: &VerticalConfig,
) -> Result<Array4<f64>, VerticalError> {
    check_shapes(&values, &source_p, &target_p)?;
    check_model_top(&source_p, &target_p, config.ignore_top_pressure_error())?;

    let mode = config.mode();
    let columns = Zip::from(values.lanes(VERTICAL))
        .and(source_p.lanes(VERTICAL))
        .and(target_p.lanes(VERTICAL))
        .par_map_collect(|v, p, t| interpolate_lane(v, p, t, mode));

    let mut out = Array4::zeros(target_p.raw_dim());
    scatter_columns(&columns, &mut out)?;
    debug!(n_columns = columns.len(), "vertical interpolation done");
    Ok(out)
}

fn check_shapes(
    values: &ArrayView4<'_, f64>,
    source_p: &ArrayView4<'_, f64>,
    target_p: &ArrayView4<'_, f64>,
) -> Result<(), VerticalError> {
    if source_p.shape() != values.shape() {
        return Err(VerticalError::ShapeMismatch {
            field: "source_p",
            expected: values.shape().to_vec(),
            got: source_p.shape().to_vec(),
        });
    }
    let (nt, _, ny, nx) = values.dim();
    let (tt, tz, ty, tx) = target_p.dim();
    if (tt, ty, tx) != (nt, ny, nx) {
        return Err(VerticalError::ShapeMismatch {
            field: "target_p",
            expected: vec![nt, tz, ny, nx],
            got: target_p.shape().to_vec(),
        });
    }
    Ok(())
}

/// Field-level guard against extrapolation above the source model top.
/// NaN pressures are ignored when taking the minima.
fn check_model_top(
    source_p: &ArrayView4<'_, f64>,
    target_p: &ArrayView4<'_, f64>,
    ignore: bool,
) -> Result<(), VerticalError> {
    let source_top = source_p.iter().copied().fold(f64::INFINITY, f64::min);
    let target_top = target_p.iter().copied().fold(f64::INFINITY, f64::min);
    if target_top < source_top {
        if !ignore {
            return Err(VerticalError::TopBoundary {
                target_top,
                source_top,
            });
        }
        warn!(
            target_top,
            source_top, "target grid reaches above the source top; extrapolating"
        );
    }
    Ok(())
}

fn ln_pressure(p: f64, field: &'static str) -> Result<f64, VerticalError> {
    if p <= 0.0 {
        return Err(VerticalError::NonPositivePressure { value: p, field });
    }
    Ok(p.ln())
}

/// Returns the column's pressures (log-transformed) and values in ascending
/// pressure order. Ties keep their original order.
fn ascending_log_column(
    pressures: ArrayView1<'_, f64>,
    values: ArrayView1<'_, f64>,
) -> Result<(Vec<f64>, Vec<f64>), VerticalError> {
    let mut order: Vec<usize> = (0..pressures.len()).collect();
    order.sort_by(|&a, &b| pressures[a].total_cmp(&pressures[b]));

    let mut src_x = Vec::with_capacity(order.len());
    let mut src_y = Vec::with_capacity(order.len());
    for &k in &order {
        src_x.push(ln_pressure(pressures[k], "source_p")?);
        src_y.push(values[k]);
    }
    Ok((src_x, src_y))
}

fn interpolate_lane(
    values: ArrayView1<'_, f64>,
    source_p: ArrayView1<'_, f64>,
    target_p: ArrayView1<'_, f64>,
    mode: ExtrapolationMode,
) -> Result<Vec<f64>, VerticalError> {
    let (src_x, src_y) = ascending_log_column(source_p, values)?;
    let targ_x = target_p
        .iter()
        .map(|&p| ln_pressure(p, "target_p"))
        .collect::<Result<Vec<_>, _>>()?;
    interpolate_column(&src_x, &src_y, &targ_x, mode)
}

/// Writes per-column results into the vertical lanes of `out`, returning the
/// first column error in row-major order.
pub(crate) fn scatter_columns(
    columns: &Array3<Result<Vec<f64>, VerticalError>>,
    out: &mut Array4<f64>,
) -> Result<(), VerticalError> {
    for (mut lane, column) in out.lanes_mut(VERTICAL).into_iter().zip(columns.iter()) {
        let column = column.as_ref().map_err(Clone::clone)?;
        lane.assign(&ArrayView1::from(&column[..]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// One time step, `levels` identical in every column of a `ny x nx` grid.
    fn broadcast(levels: &[f64], ny: usize, nx: usize) -> Array4<f64> {
        Array4::from_shape_fn((1, levels.len(), ny, nx), |(_, k, _, _)| levels[k])
    }

    #[test]
    fn exact_levels_are_reproduced() {
        let p = broadcast(&[100.0, 200.0, 300.0], 2, 3);
        let v = Array4::from_shape_fn(p.raw_dim(), |(_, k, j, i)| (k * 10 + j + i) as f64);
        let out = interpolate_field(v.view(), p.view(), p.view(), &VerticalConfig::new()).unwrap();
        for (a, b) in out.iter().zip(v.iter()) {
            assert_relative_eq!(*a, *b);
        }
    }

    #[test]
    fn interpolation_is_linear_in_log_pressure() {
        let p = broadcast(&[100.0, 1000.0], 1, 1);
        let v = Array4::from_shape_fn(p.raw_dim(), |(_, k, _, _)| k as f64);
        let target = broadcast(&[(100.0_f64 * 1000.0).sqrt()], 1, 1);
        let out =
            interpolate_field(v.view(), p.view(), target.view(), &VerticalConfig::new()).unwrap();
        assert_relative_eq!(out[[0, 0, 0, 0]], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn descending_source_is_reordered() {
        let p = broadcast(&[300.0, 200.0, 100.0], 1, 1);
        let v = broadcast(&[3.0, 2.0, 1.0], 1, 1);
        let target = broadcast(&[200.0, 300.0], 1, 1);
        let out =
            interpolate_field(v.view(), p.view(), target.view(), &VerticalConfig::new()).unwrap();
        assert_relative_eq!(out[[0, 0, 0, 0]], 2.0);
        assert_relative_eq!(out[[0, 1, 0, 0]], 3.0);
    }

    #[test]
    fn top_boundary_is_fatal_by_default() {
        let p = broadcast(&[100.0, 200.0], 1, 1);
        let v = broadcast(&[1.0, 2.0], 1, 1);
        let target = broadcast(&[50.0, 150.0], 1, 1);
        let result = interpolate_field(v.view(), p.view(), target.view(), &VerticalConfig::new());
        assert!(matches!(
            result,
            Err(VerticalError::TopBoundary { target_top, source_top })
                if target_top == 50.0 && source_top == 100.0
        ));
    }

    #[test]
    fn top_boundary_can_be_tolerated() {
        let p = broadcast(&[100.0, 200.0], 1, 1);
        let v = broadcast(&[1.0, 2.0], 1, 1);
        let target = broadcast(&[50.0], 1, 1);
        let config = VerticalConfig::new().with_ignore_top_pressure_error(true);
        let out = interpolate_field(v.view(), p.view(), target.view(), &config).unwrap();
        assert_relative_eq!(out[[0, 0, 0, 0]], 1.0);
    }

    #[test]
    fn tolerated_top_still_honours_off_mode() {
        let p = broadcast(&[100.0, 200.0], 1, 1);
        let v = broadcast(&[1.0, 2.0], 1, 1);
        let target = broadcast(&[50.0], 1, 1);
        let config = VerticalConfig::new()
            .with_ignore_top_pressure_error(true)
            .with_mode(ExtrapolationMode::Off);
        let result = interpolate_field(v.view(), p.view(), target.view(), &config);
        assert!(matches!(result, Err(VerticalError::OutOfRange { .. })));
    }

    #[test]
    fn target_shape_mismatch() {
        let p = broadcast(&[100.0, 200.0], 2, 2);
        let target = broadcast(&[150.0], 2, 3);
        let result = interpolate_field(p.view(), p.view(), target.view(), &VerticalConfig::new());
        assert!(matches!(
            result,
            Err(VerticalError::ShapeMismatch { field: "target_p", .. })
        ));
    }

    #[test]
    fn source_shape_mismatch() {
        let p = broadcast(&[100.0, 200.0], 2, 2);
        let v = broadcast(&[1.0, 2.0, 3.0], 2, 2);
        let result = interpolate_field(v.view(), p.view(), p.view(), &VerticalConfig::new());
        assert!(matches!(
            result,
            Err(VerticalError::ShapeMismatch { field: "source_p", .. })
        ));
    }

    #[test]
    fn non_positive_pressure_rejected() {
        let p = broadcast(&[0.0, 200.0], 1, 1);
        let v = broadcast(&[1.0, 2.0], 1, 1);
        let target = broadcast(&[150.0], 1, 1);
        let config = VerticalConfig::new().with_ignore_top_pressure_error(true);
        let result = interpolate_field(v.view(), p.view(), target.view(), &config);
        assert!(matches!(
            result,
            Err(VerticalError::NonPositivePressure { field: "source_p", .. })
        ));
    }

    #[test]
    fn columns_use_their_own_pressures() {
        // Column (0, 0) has levels [100, 200], column (0, 1) has [200, 400].
        let mut p = Array4::zeros((1, 2, 1, 2));
        p[[0, 0, 0, 0]] = 100.0;
        p[[0, 1, 0, 0]] = 200.0;
        p[[0, 0, 0, 1]] = 200.0;
        p[[0, 1, 0, 1]] = 400.0;
        let v = Array4::from_shape_fn(p.raw_dim(), |(_, k, _, _)| k as f64);
        let target = Array4::from_elem((1, 1, 1, 2), 200.0);
        let out =
            interpolate_field(v.view(), p.view(), target.view(), &VerticalConfig::new()).unwrap();
        assert_relative_eq!(out[[0, 0, 0, 0]], 1.0);
        assert_relative_eq!(out[[0, 0, 0, 1]], 0.0);
    }

    #[test]
    fn multiple_time_steps() {
        let p = Array4::from_shape_fn((3, 2, 1, 1), |(_, k, _, _)| 100.0 * (k + 1) as f64);
        let v = Array4::from_shape_fn(p.raw_dim(), |(t, k, _, _)| (t * 10 + k) as f64);
        let target = Array4::from_elem((3, 1, 1, 1), 200.0);
        let out =
            interpolate_field(v.view(), p.view(), target.view(), &VerticalConfig::new()).unwrap();
        for t in 0..3 {
            assert_relative_eq!(out[[t, 0, 0, 0]], (t * 10 + 1) as f64);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let p = broadcast(&[100.0, 200.0], 1, 1);
        let v = broadcast(&[1.0, 2.0], 1, 1);
        let before = v.clone();
        let target = broadcast(&[150.0], 1, 1);
        let _ = interpolate_field(v.view(), p.view(), target.view(), &VerticalConfig::new()).unwrap();
        assert_eq!(v, before);
    }

    #[test]
    fn first_failing_column_in_row_major_order_is_reported() {
        let p = Array4::from_shape_fn((2, 2, 1, 2), |(_, k, _, _)| 100.0 * (k + 1) as f64);
        let v = Array4::from_shape_fn(p.raw_dim(), |(_, k, _, _)| k as f64);
        let mut target = Array4::from_elem((2, 1, 1, 2), 150.0);
        target[[1, 0, 0, 0]] = 500.0;
        target[[0, 0, 0, 1]] = 400.0;
        let config = VerticalConfig::new().with_mode(ExtrapolationMode::Off);

        let result = interpolate_field(v.view(), p.view(), target.view(), &config);
        match result {
            Err(VerticalError::OutOfRange { target, .. }) => {
                assert_relative_eq!(target, 400.0_f64.ln(), epsilon = 1e-12);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }
}
