//! Periodic time interpolation of an annual-cycle delta.

use chrono::{Datelike, NaiveDateTime};
use ndarray::{ArrayD, ArrayViewD, Axis};
use tracing::debug;

use crate::error::AnnualError;

const TIME: Axis = Axis(0);

fn with_year(date: NaiveDateTime, year: i32) -> Result<NaiveDateTime, AnnualError> {
    date.with_year(year).ok_or_else(|| AnnualError::InvalidDate {
        date: date.to_string(),
        year,
    })
}

/// Interpolates an annual cycle to `target`, treating the cycle as periodic.
///
/// `data` has time on axis 0 with one step per entry of `times`. The year of
/// every timestamp is replaced by the target's year, the last step is added
/// one year earlier and the first step one year later, and the field is then
/// interpolated linearly in time. The result keeps a time axis of length 1.
///
/// # Errors
///
/// Returns [`AnnualError::EmptyTimeAxis`] if there are no time steps.
/// Returns [`AnnualError::LengthMismatch`] if `times` does not match axis 0.
/// Returns [`AnnualError::InvalidDate`] if a timestamp does not exist in the
/// target year (29 February).
/// Returns [`AnnualError::TargetOutsideCycle`] if `target` is not covered,
/// which only happens for unsorted timestamps.
#[tracing::instrument(skip(times, data), fields(n_steps = times.len()))]
pub fn interpolate_to_date(
    times: &[NaiveDateTime],
    data: ArrayViewD<'_, f64>,
    target: NaiveDateTime,
) -> Result<ArrayD<f64>, AnnualError> {
    if data.ndim() == 0 || times.is_empty() {
        return Err(AnnualError::EmptyTimeAxis);
    }
    let nt = data.len_of(TIME);
    if times.len() != nt {
        return Err(AnnualError::LengthMismatch {
            expected: nt,
            got: times.len(),
            field: "times",
        });
    }

    let year = target.year();
    let mut axis = Vec::with_capacity(nt + 2);
    let mut source = Vec::with_capacity(nt + 2);
    axis.push(with_year(times[nt - 1], year - 1)?);
    source.push(nt - 1);
    for (k, &t) in times.iter().enumerate() {
        axis.push(with_year(t, year)?);
        source.push(k);
    }
    axis.push(with_year(times[0], year + 1)?);
    source.push(0);

    let j = axis.partition_point(|&t| t < target);
    if j < axis.len() && axis[j] == target {
        debug!(step = source[j], "target matches a time step");
        return Ok(data.index_axis(TIME, source[j]).to_owned().insert_axis(TIME));
    }
    if j == 0 || j == axis.len() {
        return Err(AnnualError::TargetOutsideCycle {
            target: target.to_string(),
            start: axis[0].to_string(),
            end: axis[axis.len() - 1].to_string(),
        });
    }

    let span = (axis[j] - axis[j - 1]).num_milliseconds() as f64;
    let w = (target - axis[j - 1]).num_milliseconds() as f64 / span;
    debug!(lower = source[j - 1], upper = source[j], weight = w, "interpolating in time");

    let lower = data.index_axis(TIME, source[j - 1]);
    let upper = data.index_axis(TIME, source[j]);
    let out = &lower + &((&upper - &lower) * w);
    Ok(out.insert_axis(TIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use ndarray::Array2;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Twelve mid-month steps in a climatological year with value = month.
    fn monthly_cycle() -> (Vec<NaiveDateTime>, ArrayD<f64>) {
        let times: Vec<NaiveDateTime> = (1..=12).map(|m| date(2070, m, 15)).collect();
        let data = Array2::from_shape_fn((12, 2), |(t, i)| (t + 1) as f64 + 100.0 * i as f64);
        (times, data.into_dyn())
    }

    #[test]
    fn exact_step_returns_that_step() {
        let (times, data) = monthly_cycle();
        let out = interpolate_to_date(&times, data.view(), date(2005, 3, 15)).unwrap();
        assert_eq!(out.shape(), &[1, 2]);
        assert_relative_eq!(out[[0, 0].as_slice()], 3.0);
        assert_relative_eq!(out[[0, 1].as_slice()], 103.0);
    }

    #[test]
    fn interpolates_between_months() {
        let (times, data) = monthly_cycle();
        // 2005-04-15 to 2005-05-15 is 30 days; the 30th of April is halfway.
        let out = interpolate_to_date(&times, data.view(), date(2005, 4, 30)).unwrap();
        assert_relative_eq!(out[[0, 0].as_slice()], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn wraps_around_new_year() {
        let (times, data) = monthly_cycle();
        // 2004-12-15 (December, value 12) to 2005-01-15 (January, value 1), 31 days.
        let target = date(2005, 1, 1);
        let out = interpolate_to_date(&times, data.view(), target).unwrap();
        let w = 17.0 / 31.0;
        assert_relative_eq!(out[[0, 0].as_slice()], 12.0 + (1.0 - 12.0) * w, epsilon = 1e-12);
    }

    #[test]
    fn wraps_around_year_end() {
        let (times, data) = monthly_cycle();
        let target = date(2005, 12, 31);
        let out = interpolate_to_date(&times, data.view(), target).unwrap();
        let w = 16.0 / 31.0;
        assert_relative_eq!(out[[0, 0].as_slice()], 12.0 + (1.0 - 12.0) * w, epsilon = 1e-12);
    }

    #[test]
    fn leap_day_into_common_year_fails() {
        let times = vec![date(2000, 1, 1), date(2000, 2, 29)];
        let data = Array2::<f64>::zeros((2, 1)).into_dyn();
        let result = interpolate_to_date(&times, data.view(), date(2001, 6, 1));
        assert!(matches!(result, Err(AnnualError::InvalidDate { year: 2001, .. })));
    }

    #[test]
    fn length_mismatch() {
        let times = vec![date(2000, 1, 1)];
        let data = Array2::<f64>::zeros((2, 1)).into_dyn();
        let result = interpolate_to_date(&times, data.view(), date(2001, 6, 1));
        assert!(matches!(
            result,
            Err(AnnualError::LengthMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn empty_axis() {
        let data = Array2::<f64>::zeros((0, 1)).into_dyn();
        let result = interpolate_to_date(&[], data.view(), date(2001, 6, 1));
        assert!(matches!(result, Err(AnnualError::EmptyTimeAxis)));
    }
}
