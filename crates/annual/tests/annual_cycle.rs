//! Smoothing and time interpolation used together on synthetic cycles.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use ndarray::{Array4, ArrayD};
use pgw_annual::{AnnualError, interpolate_to_date, smooth_annual_cycle, smooth_field};

fn day(year: i32, ordinal: u32) -> NaiveDateTime {
    NaiveDate::from_yo_opt(year, ordinal)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn scenario_constant_cycle() {
    let out = smooth_annual_cycle(&[5.0; 365]).unwrap();
    assert_eq!(out.len(), 365);
    assert!(out.iter().all(|v| (v - 5.0).abs() < 1e-10));
}

#[test]
fn scenario_nan_cycle() {
    let mut ts = vec![5.0; 365];
    ts[0] = f64::NAN;
    let out = smooth_annual_cycle(&ts).unwrap();
    assert!(out.iter().all(|v| v.is_nan()));
}

#[test]
fn smoothing_is_idempotent() {
    let ts: Vec<f64> = (1..=365)
        .map(|t| {
            let x = 2.0 * PI * t as f64 / 365.0;
            3.0 * x.cos() + (7.0 * x).sin() + 0.2 * (t % 5) as f64
        })
        .collect();
    let once = smooth_annual_cycle(&ts).unwrap();
    let twice = smooth_annual_cycle(&once).unwrap();
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn four_dimensional_field_keeps_shape() {
    let data = Array4::from_shape_fn((365, 2, 2, 2), |(t, k, j, i)| {
        (k + j + i) as f64 + (2.0 * PI * (t + 1) as f64 / 365.0).sin()
    });
    let out = smooth_field(data.view().into_dyn()).unwrap();
    assert_eq!(out.shape(), &[365, 2, 2, 2]);
    for (a, b) in out.iter().zip(data.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn short_time_axis_fails_for_field() {
    let data = ArrayD::<f64>::ones(vec![6, 2, 2]);
    assert!(matches!(
        smooth_field(data.view()),
        Err(AnnualError::SeriesTooShort { len: 6, .. })
    ));
}

#[test]
fn smoothed_daily_cycle_interpolated_to_noon_of_a_day() {
    let times: Vec<NaiveDateTime> = (1..=365).map(|d| day(2071, d)).collect();
    let data = Array4::from_shape_fn((365, 1, 1, 1), |(t, _, _, _)| {
        1.0 + (2.0 * PI * (t + 1) as f64 / 365.0).cos()
    });
    let smooth = smooth_field(data.view().into_dyn()).unwrap();

    let out = interpolate_to_date(&times, smooth.view(), day(2006, 100)).unwrap();
    assert_eq!(out.shape(), &[1, 1, 1, 1]);
    assert_relative_eq!(out.iter().next().copied().unwrap(), smooth[[99, 0, 0, 0].as_slice()], epsilon = 1e-12);

    let midnight = day(2006, 100) - chrono::Duration::hours(12);
    let between = interpolate_to_date(&times, smooth.view(), midnight).unwrap();
    let expected = 0.5 * (smooth[[98, 0, 0, 0].as_slice()] + smooth[[99, 0, 0, 0].as_slice()]);
    assert_relative_eq!(between.iter().next().copied().unwrap(), expected, epsilon = 1e-12);
}
