//! Conversion between specific and relative humidity.
//!
//! Both directions use the same saturation term, so converting one way and
//! back returns the input up to rounding.

use ndarray::{ArrayD, ArrayViewD, Zip};

use crate::error::PhysicsError;

fn saturation_term(ta: f64) -> f64 {
    (17.67 * (ta - 273.15) / (ta - 29.65)).exp()
}

/// Relative humidity in percent from specific humidity (kg/kg), pressure (Pa)
/// and temperature (K).
pub fn specific_to_relative(hus: f64, pa: f64, ta: f64) -> f64 {
    0.263 * pa * hus / saturation_term(ta)
}

/// Specific humidity (kg/kg) from relative humidity in percent, pressure (Pa)
/// and temperature (K).
pub fn relative_to_specific(hur: f64, pa: f64, ta: f64) -> f64 {
    hur * saturation_term(ta) / (0.263 * pa)
}

fn check_same_shape(
    reference: &ArrayViewD<'_, f64>,
    other: &ArrayViewD<'_, f64>,
    field: &'static str,
) -> Result<(), PhysicsError> {
    if reference.shape() != other.shape() {
        return Err(PhysicsError::ShapeMismatch {
            field,
            expected: reference.shape().to_vec(),
            got: other.shape().to_vec(),
        });
    }
    Ok(())
}

/// Applies [`specific_to_relative`] elementwise to equally shaped fields.
///
/// # Errors
///
/// Returns [`PhysicsError::ShapeMismatch`] if `pa` or `ta` differ in shape
/// from `hus`.
pub fn specific_to_relative_field(
    hus: ArrayViewD<'_, f64>,
    pa: ArrayViewD<'_, f64>,
    ta: ArrayViewD<'_, f64>,
) -> Result<ArrayD<f64>, PhysicsError> {
    check_same_shape(&hus, &pa, "pa")?;
    check_same_shape(&hus, &ta, "ta")?;
    Ok(Zip::from(&hus)
        .and(&pa)
        .and(&ta)
        .par_map_collect(|&q, &p, &t| specific_to_relative(q, p, t)))
}

/// Applies [`relative_to_specific`] elementwise to equally shaped fields.
///
/// # Errors
///
/// Returns [`PhysicsError::ShapeMismatch`] if `pa` or `ta` differ in shape
/// from `hur`.
pub fn relative_to_specific_field(
    hur: ArrayViewD<'_, f64>,
    pa: ArrayViewD<'_, f64>,
    ta: ArrayViewD<'_, f64>,
) -> Result<ArrayD<f64>, PhysicsError> {
    check_same_shape(&hur, &pa, "pa")?;
    check_same_shape(&hur, &ta, "ta")?;
    Ok(Zip::from(&hur)
        .and(&pa)
        .and(&ta)
        .par_map_collect(|&r, &p, &t| relative_to_specific(r, p, t)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::ArrayD;

    #[test]
    fn saturation_at_freezing_point() {
        // exp(0) = 1 at 273.15 K.
        assert_relative_eq!(specific_to_relative(0.004, 100_000.0, 273.15), 105.2, epsilon = 1e-9);
    }

    #[test]
    fn conversions_are_inverse() {
        for &(q, p, t) in &[(0.001, 50_000.0, 250.0), (0.012, 95_000.0, 295.0), (0.0, 1e5, 280.0)] {
            let rh = specific_to_relative(q, p, t);
            assert_relative_eq!(relative_to_specific(rh, p, t), q, epsilon = 1e-14);
        }
    }

    #[test]
    fn warmer_air_lowers_relative_humidity() {
        let cold = specific_to_relative(0.005, 90_000.0, 280.0);
        let warm = specific_to_relative(0.005, 90_000.0, 290.0);
        assert!(warm < cold);
    }

    #[test]
    fn field_conversion_matches_scalar() {
        let hus = ArrayD::from_shape_fn(vec![2, 3], |ix| 0.001 * (1 + ix[0] + ix[1]) as f64);
        let pa = ArrayD::from_elem(vec![2, 3], 85_000.0);
        let ta = ArrayD::from_shape_fn(vec![2, 3], |ix| 270.0 + 5.0 * ix[1] as f64);
        let rh = specific_to_relative_field(hus.view(), pa.view(), ta.view()).unwrap();
        for ((q, r), t) in hus.iter().zip(rh.iter()).zip(ta.iter()) {
            assert_relative_eq!(*r, specific_to_relative(*q, 85_000.0, *t));
        }
        let back = relative_to_specific_field(rh.view(), pa.view(), ta.view()).unwrap();
        for (a, b) in back.iter().zip(hus.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-14);
        }
    }

    #[test]
    fn field_shapes_are_checked() {
        let a = ArrayD::<f64>::zeros(vec![2, 3]);
        let b = ArrayD::<f64>::zeros(vec![3, 2]);
        assert!(matches!(
            specific_to_relative_field(a.view(), a.view(), b.view()),
            Err(PhysicsError::ShapeMismatch { field: "ta", .. })
        ));
    }
}
