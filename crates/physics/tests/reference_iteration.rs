//! Reference level selection together with geopotential integration.

use approx::assert_relative_eq;
use ndarray::{Array3, Array4};
use pgw_physics::{
    PhysicalConstants, PhysicsError, integrate_geopotential, select_domain_reference_level,
};

const CANDIDATES: [f64; 4] = [90_000.0, 85_000.0, 70_000.0, 50_000.0];

/// Ten hybrid-like half levels from 0 Pa to the surface pressure.
fn half_levels(ps: &Array3<f64>, n_half: usize) -> Array4<f64> {
    let (nt, ny, nx) = ps.dim();
    Array4::from_shape_fn((nt, n_half, ny, nx), |(t, k, j, i)| {
        ps[[t, j, i]] * k as f64 / (n_half - 1) as f64
    })
}

#[test]
fn iteration_never_lowers_the_reference_level() {
    let ps_era = Array3::from_shape_fn((1, 2, 2), |(_, j, i)| 95_000.0 + 1_000.0 * (j + i) as f64);
    let mut ps_pgw = ps_era.clone();

    let first = select_domain_reference_level(&ps_era, &ps_pgw, &CANDIDATES, None).unwrap();
    assert_eq!(first, 90_000.0);

    // The future surface pressure drops below the first choice.
    ps_pgw.mapv_inplace(|p| p - 10_000.0);
    let second = select_domain_reference_level(&ps_era, &ps_pgw, &CANDIDATES, Some(first)).unwrap();
    assert_eq!(second, 70_000.0);

    // Recovery does not move it back down.
    ps_pgw.assign(&ps_era);
    let third = select_domain_reference_level(&ps_era, &ps_pgw, &CANDIDATES, Some(second)).unwrap();
    assert_eq!(third, 70_000.0);
}

#[test]
fn isothermal_field_geopotential_height() {
    let constants = PhysicalConstants::new();
    let ps = Array3::from_shape_fn((2, 2, 3), |(t, j, i)| 100_000.0 - 500.0 * (t + j + i) as f64);
    let pa_hl = half_levels(&ps, 11);
    let ta = Array4::from_elem((2, 10, 2, 3), 260.0);
    let hus = Array4::zeros((2, 10, 2, 3));
    let zgs = Array3::from_elem((2, 2, 3), 0.0);
    let p_ref = select_domain_reference_level(&ps, &ps, &CANDIDATES, None).unwrap();

    let phi = integrate_geopotential(pa_hl.view(), zgs.view(), ta.view(), hus.view(), p_ref, &constants)
        .unwrap();
    for ((t, j, i), v) in phi.indexed_iter() {
        let expected = constants.rd() * 260.0 * (ps[[t, j, i]] / p_ref).ln();
        assert_relative_eq!(*v, expected, epsilon = 1e-8);
        assert!(constants.geopotential_height(*v) > 0.0);
    }
}

#[test]
fn reference_below_some_surface_fails_for_field() {
    let constants = PhysicalConstants::new();
    let ps = Array3::from_shape_fn((1, 1, 2), |(_, _, i)| [100_000.0, 80_000.0][i]);
    let pa_hl = half_levels(&ps, 5);
    let ta = Array4::from_elem((1, 4, 1, 2), 270.0);
    let hus = Array4::zeros((1, 4, 1, 2));
    let zgs = Array3::zeros((1, 1, 2));
    let result = integrate_geopotential(pa_hl.view(), zgs.view(), ta.view(), hus.view(), 90_000.0, &constants);
    assert!(matches!(result, Err(PhysicsError::ReferenceBelowSurface { .. })));
}
