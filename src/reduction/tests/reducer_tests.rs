//! Tests for the point/integral reduction entry points

use crate::config::PressureTarget;
use crate::reduction::pchip::PchipError;
use crate::reduction::reducer::{interpolate_and_integrate, interpolate_at, reduce};

#[test]
fn test_interpolate_at_node_is_idempotent() {
    let pressures = [0.0, 10.0, 20.0, 30.0];
    let values = [282.0, 283.0, 284.5, 285.0];
    let v = interpolate_at(&pressures, &values, 20.0).unwrap();
    assert!((v - 284.5).abs() < 1e-12);
}

#[test]
fn test_interpolate_between_levels() {
    let v = interpolate_at(&[0.0, 10.0, 20.0, 30.0], &[1.0, 2.0, 4.0, 5.0], 15.0).unwrap();
    assert!(v > 2.0 && v < 4.0);
}

#[test]
fn test_integrate_constant_profile() {
    let v =
        interpolate_and_integrate(&[0.0, 100.0, 500.0, 600.0], &[4.0; 4], 100.0, 500.0).unwrap();
    assert!((v - 1600.0).abs() < 1e-9);
}

#[test]
fn test_reduce_point_mode() {
    let target = PressureTarget::Level(15.0);
    let v = reduce(&[0.0, 10.0, 20.0, 30.0], &[1.0, 2.0, 4.0, 5.0], &target)
        .unwrap()
        .unwrap();
    assert!(v > 2.0 && v < 4.0);
}

#[test]
fn test_reduce_integral_mode() {
    let target = PressureTarget::Range {
        shallow: 0.0,
        deep: 30.0,
    };
    let v = reduce(&[0.0, 10.0, 20.0, 30.0], &[2.0; 4], &target)
        .unwrap()
        .unwrap();
    assert!((v - 60.0).abs() < 1e-9);
}

#[test]
fn test_reduce_all_missing_short_circuits() {
    let target = PressureTarget::Level(15.0);
    assert!(reduce(&[0.0, 10.0], &[f64::NAN, f64::NAN], &target).is_none());
}

#[test]
fn test_reduce_partial_missing_is_attempted() {
    let target = PressureTarget::Level(25.0);
    let result = reduce(&[0.0, 10.0, 20.0, 30.0], &[f64::NAN, 2.0, 4.0, 5.0], &target);
    // One finite value is enough to attempt the fit; the NaN only poisons
    // its own neighborhood.
    assert!(result.is_some());
}

#[test]
fn test_reduce_failure_surfaces_error() {
    let target = PressureTarget::Level(5.0);
    let result = reduce(&[10.0], &[3.0], &target).unwrap();
    assert_eq!(result.unwrap_err(), PchipError::TooFewPoints(1));
}
