//! Tests for quality-control filtering

use crate::constants::quality_flags;
use crate::reduction::qc::{filter_qc_and_pressure, has_common_finite_level};

const ACCEPTED: &[i8] = quality_flags::DEFAULT_ACCEPTED;

#[test]
fn test_all_levels_pass() {
    let (t, s, p) = filter_qc_and_pressure(
        &[10.0, 9.0, 8.0],
        &[35.0, 35.1, 35.2],
        &[0.0, 50.0, 100.0],
        &[0, 0, 0],
        &[0, 0, 0],
        &[0, 0, 0],
        ACCEPTED,
        1.0e7,
    );
    assert_eq!(t, vec![10.0, 9.0, 8.0]);
    assert_eq!(s, vec![35.0, 35.1, 35.2]);
    assert_eq!(p, vec![0.0, 50.0, 100.0]);
}

#[test]
fn test_rejected_flags_drop_levels_in_lockstep() {
    let (t, s, p) = filter_qc_and_pressure(
        &[10.0, 9.0, 8.0, 7.0],
        &[35.0, 35.1, 35.2, 35.3],
        &[0.0, 50.0, 100.0, 150.0],
        &[0, 3, 0, 0],
        &[0, 0, 9, 0],
        &[0, 0, 0, 2],
        ACCEPTED,
        1.0e7,
    );
    // Only the first level has all three flags accepted.
    assert_eq!(t, vec![10.0]);
    assert_eq!(s, vec![35.0]);
    assert_eq!(p, vec![0.0]);
}

#[test]
fn test_missing_values_drop_levels() {
    let (t, s, p) = filter_qc_and_pressure(
        &[10.0, f64::NAN, 8.0, 7.0],
        &[35.0, 35.1, f64::NAN, 35.3],
        &[0.0, 50.0, 100.0, f64::NAN],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
        ACCEPTED,
        1.0e7,
    );
    assert_eq!(t, vec![10.0]);
    assert_eq!(s, vec![35.0]);
    assert_eq!(p, vec![0.0]);
}

#[test]
fn test_max_pressure_cap() {
    let (t, s, p) = filter_qc_and_pressure(
        &[10.0, 9.0],
        &[35.0, 35.1],
        &[100.0, 600.0],
        &[0, 0],
        &[0, 0],
        &[0, 0],
        ACCEPTED,
        500.0,
    );
    assert_eq!(t.len(), 1);
    assert_eq!(s.len(), 1);
    assert_eq!(p, vec![100.0]);
}

#[test]
fn test_absent_flag_sentinel_never_accepted() {
    let (_, _, p) = filter_qc_and_pressure(
        &[10.0],
        &[35.0],
        &[100.0],
        &[quality_flags::ABSENT],
        &[0],
        &[0],
        ACCEPTED,
        1.0e7,
    );
    assert!(p.is_empty());
}

#[test]
fn test_empty_input_is_empty_output() {
    let (t, s, p) = filter_qc_and_pressure(&[], &[], &[], &[], &[], &[], ACCEPTED, 1.0e7);
    assert!(t.is_empty() && s.is_empty() && p.is_empty());
}

#[test]
fn test_wider_accept_set_keeps_suspect_levels() {
    let (t, _, _) = filter_qc_and_pressure(
        &[10.0, 9.0],
        &[35.0, 35.1],
        &[0.0, 50.0],
        &[0, 3],
        &[0, 0],
        &[0, 0],
        &[0, 3],
        1.0e7,
    );
    assert_eq!(t.len(), 2);
}

#[test]
fn test_output_lengths_always_equal() {
    let (t, s, p) = filter_qc_and_pressure(
        &[10.0, f64::NAN, 8.0],
        &[35.0, 35.1, 35.2],
        &[0.0, 50.0, 100.0],
        &[0, 0, 5],
        &[0, 0, 0],
        &[0, 0, 0],
        ACCEPTED,
        1.0e7,
    );
    assert_eq!(t.len(), s.len());
    assert_eq!(s.len(), p.len());
    assert!(t.len() <= 3);
}

#[test]
fn test_has_common_finite_level() {
    assert!(!has_common_finite_level(&[1.0, f64::NAN], &[f64::NAN, 2.0]));
    assert!(has_common_finite_level(&[1.0, 3.0], &[f64::NAN, 2.0]));
    assert!(!has_common_finite_level(&[], &[]));
    assert!(!has_common_finite_level(&[f64::NAN], &[f64::NAN]));
}
