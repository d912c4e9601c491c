//! Tests for near-duplicate removal

use super::row_at;
use crate::constants::DUPLICATE_WINDOW_DAYS;
use crate::reduction::dedup::sort_and_remove_neighbors;

const FIVE_MINUTES: f64 = 5.0 / 1440.0;

#[test]
fn test_output_is_sorted_by_position_then_time() {
    let rows = vec![
        row_at(300.0, 10.0, 736000.5),
        row_at(100.0, -5.0, 736000.1),
        row_at(100.0, -5.0, 736000.9),
        row_at(100.0, -40.0, 736000.2),
    ];
    let result = sort_and_remove_neighbors(rows);
    assert_eq!(result.len(), 4);
    for pair in result.windows(2) {
        let key = |r: &crate::models::OutputRow| (r.longitude, r.latitude, r.julian_day);
        assert!(key(&pair[0]) <= key(&pair[1]));
    }
}

#[test]
fn test_colocated_within_window_collapse() {
    let rows = vec![
        row_at(283.75, 29.9, 736000.0),
        row_at(283.75, 29.9, 736000.0 + FIVE_MINUTES),
    ];
    let result = sort_and_remove_neighbors(rows);
    assert_eq!(result.len(), 1);
    // The earliest row of the run survives.
    assert_eq!(result[0].julian_day, 736000.0);
}

#[test]
fn test_chain_of_close_casts_reduces_to_one() {
    // Each row is within the window of the previous, so the whole chain
    // collapses onto the first.
    let rows = (0..5)
        .map(|i| row_at(283.75, 29.9, 736000.0 + f64::from(i) * FIVE_MINUTES))
        .collect();
    let result = sort_and_remove_neighbors(rows);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_beyond_window_survives() {
    let rows = vec![
        row_at(283.75, 29.9, 736000.0),
        row_at(283.75, 29.9, 736000.0 + DUPLICATE_WINDOW_DAYS),
    ];
    let result = sort_and_remove_neighbors(rows);
    // Exactly at the window boundary is not "less than".
    assert_eq!(result.len(), 2);
}

#[test]
fn test_distinct_positions_never_merge() {
    let rows = vec![
        row_at(283.75, 29.9, 736000.0),
        row_at(283.7500001, 29.9, 736000.0),
        row_at(283.75, 29.9000001, 736000.0),
    ];
    let result = sort_and_remove_neighbors(rows);
    assert_eq!(result.len(), 3);
}

#[test]
fn test_empty_input() {
    assert!(sort_and_remove_neighbors(Vec::new()).is_empty());
}

#[test]
fn test_nan_day_rows_are_kept() {
    let rows = vec![
        row_at(283.75, 29.9, f64::NAN),
        row_at(283.75, 29.9, f64::NAN),
        row_at(283.75, 29.9, 736000.0),
    ];
    // A NaN time difference is never inside the window.
    let result = sort_and_remove_neighbors(rows);
    assert_eq!(result.len(), 3);
}
