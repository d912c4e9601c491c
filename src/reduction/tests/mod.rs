//! Tests for the profile-reduction core
//!
//! Bracket selection and degeneracy detection are covered by unit tests
//! beside their implementations; this module holds the QC, interpolation,
//! reduction, and deduplication suites plus shared fixtures.

pub mod dedup_tests;
pub mod qc_tests;
pub mod reducer_tests;

use crate::models::OutputRow;

/// Create an output row at a position and continuous day number.
pub fn row_at(longitude: f64, latitude: f64, julian_day: f64) -> OutputRow {
    OutputRow {
        julian_day,
        longitude,
        latitude,
        month: 3,
        value: 285.0,
        year: 2015,
        cycle_number: 0.0,
        float_id: 0.0,
    }
}
