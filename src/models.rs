//! Core data structures for WOD profile reduction.
//!
//! Defines the in-memory cast representation produced by the parser, the
//! aggregated output row, and the run statistics reported at the end of
//! processing.

use crate::constants::{LONGITUDE_WRAP_DEGREES, MATLAB_DATENUM_OFFSET, variables};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One measured variable in a cast: parallel per-level values and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileVariable {
    /// Variable label as it appears in the VARIABLES row (possibly
    /// truncated to the CSV column width, e.g. `Temperatur`)
    pub name: String,

    /// Unit label from the UNITS row, carried as-is
    pub unit: String,

    /// WOD per-profile flag for this variable
    pub profile_flag: i8,

    /// Per-level measured values; NaN marks a missing level
    pub values: Vec<f64>,

    /// WOD per-level quality flags
    pub level_flags: Vec<i8>,

    /// Originator per-level flags, carried but not interpreted
    pub originator_flags: Vec<i8>,
}

/// One in-situ measurement event: a depth-resolved set of measurements at
/// a single place and time. Consumed immediately after parsing; never
/// retained past output-row construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// WOD unique cast number
    pub cast_id: i64,

    pub year: i32,
    pub month: u32,
    pub day: u32,

    /// Decimal hours UT; NaN when the cast carries no time
    pub time: f64,

    pub latitude: f64,

    /// Longitude in the source range (typically [-180, 180])
    pub longitude: f64,

    /// All measured variables, each with equal-length level sequences
    pub variables: Vec<ProfileVariable>,
}

impl Profile {
    /// Number of levels in this cast.
    pub fn levels(&self) -> usize {
        self.variables.first().map_or(0, |v| v.values.len())
    }

    /// Index of a variable by its exact WOD CSV label.
    pub fn var_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    /// Per-level WOD quality flags of the variable at `index`.
    pub fn var_level_qc(&self, index: usize) -> &[i8] {
        &self.variables[index].level_flags
    }

    /// Per-profile WOD quality flag of the variable at `index`.
    pub fn var_profile_qc(&self, index: usize) -> i8 {
        self.variables[index].profile_flag
    }

    pub fn temperature(&self) -> Option<&ProfileVariable> {
        self.find(variables::TEMPERATURE)
    }

    pub fn salinity(&self) -> Option<&ProfileVariable> {
        self.find(variables::SALINITY)
    }

    pub fn pressure(&self) -> Option<&ProfileVariable> {
        self.find(variables::PRESSURE)
    }

    /// Prefix match so both truncated and full labels resolve.
    fn find(&self, label: &str) -> Option<&ProfileVariable> {
        self.variables.iter().find(|v| v.name.starts_with(label))
    }
}

/// One aggregated observation destined for an output table.
///
/// The region-of-interest descriptor is fixed for the entire run and is
/// materialized as constant columns at write time rather than stored per
/// row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputRow {
    /// Continuous day number (MATLAB datenum convention)
    pub julian_day: f64,

    /// Longitude remapped into [20, 380)
    pub longitude: f64,

    pub latitude: f64,
    pub month: u32,

    /// Point estimate or definite integral of the derived variable
    pub value: f64,

    pub year: i32,

    /// Provenance slots kept zero for downstream row-shape compatibility
    pub cycle_number: f64,
    pub float_id: f64,
}

impl OutputRow {
    pub fn new(profile: &Profile, value: f64) -> Self {
        Self {
            julian_day: continuous_day_number(
                profile.year,
                profile.month,
                profile.day,
                profile.time,
            ),
            longitude: remap_longitude(profile.longitude),
            latitude: profile.latitude,
            month: profile.month,
            value,
            year: profile.year,
            cycle_number: 0.0,
            float_id: 0.0,
        }
    }
}

/// MATLAB-style continuous day number: proleptic ordinal plus 366, plus
/// the day fraction from decimal hours. NaN for a date chrono rejects
/// (some historical casts carry day 0).
pub fn continuous_day_number(year: i32, month: u32, day: u32, time_hours: f64) -> f64 {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => {
            f64::from(date.num_days_from_ce()) + MATLAB_DATENUM_OFFSET + time_hours / 24.0
        }
        None => f64::NAN,
    }
}

/// Remap longitude into the [20, 380) aggregation range.
pub fn remap_longitude(longitude: f64) -> f64 {
    if longitude < LONGITUDE_WRAP_DEGREES {
        longitude + 360.0
    } else {
        longitude
    }
}

/// The two accumulating output tables, one per derived variable family.
#[derive(Debug, Clone, Default)]
pub struct ReducedTables {
    pub temperature: Vec<OutputRow>,
    pub salinity: Vec<OutputRow>,
}

impl ReducedTables {
    /// Append another set of tables, preserving relative order.
    pub fn merge(&mut self, other: ReducedTables) {
        self.temperature.extend(other.temperature);
        self.salinity.extend(other.salinity);
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub casts_scanned: usize,
    pub casts_matched: usize,
    pub casts_no_data: usize,
    pub casts_out_of_range: usize,
    pub casts_degenerate: usize,
    pub reduction_failures: usize,
    pub temperature_rows: usize,
    pub salinity_rows: usize,
    pub duplicates_removed: usize,
    pub processing_time_ms: u128,
}

impl RunStats {
    /// Fold one file's per-cast counters into the run totals.
    pub fn absorb(&mut self, other: &RunStats) {
        self.casts_scanned += other.casts_scanned;
        self.casts_matched += other.casts_matched;
        self.casts_no_data += other.casts_no_data;
        self.casts_out_of_range += other.casts_out_of_range;
        self.casts_degenerate += other.casts_degenerate;
        self.reduction_failures += other.reduction_failures;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_day_number_matches_datenum() {
        // MATLAB datenum(2000,1,1) == 730486
        assert_eq!(continuous_day_number(2000, 1, 1, 0.0), 730486.0);
        // Noon adds half a day
        assert_eq!(continuous_day_number(2000, 1, 1, 12.0), 730486.5);
    }

    #[test]
    fn test_continuous_day_number_invalid_date_is_nan() {
        assert!(continuous_day_number(2000, 1, 0, 0.0).is_nan());
        assert!(continuous_day_number(2000, 13, 1, 0.0).is_nan());
    }

    #[test]
    fn test_continuous_day_number_missing_time_propagates() {
        assert!(continuous_day_number(2000, 1, 1, f64::NAN).is_nan());
    }

    #[test]
    fn test_remap_longitude() {
        assert_eq!(remap_longitude(-76.25), 283.75);
        assert_eq!(remap_longitude(0.0), 360.0);
        assert_eq!(remap_longitude(19.9), 379.9);
        assert_eq!(remap_longitude(20.0), 20.0);
        assert_eq!(remap_longitude(120.0), 120.0);
    }

    #[test]
    fn test_profile_variable_lookup() {
        let profile = Profile {
            cast_id: 1,
            year: 2015,
            month: 3,
            day: 10,
            time: 11.5,
            latitude: 10.0,
            longitude: -30.0,
            variables: vec![
                ProfileVariable {
                    name: "Temperatur".to_string(),
                    unit: "degrees C".to_string(),
                    profile_flag: 0,
                    values: vec![10.0, 9.5],
                    level_flags: vec![0, 0],
                    originator_flags: vec![0, 0],
                },
                ProfileVariable {
                    name: "Pressure".to_string(),
                    unit: "dbar".to_string(),
                    profile_flag: 0,
                    values: vec![0.0, 10.0],
                    level_flags: vec![0, 0],
                    originator_flags: vec![0, 0],
                },
            ],
        };

        assert_eq!(profile.levels(), 2);
        assert!(profile.temperature().is_some());
        assert!(profile.pressure().is_some());
        assert!(profile.salinity().is_none());
        assert_eq!(profile.var_index("Pressure"), Some(1));
        assert_eq!(profile.var_level_qc(1), &[0, 0]);
        assert_eq!(profile.var_profile_qc(0), 0);
    }

    #[test]
    fn test_output_row_from_profile() {
        let profile = Profile {
            cast_id: 42,
            year: 2000,
            month: 1,
            day: 1,
            time: 12.0,
            latitude: -40.0,
            longitude: -76.25,
            variables: Vec::new(),
        };
        let row = OutputRow::new(&profile, 285.0);
        assert_eq!(row.julian_day, 730486.5);
        assert_eq!(row.longitude, 283.75);
        assert_eq!(row.latitude, -40.0);
        assert_eq!(row.month, 1);
        assert_eq!(row.year, 2000);
        assert_eq!(row.value, 285.0);
        assert_eq!(row.cycle_number, 0.0);
        assert_eq!(row.float_id, 0.0);
    }
}
