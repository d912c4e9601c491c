//! Application constants for the WOD profile reducer
//!
//! This module contains the quality-control accept sets, physical
//! constants, and output naming used throughout the reducer.

// =============================================================================
// Input Files and Variables
// =============================================================================

/// Cast files produced by WODselect start with this prefix.
pub const PROFILE_FILE_PATTERN: &str = "ocldb*";

/// WOD CSV variable labels. Labels are truncated to the CSV column width,
/// so `Temperature` appears as `Temperatur` in the VARIABLES row.
pub mod variables {
    pub const TEMPERATURE: &str = "Temperatur";
    pub const SALINITY: &str = "Salinity";
    pub const PRESSURE: &str = "Pressure";
}

// =============================================================================
// Quality Control Constants
// =============================================================================

/// WOD quality flag values
pub mod quality_flags {
    /// Passed all QC checks
    pub const ACCEPTED: i8 = 0;

    /// Default accept-set applied to per-level flags
    pub const DEFAULT_ACCEPTED: &[i8] = &[ACCEPTED];

    /// Sentinel for a flag field that was blank or unparseable. Never a
    /// member of any accept-set.
    pub const ABSENT: i8 = -1;
}

/// Upper bound on admissible pressure (dbar). Matches the cap the
/// original pipeline ran with, which admits every physical level.
pub const MAX_PRESSURE_DBAR: f64 = 1.0e7;

// =============================================================================
// Bracketing and Reduction
// =============================================================================

/// Pressure kept on either side of the region of interest (dbar).
pub const DEFAULT_PRESSURE_BUFFER_DBAR: f64 = 100.0;

/// Minimum number of levels preserved on each side of the region of
/// interest, regardless of their spacing in pressure.
pub const DEFAULT_PRESSURE_INDEX_BUFFER: usize = 5;

/// Radius of the single-level "meaningful data nearby" check (dbar).
/// Independent of the configurable pressure buffer.
pub const LEVEL_SEARCH_RADIUS_DBAR: f64 = 15.0;

/// Casts at the exact same position closer together in time than this
/// (continuous days) collapse to one row. 15 minutes.
pub const DUPLICATE_WINDOW_DAYS: f64 = 15.0 / 1440.0;

// =============================================================================
// Unit and Coordinate Transforms
// =============================================================================

pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Longitudes west of this meridian wrap +360 into [20, 380).
pub const LONGITUDE_WRAP_DEGREES: f64 = 20.0;

/// MATLAB day numbers sit 366 days ahead of the proleptic ordinal.
pub const MATLAB_DATENUM_OFFSET: f64 = 366.0;

// =============================================================================
// Output Tables
// =============================================================================

/// Output column names, in table order.
pub mod columns {
    pub const JULIAN_DAY: &str = "profJulDayAggr";
    pub const LONGITUDE: &str = "profLongAggr";
    pub const LATITUDE: &str = "profLatAggr";
    pub const MONTH: &str = "profMonthAggr";
    pub const YEAR: &str = "profYearAggr";
    pub const CYCLE_NUMBER: &str = "profCycleNumberAggr";
    pub const FLOAT_ID: &str = "profFloatIDAggr";

    /// Region-of-interest descriptor column (single-level runs).
    pub const INTERPOLATED_PRESSURE: &str = "interpolatedPressure";
    /// Region-of-interest descriptor columns (integral runs).
    pub const PRESSURE_RANGE_SHALLOW: &str = "pressureRangeShallow";
    pub const PRESSURE_RANGE_DEEP: &str = "pressureRangeDeep";
}

/// Derived-variable names used for output columns and file naming.
pub mod derived {
    pub const POTENTIAL_TEMPERATURE: &str = "potentialTemperature";
    pub const CONSERVATIVE_TEMPERATURE: &str = "conservativeTemperature";
    pub const ABSOLUTE_SALINITY: &str = "absoluteSalinity";

    /// Appended to the variable name for integral runs.
    pub const INTEGRAL_SUFFIX: &str = "Integral";
}
