//! Per-file profile reduction loop.
//!
//! Drives one cast at a time through the pipeline: QC filter, coverage
//! check, bracket selection, degeneracy check, derived-variable
//! conversion, reduction. Any rejection short-circuits to the next cast;
//! nothing inside a cast is retried.

use crate::config::{PressureTarget, RunConfig};
use crate::constants::{LEVEL_SEARCH_RADIUS_DBAR, MAX_PRESSURE_DBAR, quality_flags};
use crate::error::Result;
use crate::models::{OutputRow, Profile, ReducedTables, RunStats};
use crate::reduction::{
    ReductionFailure, filter_qc_and_pressure, has_common_finite_level, has_repeated_elements,
    pad_bracket, reduce,
};
use crate::thermo;
use crate::wod::WodCsvReader;
use std::path::Path;
use tracing::{debug, warn};

/// Reduce every matching cast in one file.
pub fn reduce_file(path: &Path, config: &RunConfig) -> Result<(ReducedTables, RunStats)> {
    let mut tables = ReducedTables::default();
    let mut stats = RunStats::default();

    for profile in WodCsvReader::open(path)? {
        let profile = profile?;
        stats.casts_scanned += 1;

        // Casts from other months pass through without side effects.
        if profile.year != config.year || profile.month != config.month {
            continue;
        }
        stats.casts_matched += 1;

        reduce_profile(&profile, config, &mut tables, &mut stats);
    }

    Ok((tables, stats))
}

/// Run one cast through the reduction pipeline, appending at most one row
/// per output table.
fn reduce_profile(
    profile: &Profile,
    config: &RunConfig,
    tables: &mut ReducedTables,
    stats: &mut RunStats,
) {
    let (Some(t_var), Some(s_var), Some(p_var)) =
        (profile.temperature(), profile.salinity(), profile.pressure())
    else {
        debug!(
            "cast {}: missing temperature, salinity or pressure variable",
            profile.cast_id
        );
        stats.casts_no_data += 1;
        return;
    };

    let (temp, psal, pres) = filter_qc_and_pressure(
        &t_var.values,
        &s_var.values,
        &p_var.values,
        &t_var.level_flags,
        &s_var.level_flags,
        &p_var.level_flags,
        quality_flags::DEFAULT_ACCEPTED,
        MAX_PRESSURE_DBAR,
    );
    if pres.is_empty() {
        debug!("cast {}: no data passing QC", profile.cast_id);
        stats.casts_no_data += 1;
        return;
    }

    // Coverage check before any bracketing commits the cast.
    match config.target {
        PressureTarget::Level(level) => {
            // The strict interior of a zero-margin search bracket holds
            // exactly the levels within the search radius of the target.
            let (lo, hi) = pad_bracket(&pres, level, level, LEVEL_SEARCH_RADIUS_DBAR, 0);
            let nearby =
                hi > lo && has_common_finite_level(&temp[lo + 1..hi], &psal[lo + 1..hi]);
            if !nearby {
                debug!(
                    "cast {}: no data within {} dbar of target level",
                    profile.cast_id, LEVEL_SEARCH_RADIUS_DBAR
                );
                stats.casts_out_of_range += 1;
                return;
            }
        }
        PressureTarget::Range { shallow, deep } => {
            if shallow < pres[0] || deep > pres[pres.len() - 1] {
                debug!(
                    "cast {}: integration range not contained in pressure span",
                    profile.cast_id
                );
                stats.casts_out_of_range += 1;
                return;
            }
        }
    }

    let (low, high) = config.target.bounds();
    let (start, end) = pad_bracket(
        &pres,
        low,
        high,
        config.pressure_buffer,
        config.pressure_index_buffer,
    );
    let p_region = &pres[start..=end];
    let t_region = &temp[start..=end];
    let s_region = &psal[start..=end];

    // Repeated pressure coordinates make the interpolation ill-posed.
    if has_repeated_elements(p_region) {
        debug!("cast {}: degenerate pressure levels", profile.cast_id);
        stats.casts_degenerate += 1;
        return;
    }

    let absolute_salinity: Vec<f64> = s_region
        .iter()
        .zip(p_region)
        .map(|(&s, &p)| thermo::absolute_salinity(s, p, profile.longitude, profile.latitude))
        .collect();
    let t_star: Vec<f64> = absolute_salinity
        .iter()
        .zip(t_region.iter().zip(p_region))
        .map(|(&sa, (&t, &p))| thermo::temperature_star(config.temperature_variant, sa, t, p))
        .collect();

    append_reduced(
        profile,
        config,
        p_region,
        &t_star,
        &config.temperature_table_name(),
        &mut tables.temperature,
        stats,
    );
    append_reduced(
        profile,
        config,
        p_region,
        &absolute_salinity,
        &config.salinity_table_name(),
        &mut tables.salinity,
        stats,
    );
}

/// Reduce one variable and append its row, holding the per-variable error
/// boundary: a failed reduction drops only this row and logs the region.
fn append_reduced(
    profile: &Profile,
    config: &RunConfig,
    pressures: &[f64],
    values: &[f64],
    variable: &str,
    table: &mut Vec<OutputRow>,
    stats: &mut RunStats,
) {
    match reduce(pressures, values, &config.target) {
        // Every level missing: no row, nothing failed.
        None => {}
        Some(Ok(value)) => table.push(OutputRow::new(profile, value)),
        Some(Err(source)) => {
            let failure = ReductionFailure {
                cast_id: profile.cast_id,
                variable: variable.to_string(),
                source,
                pressures: pressures.to_vec(),
                values: values.to_vec(),
            };
            warn!(
                "{} (pressures {:?}, values {:?})",
                failure, failure.pressures, failure.values
            );
            stats.reduction_failures += 1;
        }
    }
}
