//! Post-aggregation removal of near-duplicate casts.

use crate::constants::DUPLICATE_WINDOW_DAYS;
use crate::models::OutputRow;
use tracing::debug;

/// Sort rows by (longitude, latitude, time) and collapse runs of rows at
/// the identical position whose times fall inside the duplicate window.
///
/// Only adjacent rows in sort order are compared: identical coordinates
/// sort contiguously, so exact floating-point equality of longitude and
/// latitude is what makes two rows candidates. Merely nearby casts are
/// distinct observations and never collapse, however close in time. The
/// first row of each run survives, and each later row is compared against
/// the last survivor, so a long chain of closely spaced casts still
/// reduces to one.
pub fn sort_and_remove_neighbors(mut rows: Vec<OutputRow>) -> Vec<OutputRow> {
    rows.sort_by(|a, b| {
        a.longitude
            .total_cmp(&b.longitude)
            .then_with(|| a.latitude.total_cmp(&b.latitude))
            .then_with(|| a.julian_day.total_cmp(&b.julian_day))
    });

    let before = rows.len();
    let mut survivors: Vec<OutputRow> = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(kept) = survivors.last() {
            if kept.longitude == row.longitude
                && kept.latitude == row.latitude
                && (row.julian_day - kept.julian_day).abs() < DUPLICATE_WINDOW_DAYS
            {
                continue;
            }
        }
        survivors.push(row);
    }

    if survivors.len() < before {
        debug!(
            "collapsed {} colocated near-in-time rows",
            before - survivors.len()
        );
    }
    survivors
}
