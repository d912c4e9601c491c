//! Point and integral reduction of a bracketed profile region.

use super::pchip::{PchipError, PchipInterpolator};
use crate::config::PressureTarget;
use thiserror::Error;

/// A reduction that failed for one variable on one cast.
///
/// Carries the offending region so a failure can be diagnosed from the
/// log alone. The cast is not retried; only the affected variable's row
/// is omitted.
#[derive(Debug, Clone, Error)]
#[error("reduction of {variable} failed for cast {cast_id}: {source}")]
pub struct ReductionFailure {
    pub cast_id: i64,
    pub variable: String,
    #[source]
    pub source: PchipError,
    pub pressures: Vec<f64>,
    pub values: Vec<f64>,
}

/// Interpolate `values` (co-indexed with `pressures`) at a single level.
pub fn interpolate_at(pressures: &[f64], values: &[f64], target: f64) -> Result<f64, PchipError> {
    Ok(PchipInterpolator::new(pressures, values)?.evaluate(target))
}

/// Definite integral of the interpolant over `[low, high]`.
pub fn interpolate_and_integrate(
    pressures: &[f64],
    values: &[f64],
    low: f64,
    high: f64,
) -> Result<f64, PchipError> {
    Ok(PchipInterpolator::new(pressures, values)?.integrate(low, high))
}

/// Reduce one variable over its bracketed region.
///
/// `None` means every value in the region is missing: no output row
/// exists and nothing failed. `Some(Err(_))` is a reduction failure for
/// the caller's per-variable error boundary.
pub fn reduce(
    pressures: &[f64],
    values: &[f64],
    target: &PressureTarget,
) -> Option<Result<f64, PchipError>> {
    if values.iter().all(|v| v.is_nan()) {
        return None;
    }
    Some(match *target {
        PressureTarget::Level(level) => interpolate_at(pressures, values, level),
        PressureTarget::Range { shallow, deep } => {
            interpolate_and_integrate(pressures, values, shallow, deep)
        }
    })
}
