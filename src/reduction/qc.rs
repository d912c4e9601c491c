//! Quality-control filtering of raw measurement triples.

/// Filter three parallel level sequences in lockstep.
///
/// A level survives iff its pressure is at most `max_pressure`, all three
/// per-level flags are members of `accepted_flags`, and none of
/// temperature, salinity, or pressure is NaN. Surviving levels keep their
/// relative order.
///
/// An empty result is not an error: it is the ordinary "no data passing
/// QC" outcome, signalled by zero length.
///
/// # Returns
///
/// Cleaned `(temperatures, salinities, pressures)` of equal length.
#[allow(clippy::too_many_arguments)]
pub fn filter_qc_and_pressure(
    temperatures: &[f64],
    salinities: &[f64],
    pressures: &[f64],
    temperature_flags: &[i8],
    salinity_flags: &[i8],
    pressure_flags: &[i8],
    accepted_flags: &[i8],
    max_pressure: f64,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    debug_assert_eq!(temperatures.len(), pressures.len());
    debug_assert_eq!(salinities.len(), pressures.len());
    debug_assert_eq!(temperature_flags.len(), pressures.len());
    debug_assert_eq!(salinity_flags.len(), pressures.len());
    debug_assert_eq!(pressure_flags.len(), pressures.len());

    let mut clean_t = Vec::with_capacity(pressures.len());
    let mut clean_s = Vec::with_capacity(pressures.len());
    let mut clean_p = Vec::with_capacity(pressures.len());

    for i in 0..pressures.len() {
        let (t, s, p) = (temperatures[i], salinities[i], pressures[i]);

        // The negated comparison also rejects NaN pressure.
        if !(p <= max_pressure) {
            continue;
        }
        if t.is_nan() || s.is_nan() {
            continue;
        }
        if !accepted_flags.contains(&temperature_flags[i])
            || !accepted_flags.contains(&salinity_flags[i])
            || !accepted_flags.contains(&pressure_flags[i])
        {
            continue;
        }

        clean_t.push(t);
        clean_s.push(s);
        clean_p.push(p);
    }

    (clean_t, clean_s, clean_p)
}

/// True if any index holds a finite value in both sequences.
///
/// Used by the single-level coverage check: the target only makes sense
/// if some nearby level measured both variables.
pub fn has_common_finite_level(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).any(|(x, y)| x.is_finite() && y.is_finite())
}
