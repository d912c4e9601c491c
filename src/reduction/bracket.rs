//! Index-span selection around a pressure region of interest.

/// Find the inclusive index span of `pressures` that covers `[low, high]`,
/// padded outward by a physical buffer and a minimum index margin.
///
/// Three widening steps, each clamped to the sequence bounds:
///
/// 1. the tightest span whose endpoints bracket `[low, high]`;
/// 2. every level within `buffer` pressure units of the region boundary,
///    plus one level beyond the buffer on each side (located by binary
///    search, the sequence being sorted);
/// 3. at least `min_margin` levels beyond the tightest covering span on
///    each side, so the interpolant keeps surrounding knots even where
///    levels are widely spaced.
///
/// The returned `(start, end)` always encloses the tightest covering span
/// and never shrinks when `buffer` or `min_margin` grows.
///
/// # Preconditions
///
/// `pressures` must be non-empty and sorted ascending. Behavior on
/// unsorted input is unspecified. A region of interest lying entirely
/// outside the data range has no covering span; callers check containment
/// first.
pub fn pad_bracket(
    pressures: &[f64],
    low: f64,
    high: f64,
    buffer: f64,
    min_margin: usize,
) -> (usize, usize) {
    let last = pressures.len() - 1;

    // Tightest covering span of [low, high].
    let lo_cover = pressures.partition_point(|&p| p <= low).saturating_sub(1);
    let hi_cover = pressures.partition_point(|&p| p < high).min(last);

    // Physical buffer, inclusive of one level beyond each buffer edge.
    let start_buf = pressures
        .partition_point(|&p| p < low - buffer)
        .saturating_sub(1);
    let end_buf = pressures.partition_point(|&p| p <= high + buffer).min(last);

    // Guaranteed index margin around the covering span.
    let start = start_buf.min(lo_cover.saturating_sub(min_margin));
    let end = end_buf.max((hi_cover + min_margin).min(last));

    (start, end)
}
