//! Detection of repeated pressure coordinates.

/// True iff any value occurs more than once, under exact equality.
///
/// Repeated pressure coordinates leave the interpolation ill-posed
/// (duplicate x-coordinates), so a region containing any repeat is
/// rejected wholesale rather than partially repaired. Empty and
/// single-element sequences have no repeats.
pub fn has_repeated_elements(sequence: &[f64]) -> bool {
    if sequence.len() < 2 {
        return false;
    }
    let mut sorted = sequence.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.windows(2).any(|pair| pair[0] == pair[1])
}
