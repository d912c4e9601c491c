//! The profile-reduction core
//!
//! This module turns one quality-filtered cast into at most two output
//! rows, and finalizes the aggregated tables. The stages are:
//!
//! 1. [`qc`] - lockstep quality-control filtering of the raw measurement
//!    triples
//! 2. [`bracket`] - selection of the index span around the pressure region
//!    of interest, with a physical buffer and a guaranteed index margin
//! 3. [`degeneracy`] - rejection of regions with repeated pressure
//!    coordinates, which make interpolation ill-posed
//! 4. [`pchip`] / [`reducer`] - shape-preserving monotone cubic
//!    interpolation to a level, or integration across a range
//! 5. [`dedup`] - one global pass collapsing exactly colocated,
//!    near-in-time casts after all files are merged
//!
//! Every stage is a pure function over slices; the orchestrator in
//! `crate::processor` owns the control flow and the skip bookkeeping.

pub mod bracket;
pub mod dedup;
pub mod degeneracy;
pub mod pchip;
pub mod qc;
pub mod reducer;

#[cfg(test)]
pub mod tests;

// Re-export the pipeline operations
pub use bracket::pad_bracket;
pub use dedup::sort_and_remove_neighbors;
pub use degeneracy::has_repeated_elements;
pub use pchip::{PchipError, PchipInterpolator};
pub use qc::{filter_qc_and_pressure, has_common_finite_level};
pub use reducer::{ReductionFailure, interpolate_and_integrate, interpolate_at, reduce};
