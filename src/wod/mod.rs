//! WOD cast ingestion
//!
//! Reads World Ocean Database casts from WODselect CSV exports, one
//! profile at a time. A cast in that format is a run of
//! `name,,value,...` metadata rows, a `VARIABLES`/`UNITS`/`Prof-Flag`
//! column-header block, data rows of (value, WOD flag, originator flag)
//! triples, and an `END OF VARIABLES SECTION` terminator; `#`-prefixed
//! separator lines divide casts.
//!
//! The reader performs no format validation beyond what parsing needs:
//! unparsable numeric fields become NaN, unparsable flags become a
//! sentinel outside every accept-set, and only structural breakage (a
//! truncated cast) is an error.

pub mod parser;

pub use parser::WodCsvReader;
