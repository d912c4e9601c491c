//! WOD Profile Reducer Library
//!
//! A Rust library for reducing World Ocean Database (WOD) profile casts to
//! single-level or depth-integrated temperature and salinity observation
//! tables in Apache Parquet format.
//!
//! This library provides tools for:
//! - Reading WOD CSV cast exports one profile at a time
//! - Quality-control filtering of temperature/salinity/pressure levels
//! - Bracketing profile levels around a pressure region of interest
//! - Shape-preserving monotone cubic interpolation and integration
//! - Deduplicating colocated, near-in-time casts
//! - Writing Snappy-compressed Parquet observation tables

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod reduction;
pub mod thermo;
pub mod wod;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{PressureTarget, RunConfig, TemperatureVariant};
pub use error::{Result, WodError};
pub use models::{OutputRow, Profile, RunStats};
