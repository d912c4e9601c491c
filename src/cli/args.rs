//! Command-line argument definitions for the WOD reducer
//!
//! This module defines the complete CLI interface using the clap derive
//! API and the conversion into a validated run configuration.

use crate::config::{PressureTarget, RunConfig, TemperatureVariant};
use crate::constants::{DEFAULT_PRESSURE_BUFFER_DBAR, DEFAULT_PRESSURE_INDEX_BUFFER};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the WOD profile reducer
///
/// Reduces World Ocean Database casts to single-level or depth-integrated
/// temperature and salinity observation tables in Parquet format.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wod-reducer",
    version,
    about = "Reduce WOD profile casts to interpolated or depth-integrated observation tables",
    long_about = "Extracts temperature and salinity observations from World Ocean Database \
                  profile casts, restricts each cast to a pressure region of interest, derives \
                  a single-level value (monotone interpolation) or a depth-integrated value, \
                  and writes deduplicated Parquet tables for the derived temperature and \
                  absolute salinity."
)]
pub struct Args {
    /// Directory containing WOD CSV cast files (ocldb*)
    #[arg(long = "data-dir", value_name = "PATH")]
    pub data_dir: PathBuf,

    /// Directory to write output Parquet tables to
    ///
    /// Created if it does not exist. Output files are named
    /// {variable}_{year}_{month}_{pressure values}.parquet.
    #[arg(long = "out-dir", value_name = "PATH")]
    pub out_dir: PathBuf,

    /// Year casts must match to be consumed
    #[arg(long, value_name = "YEAR")]
    pub year: i32,

    /// Month casts must match to be consumed (1-12)
    #[arg(long, value_name = "MONTH")]
    pub month: u32,

    /// One pressure level to interpolate to, or a shallow/deep pair to
    /// integrate across (dbar)
    #[arg(long, value_name = "DBAR", num_args = 1..=2, required = true)]
    pub pressure: Vec<f64>,

    /// Which derived temperature to compute
    #[arg(long = "temp-type", value_enum, value_name = "VARIANT")]
    pub temp_type: TemperatureVariant,

    /// Pressure kept on either side of the region of interest (dbar)
    #[arg(
        long = "pressure-buffer",
        value_name = "DBAR",
        default_value_t = DEFAULT_PRESSURE_BUFFER_DBAR
    )]
    pub pressure_buffer: f64,

    /// Minimum number of levels preserved on each side of the region of
    /// interest
    #[arg(
        long = "pressure-index-buffer",
        value_name = "COUNT",
        default_value_t = DEFAULT_PRESSURE_INDEX_BUFFER
    )]
    pub pressure_index_buffer: usize,

    /// Number of cast files reduced concurrently (0 = one per CPU core)
    #[arg(short = 'j', long = "workers", value_name = "COUNT", default_value_t = 0)]
    pub workers: usize,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Convert parsed arguments into a validated run configuration
    pub fn into_config(self) -> Result<RunConfig> {
        let target = PressureTarget::from_values(&self.pressure)?;
        let config = RunConfig {
            data_dir: self.data_dir,
            out_dir: self.out_dir,
            year: self.year,
            month: self.month,
            target,
            temperature_variant: self.temp_type,
            pressure_buffer: self.pressure_buffer,
            pressure_index_buffer: self.pressure_index_buffer,
            max_concurrent_files: if self.workers == 0 {
                num_cpus::get()
            } else {
                self.workers
            },
        };
        config.validate()?;
        Ok(config)
    }
}
