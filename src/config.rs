//! Run configuration and validation.
//!
//! Provides the region-of-interest descriptor, the derived-temperature
//! selector, and the validated configuration for a reduction run.

use crate::constants::derived;
use crate::error::{Result, WodError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which derived temperature the run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureVariant {
    /// Potential temperature referenced to the surface
    Potential,
    /// Conservative temperature (TEOS-10)
    Conservative,
}

/// Region of interest: a single pressure level to interpolate to, or a
/// closed pressure range to integrate over. Fixed for the entire run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PressureTarget {
    Level(f64),
    Range { shallow: f64, deep: f64 },
}

impl PressureTarget {
    /// Build a target from the CLI `--pressure` values: one value selects
    /// single-level interpolation, two select a shallow/deep integral.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(WodError::configuration(
                "pressure values must be finite numbers",
            ));
        }
        match *values {
            [level] => Ok(Self::Level(level)),
            [shallow, deep] => {
                if deep <= shallow {
                    return Err(WodError::configuration(format!(
                        "pressure range must be shallow then deep, got {shallow} and {deep}"
                    )));
                }
                Ok(Self::Range { shallow, deep })
            }
            _ => Err(WodError::configuration(
                "expected one pressure level or a shallow/deep pair",
            )),
        }
    }

    /// Lower and upper pressure bound of the region of interest. Equal in
    /// single-level mode.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Self::Level(level) => (level, level),
            Self::Range { shallow, deep } => (shallow, deep),
        }
    }

    /// The configured pressure values, in CLI order.
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Self::Level(level) => vec![level],
            Self::Range { shallow, deep } => vec![shallow, deep],
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

/// Validated configuration for one reduction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory holding WOD CSV cast files (`ocldb*`)
    pub data_dir: PathBuf,

    /// Directory output Parquet tables are written to
    pub out_dir: PathBuf,

    /// Year casts must match to be consumed
    pub year: i32,

    /// Month casts must match to be consumed (1-12)
    pub month: u32,

    /// Region of interest
    pub target: PressureTarget,

    /// Derived temperature selector
    pub temperature_variant: TemperatureVariant,

    /// Pressure kept on either side of the region of interest (dbar)
    pub pressure_buffer: f64,

    /// Minimum number of levels preserved on each side of the region of
    /// interest
    pub pressure_index_buffer: usize,

    /// Maximum number of cast files reduced concurrently
    pub max_concurrent_files: usize,
}

impl RunConfig {
    /// Validate configuration values for consistency and valid ranges
    pub fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) {
            return Err(WodError::configuration(format!(
                "month must be 1-12, got {}",
                self.month
            )));
        }
        if !self.pressure_buffer.is_finite() || self.pressure_buffer < 0.0 {
            return Err(WodError::configuration(format!(
                "pressure buffer must be non-negative, got {}",
                self.pressure_buffer
            )));
        }
        if self.max_concurrent_files == 0 {
            return Err(WodError::configuration(
                "worker count must be at least 1",
            ));
        }
        Ok(())
    }

    /// Output variable name for the temperature table.
    pub fn temperature_table_name(&self) -> String {
        let base = match self.temperature_variant {
            TemperatureVariant::Potential => derived::POTENTIAL_TEMPERATURE,
            TemperatureVariant::Conservative => derived::CONSERVATIVE_TEMPERATURE,
        };
        self.with_mode_suffix(base)
    }

    /// Output variable name for the salinity table.
    pub fn salinity_table_name(&self) -> String {
        self.with_mode_suffix(derived::ABSOLUTE_SALINITY)
    }

    fn with_mode_suffix(&self, base: &str) -> String {
        if self.target.is_integral() {
            format!("{base}{}", derived::INTEGRAL_SUFFIX)
        } else {
            base.to_string()
        }
    }

    /// Output path for one table: encodes variable name, year, month, and
    /// the region-of-interest values.
    pub fn output_path(&self, variable: &str) -> PathBuf {
        let pressures = self
            .target
            .values()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("_");
        self.out_dir.join(format!(
            "{variable}_{}_{}_{pressures}.parquet",
            self.year, self.month
        ))
    }
}
