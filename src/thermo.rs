//! TEOS-10 derived-variable conversions.
//!
//! Thin wrappers over the `gsw` crate keeping the conversion surface in
//! one place. The conversions are pure functions of their inputs; any
//! out-of-range rejection from the toolbox surfaces as NaN, which the
//! reduction layer already treats as a missing value.

use crate::config::TemperatureVariant;
use crate::constants::CELSIUS_TO_KELVIN;

/// Ratio of TEOS-10 reference salinity to practical salinity (uPS).
const UPS: f64 = 35.16504 / 35.0;

/// Absolute salinity (g/kg) from practical salinity.
///
/// Reference-salinity scaling. The SAAR regional anomaly (below
/// 0.025 g/kg in the open ocean) requires the global anomaly atlas, which
/// the Rust toolbox does not ship; the pressure and position arguments
/// are retained so the full TEOS-10 signature stays in place for when it
/// does.
pub fn absolute_salinity(
    practical_salinity: f64,
    _pressure: f64,
    _longitude: f64,
    _latitude: f64,
) -> f64 {
    practical_salinity * UPS
}

/// The derived temperature for the configured variant, in Kelvin.
///
/// Potential temperature is referenced to 0 dbar; conservative
/// temperature follows TEOS-10. Inputs the toolbox rejects yield NaN.
pub fn temperature_star(
    variant: TemperatureVariant,
    absolute_salinity: f64,
    temperature: f64,
    pressure: f64,
) -> f64 {
    let derived = match variant {
        TemperatureVariant::Potential => {
            gsw::conversions::pt0_from_t(absolute_salinity, temperature, pressure)
        }
        TemperatureVariant::Conservative => {
            gsw::conversions::ct_from_t(absolute_salinity, temperature, pressure)
        }
    };
    derived.map_or(f64::NAN, |celsius| celsius + CELSIUS_TO_KELVIN)
}
