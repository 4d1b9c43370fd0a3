//! White balance as independent channel gains.
//!
//! Temperature pushes red against blue, tint pushes green. This is a
//! deliberate approximation for stylized looks: there is no Planckian locus
//! or chromatic adaptation involved, and 5000 K / tint 0 is the identity.
//!
//! ```text
//!   temp_bias = (temperature − 5000) / 10000
//!   tint_bias = tint / 150
//!   r × (1 + temp_bias),  g × (1 + tint_bias),  b × (1 − temp_bias)
//! ```

use glam::DVec3;

use crate::transform::params::NEUTRAL_TEMPERATURE;

const TEMPERATURE_SPAN: f64 = 10_000.0;
const TINT_SPAN: f64 = 150.0;

/// Per-channel multipliers for a temperature/tint pair.
pub fn white_balance_gains(temperature_k: f64, tint: f64) -> DVec3 {
    let temp_bias = (temperature_k - NEUTRAL_TEMPERATURE) / TEMPERATURE_SPAN;
    let tint_bias = tint / TINT_SPAN;
    DVec3::new(1.0 + temp_bias, 1.0 + tint_bias, 1.0 - temp_bias)
}

/// Apply white balance using temperature in Kelvin and tint.
pub fn white_balance_adjust(rgb: DVec3, temperature_k: f64, tint: f64) -> DVec3 {
    rgb * white_balance_gains(temperature_k, tint)
}
