//! Slider-based tone adjustments (exposure, contrast, saturation/vibrance).

use glam::DVec3;

/// Rec. 709 luminance weights.
pub const LUMA_REC709: DVec3 = DVec3::new(0.2126, 0.7152, 0.0722);

/// Steepness multiplier of the contrast sigmoid at `contrast = 0`.
const CONTRAST_STEEPNESS: f64 = 5.0;

/// Vibrance contributes at half the strength of saturation.
const VIBRANCE_WEIGHT: f64 = 0.5;

/// Convert exposure stops to a linear multiplier: `2^stops`.
pub fn exposure_scale(stops: f64) -> f64 {
    stops.exp2()
}

/// Slope factor of the contrast curve for a contrast percent.
///
/// ```text
/// k = (contrast + 100) / 100
/// ```
pub fn contrast_slope(contrast_pct: f64) -> f64 {
    (contrast_pct + 100.0) / 100.0
}

/// Logistic S-curve centered on 0.5.
///
/// ```text
/// out = 1 / (1 + e^(−k × (x − 0.5) × 5))
/// ```
///
/// 0.5 is a fixed point for every contrast. At `contrast = -100` the slope is
/// zero and the curve is a flat 0.5.
pub fn contrast_curve(x: f64, contrast_pct: f64) -> f64 {
    apply_contrast_slope(x, contrast_slope(contrast_pct))
}

/// [`contrast_curve`] with the slope already computed.
#[inline]
pub fn apply_contrast_slope(x: f64, k: f64) -> f64 {
    1.0 / (1.0 + (-k * (x - 0.5) * CONTRAST_STEEPNESS).exp())
}

/// Chroma multiplier for combined saturation and vibrance.
///
/// ```text
/// mult = 1 + (saturation + vibrance × 0.5) / 100
/// ```
pub fn saturation_multiplier(saturation_pct: f64, vibrance_pct: f64) -> f64 {
    1.0 + (saturation_pct + vibrance_pct * VIBRANCE_WEIGHT) / 100.0
}

/// Scale each channel's distance from the channel mean.
///
/// ```text
/// avg = (r + g + b) / 3
/// out = avg + (in − avg) × mult
/// ```
pub fn saturation_mix(rgb: DVec3, saturation_pct: f64, vibrance_pct: f64) -> DVec3 {
    apply_saturation_multiplier(rgb, saturation_multiplier(saturation_pct, vibrance_pct))
}

/// [`saturation_mix`] with the multiplier already computed.
#[inline]
pub fn apply_saturation_multiplier(rgb: DVec3, mult: f64) -> DVec3 {
    let avg = (rgb.x + rgb.y + rgb.z) / 3.0;
    DVec3::splat(avg) + (rgb - DVec3::splat(avg)) * mult
}

/// Rec. 709 luma of a gamma-encoded triple.
#[inline]
pub fn rec709_luma(rgb: DVec3) -> f64 {
    rgb.dot(LUMA_REC709)
}
