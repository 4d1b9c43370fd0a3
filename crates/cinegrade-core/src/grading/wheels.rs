//! Three-way (shadows/midtones/highlights) color wheels.
//!
//! Each wheel is turned into an additive RGB offset by splitting its hue
//! into three phases 120° apart. Offsets are then blended per pixel by
//! luminance weights.
//!
//! # Formula
//! ```text
//!   s = sat / 100,  l = lum / 100,  h = hue in radians
//!   dr = cos(h)        × s + l
//!   dg = cos(h − 2π/3) × s + l
//!   db = cos(h − 4π/3) × s + l
//!
//!   w_shadow    = (1 − luma)²
//!   w_highlight = luma²
//!   w_mid       = 1 − w_shadow − w_highlight
//!
//!   out = in + (dS × w_shadow + dM × w_mid + dH × w_highlight) × 0.2
//! ```
//!
//! This is a stylization model, not a colorimetric one.

use std::f64::consts::PI;

use glam::DVec3;

/// Attenuation applied to the blended wheel offset.
pub const GRADING_STRENGTH: f64 = 0.2;

const THIRD_TURN: f64 = 2.0 * PI / 3.0;

/// Convert a wheel's hue/sat/lum into an RGB offset.
pub fn hue_sat_lum_to_offset(hue_deg: f64, sat_pct: f64, lum_pct: f64) -> DVec3 {
    let h = hue_deg * PI / 180.0;
    let s = sat_pct / 100.0;
    let l = lum_pct / 100.0;
    DVec3::new(
        h.cos() * s + l,
        (h - THIRD_TURN).cos() * s + l,
        (h - 2.0 * THIRD_TURN).cos() * s + l,
    )
}

/// Per-pixel weights of the three wheels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneWeights {
    pub shadows: f64,
    pub midtones: f64,
    pub highlights: f64,
}

/// Luminance-driven weights. All three lie in `[0, 1]` for `luma ∈ [0, 1]`.
#[inline]
pub fn three_way_weights(luma: f64) -> ToneWeights {
    let shadows = (1.0 - luma) * (1.0 - luma);
    let highlights = luma * luma;
    ToneWeights {
        shadows,
        midtones: 1.0 - shadows - highlights,
        highlights,
    }
}

/// Weighted sum of the three wheel offsets, attenuated by [`GRADING_STRENGTH`].
#[inline]
pub fn blend_offsets(weights: ToneWeights, offsets: &[DVec3; 3]) -> DVec3 {
    (offsets[0] * weights.shadows
        + offsets[1] * weights.midtones
        + offsets[2] * weights.highlights)
        * GRADING_STRENGTH
}
