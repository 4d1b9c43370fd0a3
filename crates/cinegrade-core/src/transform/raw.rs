//! Producer-facing parameter schema and its normalization.
//!
//! Upstream analyzers emit a flat camelCase JSON object. They are not
//! trusted: numbers may arrive as strings, be slightly out of range, or be
//! missing. Validation is best-effort normalize with a hard stop only when a
//! whole required section is absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{GradeError, GradeResult};
use crate::transform::params::{
    ColorGradeModel, ColorGrading, DEFAULT_BLENDING, DetailParameters, GradeWheel, HslBank,
    HslChannel, HslColor, NEUTRAL_TEMPERATURE, PresenceParameters, ToneParameters,
};

/// Accept a JSON number or a numeric string. Anything else reads as absent,
/// including strings that parse to NaN.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|v| !v.is_nan()))
}

/// Hue/sat/lum triple as emitted by the producer, for HSL and wheels alike.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawChannel {
    #[serde(default, deserialize_with = "lenient_number")]
    pub hue: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub lum: Option<f64>,
}

impl RawChannel {
    fn to_hsl(&self) -> HslChannel {
        HslChannel {
            hue: self.hue.unwrap_or(0.0),
            sat: self.sat.unwrap_or(0.0),
            lum: self.lum.unwrap_or(0.0),
        }
    }

    fn to_wheel(&self) -> GradeWheel {
        GradeWheel {
            hue: self.hue.unwrap_or(0.0),
            sat: self.sat.unwrap_or(0.0),
            lum: self.lum.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawHslBank {
    #[serde(default)]
    pub red: Option<RawChannel>,
    #[serde(default)]
    pub orange: Option<RawChannel>,
    #[serde(default)]
    pub yellow: Option<RawChannel>,
    #[serde(default)]
    pub green: Option<RawChannel>,
    #[serde(default)]
    pub aqua: Option<RawChannel>,
    #[serde(default)]
    pub blue: Option<RawChannel>,
    #[serde(default)]
    pub purple: Option<RawChannel>,
    #[serde(default)]
    pub magenta: Option<RawChannel>,
}

impl RawHslBank {
    fn channel(&self, color: HslColor) -> Option<&RawChannel> {
        match color {
            HslColor::Red => self.red.as_ref(),
            HslColor::Orange => self.orange.as_ref(),
            HslColor::Yellow => self.yellow.as_ref(),
            HslColor::Green => self.green.as_ref(),
            HslColor::Aqua => self.aqua.as_ref(),
            HslColor::Blue => self.blue.as_ref(),
            HslColor::Purple => self.purple.as_ref(),
            HslColor::Magenta => self.magenta.as_ref(),
        }
    }

    fn to_bank(&self) -> HslBank {
        let mut bank = HslBank::default();
        for color in HslColor::ALL {
            if let Some(raw) = self.channel(color) {
                *bank.get_mut(color) = raw.to_hsl();
            }
        }
        bank
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawColorGrading {
    #[serde(default)]
    pub shadows: Option<RawChannel>,
    #[serde(default)]
    pub midtones: Option<RawChannel>,
    #[serde(default)]
    pub highlights: Option<RawChannel>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub blending: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub balance: Option<f64>,
}

impl RawColorGrading {
    fn to_grading(&self) -> ColorGrading {
        let wheel = |raw: &Option<RawChannel>| {
            raw.as_ref().map(RawChannel::to_wheel).unwrap_or_default()
        };
        ColorGrading {
            shadows: wheel(&self.shadows),
            midtones: wheel(&self.midtones),
            highlights: wheel(&self.highlights),
            blending: self.blending.unwrap_or(DEFAULT_BLENDING),
            balance: self.balance.unwrap_or(0.0),
        }
    }
}

/// The flat parameter object an analyzer produces.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGradeParams {
    #[serde(default, deserialize_with = "lenient_number")]
    pub exposure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub contrast: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub highlights: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub shadows: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub whites: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub blacks: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tint: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub vibrance: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub saturation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub clarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub dehaze: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub texture: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sharpness: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub noise_reduction: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub color_noise_reduction: Option<f64>,
    #[serde(default)]
    pub hsl: Option<RawHslBank>,
    #[serde(default)]
    pub color_grading: Option<RawColorGrading>,
}

impl RawGradeParams {
    pub fn from_json(json: &str) -> GradeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalize into the canonical model.
    ///
    /// Fails only when `hsl` or `colorGrading` is absent. Missing scalars take
    /// their neutral value and every number is clamped into range.
    pub fn validate(&self) -> GradeResult<ColorGradeModel> {
        let hsl = self.hsl.as_ref().ok_or(GradeError::Shape { field: "hsl" })?;
        let grading = self
            .color_grading
            .as_ref()
            .ok_or(GradeError::Shape { field: "colorGrading" })?;

        let model = ColorGradeModel {
            tone: ToneParameters {
                exposure: self.exposure.unwrap_or(0.0),
                contrast: self.contrast.unwrap_or(0.0),
                highlights: self.highlights.unwrap_or(0.0),
                shadows: self.shadows.unwrap_or(0.0),
                whites: self.whites.unwrap_or(0.0),
                blacks: self.blacks.unwrap_or(0.0),
                temperature: self.temperature.unwrap_or(NEUTRAL_TEMPERATURE),
                tint: self.tint.unwrap_or(0.0),
            },
            presence: PresenceParameters {
                vibrance: self.vibrance.unwrap_or(0.0),
                saturation: self.saturation.unwrap_or(0.0),
                clarity: self.clarity.unwrap_or(0.0),
                dehaze: self.dehaze.unwrap_or(0.0),
                texture: self.texture.unwrap_or(0.0),
            },
            detail: DetailParameters {
                sharpness: self.sharpness.unwrap_or(0.0),
                noise_reduction: self.noise_reduction.unwrap_or(0.0),
                color_noise_reduction: self.color_noise_reduction.unwrap_or(0.0),
            },
            hsl: hsl.to_bank(),
            grading: grading.to_grading(),
        };

        Ok(model.clamped())
    }
}

impl TryFrom<&RawGradeParams> for ColorGradeModel {
    type Error = GradeError;

    fn try_from(raw: &RawGradeParams) -> GradeResult<Self> {
        raw.validate()
    }
}

impl TryFrom<RawGradeParams> for ColorGradeModel {
    type Error = GradeError;

    fn try_from(raw: RawGradeParams) -> GradeResult<Self> {
        raw.validate()
    }
}
