//! Canonical parameter model for one color grade.
//!
//! `ColorGradeModel` is the single source of truth consumed by both output
//! paths. Every field is already inside its documented range; the raw
//! producer schema in [`crate::transform::raw`] is normalized into this type.

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, GradeResult};

/// Neutral white-balance temperature. The white-balance stage is identity here.
pub const NEUTRAL_TEMPERATURE: f64 = 5000.0;

/// Default blend between the three grading wheels.
pub const DEFAULT_BLENDING: f64 = 50.0;

/// Hard ceiling for sharpness in every emitted preset.
pub const MAX_SHARPNESS: f64 = 10.0;

pub(crate) const EXPOSURE_RANGE: (f64, f64) = (-5.0, 5.0);
pub(crate) const PERCENT_RANGE: (f64, f64) = (-100.0, 100.0);
pub(crate) const UNSIGNED_PERCENT_RANGE: (f64, f64) = (0.0, 100.0);
pub(crate) const TEMPERATURE_RANGE: (f64, f64) = (2000.0, 50000.0);
pub(crate) const TINT_RANGE: (f64, f64) = (-150.0, 150.0);

/// Clamp `value` into `[min, max]`, logging when the value was changed.
///
/// NaN is returned untouched so that output stages can reject it.
pub(crate) fn clamp_field(field: &'static str, value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        return value;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::debug!("clamped {field} from {value} to {clamped}");
    }
    clamped
}

/// Wrap an absolute hue angle into `[0, 360)`.
pub(crate) fn wrap_hue(field: &'static str, degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return degrees;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    let wrapped = if wrapped >= 360.0 { 0.0 } else { wrapped };
    if wrapped != degrees {
        tracing::debug!("wrapped {field} from {degrees} to {wrapped}");
    }
    wrapped
}

/// Basic tone and white balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneParameters {
    /// Exposure in stops, `[-5, 5]`.
    pub exposure: f64,
    /// Percent, `[-100, 100]`.
    pub contrast: f64,
    /// Recovers or lifts the brightest tones, `[-100, 100]`.
    pub highlights: f64,
    /// Lifts or crushes the darkest tones, `[-100, 100]`.
    pub shadows: f64,
    /// White clipping point, `[-100, 100]`.
    pub whites: f64,
    /// Black clipping point, `[-100, 100]`.
    pub blacks: f64,
    /// Kelvin, `[2000, 50000]`.
    pub temperature: f64,
    /// Green/magenta, `[-150, 150]`.
    pub tint: f64,
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self {
            exposure: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            whites: 0.0,
            blacks: 0.0,
            temperature: NEUTRAL_TEMPERATURE,
            tint: 0.0,
        }
    }
}

impl ToneParameters {
    pub fn clamped(&self) -> Self {
        Self {
            exposure: clamp_field("exposure", self.exposure, EXPOSURE_RANGE),
            contrast: clamp_field("contrast", self.contrast, PERCENT_RANGE),
            highlights: clamp_field("highlights", self.highlights, PERCENT_RANGE),
            shadows: clamp_field("shadows", self.shadows, PERCENT_RANGE),
            whites: clamp_field("whites", self.whites, PERCENT_RANGE),
            blacks: clamp_field("blacks", self.blacks, PERCENT_RANGE),
            temperature: clamp_field("temperature", self.temperature, TEMPERATURE_RANGE),
            tint: clamp_field("tint", self.tint, TINT_RANGE),
        }
    }
}

/// Presence sliders, each percent in `[-100, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceParameters {
    /// Saturation weighted towards muted colors.
    pub vibrance: f64,
    /// Uniform saturation.
    pub saturation: f64,
    /// Midtone local contrast.
    pub clarity: f64,
    /// Atmospheric haze removal.
    pub dehaze: f64,
    /// Fine-detail contrast.
    pub texture: f64,
}

impl PresenceParameters {
    pub fn clamped(&self) -> Self {
        Self {
            vibrance: clamp_field("vibrance", self.vibrance, PERCENT_RANGE),
            saturation: clamp_field("saturation", self.saturation, PERCENT_RANGE),
            clarity: clamp_field("clarity", self.clarity, PERCENT_RANGE),
            dehaze: clamp_field("dehaze", self.dehaze, PERCENT_RANGE),
            texture: clamp_field("texture", self.texture, PERCENT_RANGE),
        }
    }
}

/// Detail controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailParameters {
    /// `[0, 10]`. Always clamped, see [`MAX_SHARPNESS`].
    pub sharpness: f64,
    /// Luminance smoothing, `[0, 100]`.
    pub noise_reduction: f64,
    /// Chroma noise reduction, `[0, 100]`.
    pub color_noise_reduction: f64,
}

impl DetailParameters {
    pub fn clamped(&self) -> Self {
        Self {
            sharpness: clamp_sharpness(self.sharpness),
            noise_reduction: clamp_field(
                "noiseReduction",
                self.noise_reduction,
                UNSIGNED_PERCENT_RANGE,
            ),
            color_noise_reduction: clamp_field(
                "colorNoiseReduction",
                self.color_noise_reduction,
                UNSIGNED_PERCENT_RANGE,
            ),
        }
    }
}

/// Sharpness above [`MAX_SHARPNESS`] produces halo artifacts in the editor.
///
/// Unlike other fields, NaN becomes 0 so the cap holds for every model.
fn clamp_sharpness(value: f64) -> f64 {
    if value.is_nan() {
        tracing::warn!("sharpness is NaN, reset to 0");
        return 0.0;
    }
    let clamped = value.clamp(0.0, MAX_SHARPNESS);
    if clamped < value {
        tracing::warn!("sharpness {value} exceeds {MAX_SHARPNESS}, clamped");
    } else if clamped != value {
        tracing::debug!("clamped sharpness from {value} to {clamped}");
    }
    clamped
}

/// Relative hue/saturation/luminance shift for one HSL color range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HslChannel {
    /// Hue shift, `[-100, 100]`.
    pub hue: f64,
    /// Saturation shift, `[-100, 100]`.
    pub sat: f64,
    /// Luminance shift, `[-100, 100]`.
    pub lum: f64,
}

impl HslChannel {
    fn clamped(&self, names: [&'static str; 3]) -> Self {
        Self {
            hue: clamp_field(names[0], self.hue, PERCENT_RANGE),
            sat: clamp_field(names[1], self.sat, PERCENT_RANGE),
            lum: clamp_field(names[2], self.lum, PERCENT_RANGE),
        }
    }
}

/// The eight Camera Raw HSL color ranges, in editor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslColor {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HslColor {
    pub const ALL: [HslColor; 8] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Aqua,
        Self::Blue,
        Self::Purple,
        Self::Magenta,
    ];

    /// Capitalized name as used in Camera Raw attribute names.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Aqua => "Aqua",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Magenta => "Magenta",
        }
    }

    /// Dotted paths of the hue, sat and lum fields, for diagnostics.
    const fn field_names(self) -> [&'static str; 3] {
        match self {
            Self::Red => ["hsl.red.hue", "hsl.red.sat", "hsl.red.lum"],
            Self::Orange => ["hsl.orange.hue", "hsl.orange.sat", "hsl.orange.lum"],
            Self::Yellow => ["hsl.yellow.hue", "hsl.yellow.sat", "hsl.yellow.lum"],
            Self::Green => ["hsl.green.hue", "hsl.green.sat", "hsl.green.lum"],
            Self::Aqua => ["hsl.aqua.hue", "hsl.aqua.sat", "hsl.aqua.lum"],
            Self::Blue => ["hsl.blue.hue", "hsl.blue.sat", "hsl.blue.lum"],
            Self::Purple => ["hsl.purple.hue", "hsl.purple.sat", "hsl.purple.lum"],
            Self::Magenta => ["hsl.magenta.hue", "hsl.magenta.sat", "hsl.magenta.lum"],
        }
    }
}

/// All eight HSL channels. Never sparse: an untouched range is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HslBank {
    /// Red range.
    pub red: HslChannel,
    /// Orange range, skin tones.
    pub orange: HslChannel,
    /// Yellow range.
    pub yellow: HslChannel,
    /// Green range, foliage.
    pub green: HslChannel,
    /// Aqua range.
    pub aqua: HslChannel,
    /// Blue range, sky and water.
    pub blue: HslChannel,
    /// Purple range.
    pub purple: HslChannel,
    /// Magenta range.
    pub magenta: HslChannel,
}

impl HslBank {
    pub fn get(&self, color: HslColor) -> &HslChannel {
        match color {
            HslColor::Red => &self.red,
            HslColor::Orange => &self.orange,
            HslColor::Yellow => &self.yellow,
            HslColor::Green => &self.green,
            HslColor::Aqua => &self.aqua,
            HslColor::Blue => &self.blue,
            HslColor::Purple => &self.purple,
            HslColor::Magenta => &self.magenta,
        }
    }

    pub fn get_mut(&mut self, color: HslColor) -> &mut HslChannel {
        match color {
            HslColor::Red => &mut self.red,
            HslColor::Orange => &mut self.orange,
            HslColor::Yellow => &mut self.yellow,
            HslColor::Green => &mut self.green,
            HslColor::Aqua => &mut self.aqua,
            HslColor::Blue => &mut self.blue,
            HslColor::Purple => &mut self.purple,
            HslColor::Magenta => &mut self.magenta,
        }
    }

    /// Channels paired with their color, in editor order.
    pub fn iter(&self) -> impl Iterator<Item = (HslColor, &HslChannel)> {
        HslColor::ALL.into_iter().map(move |color| (color, self.get(color)))
    }

    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for color in HslColor::ALL {
            let channel = out.get_mut(color);
            *channel = channel.clamped(color.field_names());
        }
        out
    }
}

/// One three-way grading wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeWheel {
    /// Absolute hue angle in degrees, `[0, 360)`.
    pub hue: f64,
    /// `[0, 100]`.
    pub sat: f64,
    /// `[-100, 100]`.
    pub lum: f64,
}

impl GradeWheel {
    fn clamped(&self, names: [&'static str; 3]) -> Self {
        Self {
            hue: wrap_hue(names[0], self.hue),
            sat: clamp_field(names[1], self.sat, UNSIGNED_PERCENT_RANGE),
            lum: clamp_field(names[2], self.lum, PERCENT_RANGE),
        }
    }
}

/// Shadow/midtone/highlight wheels plus their blend controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorGrading {
    /// Tint for the darkest tones.
    pub shadows: GradeWheel,
    /// Tint for the middle tones.
    pub midtones: GradeWheel,
    /// Tint for the brightest tones.
    pub highlights: GradeWheel,
    /// `[0, 100]`. Default 50.
    pub blending: f64,
    /// `[-100, 100]`.
    pub balance: f64,
}

impl Default for ColorGrading {
    fn default() -> Self {
        Self {
            shadows: GradeWheel::default(),
            midtones: GradeWheel::default(),
            highlights: GradeWheel::default(),
            blending: DEFAULT_BLENDING,
            balance: 0.0,
        }
    }
}

impl ColorGrading {
    pub fn clamped(&self) -> Self {
        Self {
            shadows: self.shadows.clamped(WHEEL_FIELDS[0]),
            midtones: self.midtones.clamped(WHEEL_FIELDS[1]),
            highlights: self.highlights.clamped(WHEEL_FIELDS[2]),
            blending: clamp_field("colorGrading.blending", self.blending, UNSIGNED_PERCENT_RANGE),
            balance: clamp_field("colorGrading.balance", self.balance, PERCENT_RANGE),
        }
    }
}

/// The complete set of editing parameters describing one look.
///
/// `Default` is the neutral grade: exposure 0, temperature 5000 K, every
/// slider and wheel at zero, blending 50.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorGradeModel {
    /// Exposure, tone sliders and white balance.
    pub tone: ToneParameters,
    /// Saturation, vibrance and local contrast.
    pub presence: PresenceParameters,
    /// Sharpening and noise reduction.
    pub detail: DetailParameters,
    /// Per-color hue/saturation/luminance shifts.
    pub hsl: HslBank,
    /// Three-way color wheels.
    pub grading: ColorGrading,
}

impl ColorGradeModel {
    /// Normalized copy with every field inside its range.
    pub fn clamped(&self) -> Self {
        Self {
            tone: self.tone.clamped(),
            presence: self.presence.clamped(),
            detail: self.detail.clamped(),
            hsl: self.hsl.clamped(),
            grading: self.grading.clamped(),
        }
    }

    /// Visit every numeric field with its dotted path, in document order.
    pub fn for_each_field(&self, mut visit: impl FnMut(&'static str, f64)) {
        let t = &self.tone;
        visit("exposure", t.exposure);
        visit("contrast", t.contrast);
        visit("highlights", t.highlights);
        visit("shadows", t.shadows);
        visit("whites", t.whites);
        visit("blacks", t.blacks);
        visit("temperature", t.temperature);
        visit("tint", t.tint);

        let p = &self.presence;
        visit("vibrance", p.vibrance);
        visit("saturation", p.saturation);
        visit("clarity", p.clarity);
        visit("dehaze", p.dehaze);
        visit("texture", p.texture);

        let d = &self.detail;
        visit("sharpness", d.sharpness);
        visit("noiseReduction", d.noise_reduction);
        visit("colorNoiseReduction", d.color_noise_reduction);

        for (color, channel) in self.hsl.iter() {
            let [hue, sat, lum] = color.field_names();
            visit(hue, channel.hue);
            visit(sat, channel.sat);
            visit(lum, channel.lum);
        }

        let g = &self.grading;
        for (wheel, [hue, sat, lum]) in [&g.shadows, &g.midtones, &g.highlights]
            .into_iter()
            .zip(WHEEL_FIELDS)
        {
            visit(hue, wheel.hue);
            visit(sat, wheel.sat);
            visit(lum, wheel.lum);
        }
        visit("colorGrading.blending", g.blending);
        visit("colorGrading.balance", g.balance);
    }

    /// Fails with [`GradeError::Domain`] on the first NaN or infinite field.
    pub fn check_finite(&self) -> GradeResult<()> {
        let mut first: Option<(&'static str, f64)> = None;
        self.for_each_field(|field, value| {
            if first.is_none() && !value.is_finite() {
                first = Some((field, value));
            }
        });
        match first {
            Some((field, value)) => Err(GradeError::Domain { field, value }),
            None => Ok(()),
        }
    }
}

/// Shadows, midtones, highlights.
const WHEEL_FIELDS: [[&str; 3]; 3] = [
    [
        "colorGrading.shadows.hue",
        "colorGrading.shadows.sat",
        "colorGrading.shadows.lum",
    ],
    [
        "colorGrading.midtones.hue",
        "colorGrading.midtones.sat",
        "colorGrading.midtones.lum",
    ],
    [
        "colorGrading.highlights.hue",
        "colorGrading.highlights.sat",
        "colorGrading.highlights.lum",
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let model = ColorGradeModel::default();
        assert_eq!(model.tone.temperature, NEUTRAL_TEMPERATURE);
        assert_eq!(model.grading.blending, DEFAULT_BLENDING);
        assert_eq!(model.grading.balance, 0.0);
        assert_eq!(model.clamped(), model, "neutral grade is already in range");
    }

    #[test]
    fn test_sharpness_always_capped_at_ten() {
        for raw in [10.5, 11.0, 1000.0, f64::INFINITY] {
            let mut model = ColorGradeModel::default();
            model.detail.sharpness = raw;
            let clamped = model.clamped();
            assert_eq!(clamped.detail.sharpness, MAX_SHARPNESS, "input {raw}");
        }
    }

    #[test]
    fn test_nan_sharpness_resets_to_zero() {
        let mut model = ColorGradeModel::default();
        model.detail.sharpness = f64::NAN;
        let clamped = model.clamped();
        assert_eq!(clamped.detail.sharpness, 0.0);
        assert!(clamped.check_finite().is_ok());
    }

    #[test]
    fn test_out_of_range_values_are_clamped_not_rejected() {
        let mut model = ColorGradeModel::default();
        model.tone.exposure = 7.5;
        model.tone.temperature = 100.0;
        model.tone.tint = -400.0;
        model.presence.vibrance = 250.0;
        model.hsl.blue.sat = -180.0;
        model.grading.shadows.sat = 120.0;
        model.grading.blending = -3.0;

        let clamped = model.clamped();
        assert_eq!(clamped.tone.exposure, 5.0);
        assert_eq!(clamped.tone.temperature, 2000.0);
        assert_eq!(clamped.tone.tint, -150.0);
        assert_eq!(clamped.presence.vibrance, 100.0);
        assert_eq!(clamped.hsl.blue.sat, -100.0);
        assert_eq!(clamped.grading.shadows.sat, 100.0);
        assert_eq!(clamped.grading.blending, 0.0);
    }

    #[test]
    fn test_wheel_hue_wraps_into_circle() {
        let mut model = ColorGradeModel::default();
        model.grading.highlights.hue = 370.0;
        model.grading.midtones.hue = -30.0;
        model.grading.shadows.hue = 360.0;
        let clamped = model.clamped();
        assert!((clamped.grading.highlights.hue - 10.0).abs() < 1e-9);
        assert!((clamped.grading.midtones.hue - 330.0).abs() < 1e-9);
        assert_eq!(clamped.grading.shadows.hue, 0.0);
    }

    #[test]
    fn test_nan_survives_clamping_and_is_reported() {
        let mut model = ColorGradeModel::default();
        model.hsl.aqua.lum = f64::NAN;
        let clamped = model.clamped();
        assert!(clamped.hsl.aqua.lum.is_nan());

        match clamped.check_finite() {
            Err(GradeError::Domain { field, .. }) => assert_eq!(field, "hsl.aqua.lum"),
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[test]
    fn test_field_visitor_covers_every_parameter() {
        let mut count = 0;
        ColorGradeModel::default().for_each_field(|_, _| count += 1);
        // 8 tone + 5 presence + 3 detail + 24 hsl + 9 wheel + blending + balance
        assert_eq!(count, 51);
    }

    #[test]
    fn test_hsl_iter_is_in_editor_order() {
        let bank = HslBank::default();
        let labels: Vec<_> = bank.iter().map(|(color, _)| color.label()).collect();
        assert_eq!(
            labels,
            ["Red", "Orange", "Yellow", "Green", "Aqua", "Blue", "Purple", "Magenta"]
        );
    }
}
