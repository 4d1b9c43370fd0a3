//! Per-voxel evaluation of the grading chain.

use glam::DVec3;

use crate::error::GradeResult;
use crate::grading::sliders::{
    apply_contrast_slope, apply_saturation_multiplier, contrast_slope, exposure_scale,
    rec709_luma, saturation_multiplier,
};
use crate::grading::wheels::{blend_offsets, hue_sat_lum_to_offset, three_way_weights};
use crate::grading::white_balance::white_balance_gains;
use crate::transform::params::{ColorGradeModel, GradeWheel};

/// Which stages of the chain run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stages {
    /// Exposure, white balance, contrast, wheels, saturation, clamp.
    #[default]
    Full,
    /// Exposure and the final clamp only; every other stage is identity.
    ExposureOnly,
}

/// Everything the voxel loop needs, derived once per synthesis call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreparedGrade {
    exposure: f64,
    white_balance: DVec3,
    contrast: f64,
    /// Shadows, midtones, highlights.
    wheel_offsets: [DVec3; 3],
    saturation: f64,
    stages: Stages,
}

impl PreparedGrade {
    /// Precompute the per-call constants.
    ///
    /// Rejects models containing NaN or infinite values.
    pub fn new(model: &ColorGradeModel, stages: Stages) -> GradeResult<Self> {
        model.check_finite()?;

        let tone = &model.tone;
        let grading = &model.grading;
        let offset = |wheel: &GradeWheel| hue_sat_lum_to_offset(wheel.hue, wheel.sat, wheel.lum);

        Ok(Self {
            exposure: exposure_scale(tone.exposure),
            white_balance: white_balance_gains(tone.temperature, tone.tint),
            contrast: contrast_slope(tone.contrast),
            wheel_offsets: [
                offset(&grading.shadows),
                offset(&grading.midtones),
                offset(&grading.highlights),
            ],
            saturation: saturation_multiplier(
                model.presence.saturation,
                model.presence.vibrance,
            ),
            stages,
        })
    }

    pub fn stages(&self) -> Stages {
        self.stages
    }
}

/// Applies the grading chain to one normalized RGB triple:
/// 1. Exposure scale
/// 2. White balance gains
/// 3. Contrast sigmoid, per channel
/// 4. Three-way wheel blend weighted by post-contrast luma
/// 5. Saturation/vibrance mix
/// 6. Clamp to `[0, 1]`
pub fn evaluate_transform(rgb: DVec3, grade: &PreparedGrade) -> DVec3 {
    let mut c = rgb * grade.exposure;

    if grade.stages == Stages::Full {
        c *= grade.white_balance;

        let k = grade.contrast;
        c = DVec3::new(
            apply_contrast_slope(c.x, k),
            apply_contrast_slope(c.y, k),
            apply_contrast_slope(c.z, k),
        );

        let weights = three_way_weights(rec709_luma(c));
        c += blend_offsets(weights, &grade.wheel_offsets);

        c = apply_saturation_multiplier(c, grade.saturation);
    }

    c.clamp(DVec3::ZERO, DVec3::ONE)
}
