//! A titled grade: display name, description and validated parameters.

use serde::Deserialize;

use crate::error::{GradeError, GradeResult};
use crate::preset::{IdSource, PresetDocument, quick_summary, serialize};
use crate::transform::lut::{LutDocument, LutSynthesizer};
use crate::transform::params::ColorGradeModel;
use crate::transform::raw::RawGradeParams;

/// Name used when the producer does not supply one.
pub const UNTITLED: &str = "Untitled Grade";

/// Stem used when a name has no usable characters.
const FALLBACK_STEM: &str = "grade";

/// Characters that cannot appear in a file name on common platforms.
const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Top-level object returned by an image analyzer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResult {
    #[serde(default)]
    preset_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<RawGradeParams>,
}

/// Immutable once built. Both output documents are derived from `model`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedGrade {
    name: String,
    description: String,
    model: ColorGradeModel,
}

impl NamedGrade {
    /// Build from a model constructed in code. The model is clamped.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        model: ColorGradeModel,
    ) -> Self {
        Self {
            name: display_name(name.into()),
            description: description.into(),
            model: model.clamped(),
        }
    }

    /// Build from producer parameters, validating them.
    pub fn from_raw(
        name: impl Into<String>,
        description: impl Into<String>,
        raw: &RawGradeParams,
    ) -> GradeResult<Self> {
        let model = raw.validate()?;
        Ok(Self {
            name: display_name(name.into()),
            description: description.into(),
            model,
        })
    }

    /// Parse an analyzer's `{presetName, description, parameters}` object.
    pub fn from_analysis_json(json: &str) -> GradeResult<Self> {
        let result: AnalysisResult = serde_json::from_str(json)?;
        let raw = result
            .parameters
            .ok_or(GradeError::Shape { field: "parameters" })?;
        Self::from_raw(
            result.preset_name.unwrap_or_default(),
            result.description.unwrap_or_default(),
            &raw,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn model(&self) -> &ColorGradeModel {
        &self.model
    }

    /// Same grade under a different display name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: display_name(name.into()),
            ..self.clone()
        }
    }

    /// File-system safe stem derived from the name.
    ///
    /// Reserved and control characters become `_`. Surrounding whitespace
    /// and leading dots are removed.
    pub fn file_stem(&self) -> String {
        file_stem(&self.name)
    }

    pub fn to_xmp(&self, ids: impl IdSource) -> GradeResult<PresetDocument> {
        serialize(&self.model, &self.name, ids)
    }

    pub fn to_cube(&self, synthesizer: &LutSynthesizer) -> GradeResult<LutDocument> {
        synthesizer.synthesize(&self.model, &self.name)
    }

    pub fn summary(&self) -> String {
        quick_summary(&self.name, &self.model)
    }
}

fn display_name(name: String) -> String {
    if name.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        name
    }
}

/// File-system safe stem for an arbitrary display name.
pub fn file_stem(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = replaced.trim().trim_start_matches('.').trim();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::FixedId;

    const ANALYSIS: &str = r#"{
        "presetName": "Teal Night",
        "description": "Cool shadows, warm skin.",
        "parameters": {
            "exposure": -0.3,
            "contrast": "25",
            "temperature": 4800,
            "sharpness": 40,
            "hsl": { "orange": { "sat": -10 } },
            "colorGrading": { "shadows": { "hue": 200, "sat": 30, "lum": -5 } }
        }
    }"#;

    #[test]
    fn test_analysis_json_is_validated() {
        let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
        assert_eq!(grade.name(), "Teal Night");
        assert_eq!(grade.description(), "Cool shadows, warm skin.");
        let model = grade.model();
        assert_eq!(model.tone.contrast, 25.0);
        assert_eq!(model.detail.sharpness, 10.0);
        assert_eq!(model.hsl.orange.sat, -10.0);
        assert_eq!(model.grading.shadows.hue, 200.0);
        assert_eq!(model.grading.blending, 50.0);
    }

    #[test]
    fn test_missing_parameters_is_shape_error() {
        let err = NamedGrade::from_analysis_json(r#"{ "presetName": "Nothing" }"#).unwrap_err();
        assert!(matches!(err, GradeError::Shape { field: "parameters" }));
    }

    #[test]
    fn test_missing_name_and_description() {
        let grade =
            NamedGrade::from_analysis_json(r#"{ "parameters": { "hsl": {}, "colorGrading": {} } }"#)
                .unwrap();
        assert_eq!(grade.name(), UNTITLED);
        assert_eq!(grade.description(), "");
    }

    #[test]
    fn test_new_clamps_model() {
        let mut model = ColorGradeModel::default();
        model.tone.exposure = 9.0;
        let grade = NamedGrade::new("Hot", "", model);
        assert_eq!(grade.model().tone.exposure, 5.0);
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("Teal Night"), "Teal Night");
        assert_eq!(file_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(file_stem("  A: B? <C>  "), "A_ B_ _C_");
        assert_eq!(file_stem("two\nlines"), "two_lines");
        assert_eq!(file_stem(".hidden"), "hidden");
        assert_eq!(file_stem("   "), "grade");
        assert_eq!(file_stem("..."), "grade");
    }

    #[test]
    fn test_documents_use_display_name() {
        let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
        let xmp = grade.to_xmp(FixedId::new("x")).unwrap();
        assert!(xmp.as_str().contains(">Teal Night</rdf:li>"));
        let cube = grade.to_cube(&LutSynthesizer::default()).unwrap();
        assert!(cube.header().contains("# Title: Teal Night\n"));
        assert!(grade.summary().starts_with("CINEGRADE: Teal Night\n"));
    }
}
