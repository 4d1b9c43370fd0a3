//! End-to-end checks on the two output documents.

use cinegrade_core::library;
use cinegrade_core::{
    ColorGradeModel, FixedId, GradeError, Lut3D, LutConfig, LutSynthesizer, NamedGrade, RandomId,
    Stages, synthesize,
};

const ANALYSIS: &str = r#"{
    "presetName": "Harbor Blue",
    "description": "Cold water, warm lamps.",
    "parameters": {
        "exposure": -0.25, "contrast": 18, "highlights": -22, "shadows": 14,
        "whites": 6, "blacks": -12, "temperature": 4700, "tint": -6,
        "vibrance": 12, "saturation": -8, "clarity": 10, "dehaze": 4, "texture": 3,
        "sharpness": 25, "noiseReduction": 12, "colorNoiseReduction": 20,
        "hsl": {
            "blue": { "hue": -5, "sat": 15, "lum": -10 },
            "orange": { "hue": 4, "sat": 10, "lum": 6 }
        },
        "colorGrading": {
            "shadows": { "hue": 205, "sat": 28, "lum": -6 },
            "midtones": { "hue": 200, "sat": 6, "lum": 0 },
            "highlights": { "hue": 38, "sat": 18, "lum": 2 },
            "blending": 60, "balance": -10
        }
    }
}"#;

fn values(line: &str) -> Vec<f64> {
    line.split(' ').map(|v| v.parse().unwrap()).collect()
}

#[test]
fn library_grade_stays_in_unit_range() {
    // Contrast 40, saturation 0 applied on top of a library look.
    let base = library::find("laika-gothic").unwrap();
    let mut model = *base.grade.model();
    model.tone.contrast = 40.0;
    assert_eq!(model.presence.saturation, 0.0);

    let doc = synthesize(&model, base.grade.name()).unwrap();
    assert_eq!(doc.data_lines().count(), 35_937);
    for line in doc.data_lines() {
        for v in values(line) {
            assert!((0.0..=1.0).contains(&v), "{line}");
        }
    }
}

#[test]
fn every_library_grade_renders() {
    let synthesizer = LutSynthesizer::default();
    for entry in library::all() {
        let xmp = entry.grade.to_xmp(FixedId::new("lib")).unwrap();
        assert!(xmp.as_str().contains(r#"crs:Sharpness=""#), "{}", entry.id);
        let cube = entry.grade.to_cube(&synthesizer).unwrap();
        assert_eq!(cube.data_lines().count(), 35_937, "{}", entry.id);
    }
}

#[test]
fn analysis_json_to_documents() {
    let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
    let xmp = grade.to_xmp(FixedId::new("harbor01")).unwrap();
    let text = xmp.as_str();
    assert!(text.contains("   crs:Exposure2012=\"-0.25\"\n"));
    assert!(text.contains("   crs:Sharpness=\"10\"\n"));
    assert!(text.contains("   crs:HueAdjustmentBlue=\"-5\"\n"));
    assert!(text.contains("   crs:ColorGradeShadowHue=\"205\"\n"));
    assert!(text.contains("   crs:ColorGradeBlending=\"60\"\n"));
    assert!(text.contains("   crs:ColorGradeBalance=\"-10\"\n"));
    assert!(text.contains(">Harbor Blue</rdf:li>"));

    let cube = grade.to_cube(&LutSynthesizer::default()).unwrap();
    assert!(cube.as_str().starts_with("# Created by Cinegrade\n# Title: Harbor Blue\nLUT_3D_SIZE 33\n\n"));
}

#[test]
fn serializations_differ_only_in_uuid() {
    let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
    let mut ids = RandomId::default();
    let a = grade.to_xmp(&mut ids).unwrap();
    let b = grade.to_xmp(&mut ids).unwrap();

    let a_lines: Vec<&str> = a.as_str().lines().collect();
    let b_lines: Vec<&str> = b.as_str().lines().collect();
    assert_eq!(a_lines.len(), b_lines.len());
    let differing: Vec<usize> = (0..a_lines.len())
        .filter(|&i| a_lines[i] != b_lines[i])
        .collect();
    assert_eq!(differing.len(), 1);
    assert!(a_lines[differing[0]].trim_start().starts_with("crs:UUID="));
}

#[test]
fn lut_is_independent_of_thread_count() {
    let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
    let parallel = synthesize(grade.model(), grade.name()).unwrap();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let serial = pool.install(|| synthesize(grade.model(), grade.name()).unwrap());
    assert_eq!(parallel, serial);
}

#[test]
fn synthesis_is_deterministic() {
    let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
    let a = synthesize(grade.model(), "Same").unwrap();
    let b = synthesize(grade.model(), "Same").unwrap();
    assert_eq!(a.as_str(), b.as_str());
}

#[test]
fn written_cube_applies_like_the_grade() {
    let grade = NamedGrade::from_analysis_json(ANALYSIS).unwrap();
    let doc = synthesize(grade.model(), grade.name()).unwrap();
    let lut = Lut3D::from_cube_str(doc.as_str()).unwrap();

    let config = LutConfig {
        stages: Stages::Full,
        ..LutConfig::default()
    };
    let baked = LutSynthesizer::new(config).bake(grade.model()).unwrap();
    let rgb = glam::DVec3::new(0.3, 0.55, 0.8);
    let diff = (lut.apply(rgb) - baked.apply(rgb)).abs().max_element();
    assert!(diff < 1e-6, "diff {diff}");
}

#[test]
fn non_finite_values_fail_both_outputs() {
    let mut model = ColorGradeModel::default();
    model.tone.exposure = f64::NAN;
    assert!(matches!(
        synthesize(&model, "x"),
        Err(GradeError::Domain { field: "exposure", .. })
    ));
    assert!(matches!(
        cinegrade_core::serialize(&model, "x", FixedId::new("u")),
        Err(GradeError::Domain { field: "exposure", .. })
    ));
}
