//! Plain-text summary suitable for pasting into a message.

use crate::transform::params::ColorGradeModel;

/// Shortest decimal text for a parameter value, without `-0`.
fn plain(value: f64) -> String {
    format!("{}", value + 0.0)
}

/// Five-line summary: name, exposure, contrast, temperature and wheel hues.
///
/// ```text
/// CINEGRADE: Teal Night
/// Exp: -0.3
/// Cont: 25
/// Temp: 4800
/// Grading: S:200 M:0 H:35
/// ```
pub fn quick_summary(name: &str, model: &ColorGradeModel) -> String {
    let tone = &model.tone;
    let grading = &model.grading;
    format!(
        "CINEGRADE: {name}\nExp: {}\nCont: {}\nTemp: {}\nGrading: S:{} M:{} H:{}",
        plain(tone.exposure),
        plain(tone.contrast),
        plain(tone.temperature),
        plain(grading.shadows.hue),
        plain(grading.midtones.hue),
        plain(grading.highlights.hue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_layout() {
        let mut model = ColorGradeModel::default();
        model.tone.exposure = -0.3;
        model.tone.contrast = 25.0;
        model.tone.temperature = 4800.0;
        model.grading.shadows.hue = 200.0;
        model.grading.highlights.hue = 35.0;
        assert_eq!(
            quick_summary("Teal Night", &model),
            "CINEGRADE: Teal Night\nExp: -0.3\nCont: 25\nTemp: 4800\nGrading: S:200 M:0 H:35"
        );
    }

    #[test]
    fn test_negative_zero_prints_plain() {
        let mut model = ColorGradeModel::default();
        model.tone.exposure = -0.0;
        assert!(quick_summary("Zero", &model).contains("\nExp: 0\n"));
    }
}
