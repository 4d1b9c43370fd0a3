//! Export an analyzer result

use std::path::{Path, PathBuf};

use anyhow::Result;
use cinegrade_core::RandomId;

use crate::ExportArgs;
use crate::config::ExportConfig;

pub fn run(args: ExportArgs, verbose: bool) -> Result<()> {
    let config = args.output.to_config();
    let written = export_file(&args.input, args.title.as_deref(), &config)?;

    for path in &written {
        println!("{}", path.display());
    }
    if verbose {
        println!("Done.");
    }
    Ok(())
}

/// Load `input`, optionally retitle it, and write its documents.
pub fn export_file(input: &Path, title: Option<&str>, config: &ExportConfig) -> Result<Vec<PathBuf>> {
    super::ensure_some_output(config)?;

    let mut grade = super::load_grade(input)?;
    if let Some(title) = title {
        grade = grade.renamed(title);
    }
    tracing::debug!("exporting {:?} from {}", grade.name(), input.display());

    super::write_grade(&grade, config, &mut RandomId::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinegrade_core::Stages;
    use std::fs;

    const ANALYSIS: &str = r#"{
        "presetName": "Golden Hour",
        "description": "Warm and soft.",
        "parameters": {
            "exposure": 0.5, "contrast": 12, "temperature": 6400,
            "hsl": {}, "colorGrading": { "highlights": { "hue": 40, "sat": 20, "lum": 0 } }
        }
    }"#;

    fn setup() -> (tempfile::TempDir, PathBuf, ExportConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("analysis.json");
        fs::write(&input, ANALYSIS).unwrap();
        let config = ExportConfig {
            out_dir: dir.path().join("out"),
            generator: "Cinegrade".into(),
            write_xmp: true,
            write_cube: true,
            stages: Stages::Full,
        };
        (dir, input, config)
    }

    #[test]
    fn test_export_writes_named_files() {
        let (_dir, input, config) = setup();
        let written = export_file(&input, None, &config).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("Golden Hour.xmp"));

        let xmp = fs::read_to_string(&written[0]).unwrap();
        assert!(xmp.contains("crs:Exposure2012=\"0.50\""));
        assert!(xmp.contains("crs:Temperature=\"6400\""));
        let cube = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(cube.lines().count(), 4 + 35_937);
    }

    #[test]
    fn test_title_override_and_cube_only() {
        let (_dir, input, mut config) = setup();
        config.write_xmp = false;
        let written = export_file(&input, Some("Dusk / Final"), &config).unwrap();
        assert_eq!(written, vec![config.out_dir.join("Dusk _ Final.cube")]);
        let cube = fs::read_to_string(&written[0]).unwrap();
        assert!(cube.contains("# Title: Dusk / Final\n"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let (dir, _input, config) = setup();
        let err = export_file(&dir.path().join("nope.json"), None, &config).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read:"));
    }
}
