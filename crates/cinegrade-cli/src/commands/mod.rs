//! CLI command implementations

pub mod export;
pub mod library;
pub mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cinegrade_core::{IdSource, LutSynthesizer, NamedGrade};

use crate::config::ExportConfig;

/// Read an analyzer JSON file into a grade.
pub fn load_grade(path: &Path) -> Result<NamedGrade> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    NamedGrade::from_analysis_json(&json)
        .with_context(|| format!("Invalid grade: {}", path.display()))
}

/// Fails when the switches leave nothing to write.
pub fn ensure_some_output(config: &ExportConfig) -> Result<()> {
    if !config.write_xmp && !config.write_cube {
        bail!("Nothing to export: both --no-xmp and --no-cube were given");
    }
    Ok(())
}

/// Write the enabled documents for `grade` and return their paths.
///
/// Both documents are rendered before anything touches the disk.
pub fn write_grade(
    grade: &NamedGrade,
    config: &ExportConfig,
    ids: &mut impl IdSource,
) -> Result<Vec<PathBuf>> {
    let stem = grade.file_stem();

    let xmp = if config.write_xmp {
        Some(
            grade
                .to_xmp(&mut *ids)
                .with_context(|| format!("Failed to build preset for {:?}", grade.name()))?,
        )
    } else {
        None
    };
    let cube = if config.write_cube {
        let synthesizer = LutSynthesizer::new(config.lut_config());
        Some(
            grade
                .to_cube(&synthesizer)
                .with_context(|| format!("Failed to build LUT for {:?}", grade.name()))?,
        )
    } else {
        None
    };

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("Failed to create: {}", config.out_dir.display()))?;

    let mut written = Vec::new();
    if let Some(doc) = xmp {
        let path = config.out_dir.join(format!("{stem}.xmp"));
        save(&path, doc.as_str())?;
        written.push(path);
    }
    if let Some(doc) = cube {
        let path = config.out_dir.join(format!("{stem}.cube"));
        save(&path, doc.as_str())?;
        written.push(path);
    }
    Ok(written)
}

fn save(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to save: {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinegrade_core::{ColorGradeModel, FixedId, Stages};

    fn config_in(dir: &Path) -> ExportConfig {
        ExportConfig {
            out_dir: dir.to_path_buf(),
            generator: "Test".into(),
            write_xmp: true,
            write_cube: true,
            stages: Stages::Full,
        }
    }

    #[test]
    fn test_write_grade_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let grade = NamedGrade::new("Night: Shift", "", ColorGradeModel::default());

        let written = write_grade(&grade, &config_in(&out), &mut FixedId::new("id")).unwrap();
        assert_eq!(written, vec![out.join("Night_ Shift.xmp"), out.join("Night_ Shift.cube")]);

        let xmp = fs::read_to_string(&written[0]).unwrap();
        assert!(xmp.contains("crs:UUID=\"id\""));
        let cube = fs::read_to_string(&written[1]).unwrap();
        assert!(cube.starts_with("# Created by Test\n# Title: Night: Shift\n"));
    }

    #[test]
    fn test_non_finite_grade_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = ColorGradeModel::default();
        model.tone.contrast = f64::NAN;
        let grade = NamedGrade::new("Broken", "", model);

        assert!(write_grade(&grade, &config_in(dir.path()), &mut FixedId::new("id")).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_nothing_to_export_is_an_error() {
        let mut config = config_in(Path::new("."));
        config.write_xmp = false;
        config.write_cube = false;
        assert!(ensure_some_output(&config).is_err());
        config.write_cube = true;
        assert!(ensure_some_output(&config).is_ok());
    }

    #[test]
    fn test_load_grade_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "presetName": "x" }"#).unwrap();
        let err = load_grade(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing required section `parameters`"));
    }
}
