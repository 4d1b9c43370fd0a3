//! Export configuration for the CLI.

use std::path::PathBuf;

use cinegrade_core::transform::lut::DEFAULT_GENERATOR;
use cinegrade_core::{LutConfig, Stages};

/// Default output directory.
const DEFAULT_OUT_DIR: &str = ".";

/// Where and what to write for each grade.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory receiving `<stem>.xmp` and `<stem>.cube`.
    pub out_dir: PathBuf,
    /// Written to the `# Created by` line of each LUT.
    pub generator: String,
    pub write_xmp: bool,
    pub write_cube: bool,
    pub stages: Stages,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: std::env::var_os("CINEGRADE_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            generator: std::env::var("CINEGRADE_GENERATOR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GENERATOR.to_string()),
            write_xmp: true,
            write_cube: true,
            stages: Stages::Full,
        }
    }
}

impl ExportConfig {
    pub fn lut_config(&self) -> LutConfig {
        LutConfig {
            generator: self.generator.clone(),
            metadata: Vec::new(),
            stages: self.stages,
        }
    }
}
