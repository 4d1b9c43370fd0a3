//! Cinegrade Core: color-grade parameters to editor documents.
//!
//! A grade is a set of photographic editing parameters. This crate
//! validates them into a canonical [`ColorGradeModel`] and renders that
//! model into a Camera Raw XMP preset and a 33³ `.cube` LUT. No I/O.

pub mod error;
pub mod format;
pub mod grade;
pub mod grading;
pub mod library;
pub mod preset;
pub mod transform;

// Re-exports for convenience.
pub use error::{GradeError, GradeResult};
pub use grade::NamedGrade;
pub use preset::{FixedId, IdSource, PresetDocument, RandomId, quick_summary, serialize};
pub use transform::evaluate::{PreparedGrade, Stages, evaluate_transform};
pub use transform::lut::{CUBE_SIZE, Lut3D, LutConfig, LutDocument, LutSynthesizer, synthesize};
pub use transform::params::ColorGradeModel;
pub use transform::raw::RawGradeParams;
