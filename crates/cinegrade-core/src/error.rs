//! Error taxonomy for the grade engine.

/// Errors surfaced by validation, synthesis, and serialization.
///
/// Out-of-range but finite numbers are never an error; they are clamped
/// during validation.
#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    /// A required sub-object was missing from producer input.
    #[error("missing required section `{field}`")]
    Shape { field: &'static str },

    /// A non-finite value reached an output stage.
    #[error("`{field}` is not finite ({value})")]
    Domain { field: &'static str, value: f64 },

    #[error("malformed grade JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid .cube data: {0}")]
    Cube(String),
}

pub type GradeResult<T> = Result<T, GradeError>;
