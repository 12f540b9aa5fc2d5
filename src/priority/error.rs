//! Compilation errors

use thiserror::Error;

/// Section name used to prefix attribute paths in error messages
pub const SECTION: &str = "priority";

/// Errors that abort compilation of a model specification
///
/// Evaluation never fails; every error is raised before an evaluator exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("priority: unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("priority.{attribute}: unsupported pattern '{pattern}', {reason}")]
    UnsupportedPattern {
        attribute: String,
        pattern: String,
        reason: String,
    },

    #[error("{}", out_of_range(.attribute, .value))]
    OutOfRangeFactor { attribute: String, value: f64 },

    #[error("priority.{attribute}: factor for '{pattern}' must be a number, was {value}")]
    InvalidFactor {
        attribute: String,
        pattern: String,
        value: String,
    },
}

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

fn out_of_range(attribute: &str, value: &f64) -> String {
    if *value > 1.0 {
        format!("{}.{} cannot be bigger than 1.0, was {:?}", SECTION, attribute, value)
    } else {
        format!("{}.{} cannot be smaller than 0.0, was {:?}", SECTION, attribute, value)
    }
}
