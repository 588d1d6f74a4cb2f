//! Error Types for Diamond Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// A categorical grade string is outside its closed enumeration.
    /// Never defaulted silently: a wrong ordinal code would corrupt the
    /// prediction without any visible failure.
    #[error("Invalid {field} grade: {value:?}")]
    InvalidGrade { field: &'static str, value: String },

    /// A numeric attribute is outside the documented input bounds
    #[error("{field} out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Model artifact missing or malformed. Fatal at startup.
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// Artifact feature schema does not match the encoder's output order
    #[error("Model schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The forest produced an unusable value (non-finite)
    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
