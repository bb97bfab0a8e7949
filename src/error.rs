//! Error types for mdschema.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Violations found in documents are not errors; they are collected and
//! reported. These variants cover the failures that stop a run.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for mdschema operations.
#[derive(Error, Debug)]
pub enum MdschemaError {
    /// User provided invalid arguments or input that cannot be processed.
    #[error("{0}")]
    UserError(String),

    /// The schema file could not be parsed or contains invalid patterns.
    #[error("Invalid schema: {0}")]
    SchemaError(String),

    /// One or more documents violated the schema.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl MdschemaError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MdschemaError::UserError(_) => exit_codes::USER_ERROR,
            MdschemaError::SchemaError(_) => exit_codes::USER_ERROR,
            MdschemaError::IoError(_) => exit_codes::USER_ERROR,
            MdschemaError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
        }
    }
}

/// Result type alias for mdschema operations.
pub type Result<T> = std::result::Result<T, MdschemaError>;
