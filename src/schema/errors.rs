//! Schema error types
//!
//! Error codes:
//! - SCHEMA_DUPLICATE_FIELD
//! - SCHEMA_MISSING_OPTIONS
//! - SCHEMA_LOAD_FAILED

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building or loading a field schema registry
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two entries share the same field identifier
    #[error("duplicate field '{0}' in schema")]
    DuplicateField(String),

    /// Select field declared without its option list
    #[error("field '{field}' of type '{field_type}' requires options")]
    MissingOptions {
        field: String,
        field_type: &'static str,
    },

    /// Schema file could not be read or parsed
    #[error("failed to load schema from {path}: {reason}")]
    LoadFailed { path: String, reason: String },
}

impl SchemaError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::DuplicateField(_) => "SCHEMA_DUPLICATE_FIELD",
            SchemaError::MissingOptions { .. } => "SCHEMA_MISSING_OPTIONS",
            SchemaError::LoadFailed { .. } => "SCHEMA_LOAD_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaError::DuplicateField("name".into()).code(),
            "SCHEMA_DUPLICATE_FIELD"
        );
        let err = SchemaError::MissingOptions {
            field: "skills".into(),
            field_type: "multiSelect",
        };
        assert_eq!(err.code(), "SCHEMA_MISSING_OPTIONS");
        assert!(err.to_string().contains("skills"));
    }
}
