//! Schema validation errors
//!
//! Messages name the entity and the offending field, e.g.
//! `Film validation failed: title is required`.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A document or patch violates its collection schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Document is not a JSON object
    #[error("{entity} validation failed: document must be an object, got {actual}")]
    NotAnObject { entity: String, actual: &'static str },

    /// Required field absent
    #[error("{entity} validation failed: {field} is required")]
    MissingField { entity: String, field: String },

    /// Field not declared by the schema
    #[error("{entity} validation failed: {field} is not a declared field")]
    UnknownField { entity: String, field: String },

    /// Field present with a null value
    #[error("{entity} validation failed: {field} must not be null")]
    NullValue { entity: String, field: String },

    /// Field present with the wrong JSON type
    #[error("{entity} validation failed: {field} must be {expected}, got {actual}")]
    TypeMismatch {
        entity: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Field has the right type but an unacceptable value
    #[error("{entity} validation failed: {field} is invalid ({reason})")]
    InvalidValue {
        entity: String,
        field: String,
        reason: String,
    },

    /// Patch tried to change the primary key
    #[error("{entity} validation failed: _id is immutable")]
    ImmutableId { entity: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = SchemaError::MissingField {
            entity: "Distributor".into(),
            field: "name".into(),
        };
        assert_eq!(
            err.to_string(),
            "Distributor validation failed: name is required"
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = SchemaError::TypeMismatch {
            entity: "Film".into(),
            field: "release_year".into(),
            expected: "int",
            actual: "string",
        };
        let display = err.to_string();
        assert!(display.contains("release_year"));
        assert!(display.contains("int"));
        assert!(display.contains("string"));
    }
}
