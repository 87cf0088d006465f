//! Schema validator for documents and merge patches
//!
//! Validation semantics:
//! - `_id` is present and matches the collection's id kind
//! - All required fields are present
//! - No undeclared fields exist
//! - No null values
//! - Field types match exactly (ints are accepted where floats are declared)
//!
//! The validator never mutates documents.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldType, IdKind, Schema};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// Enforces a collection schema on documents.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a complete document, as stored.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, checking `_id` first and then the
    /// declared fields in name order.
    pub fn validate_document(&self, document: &Value) -> SchemaResult<()> {
        let obj = document.as_object().ok_or_else(|| SchemaError::NotAnObject {
            entity: self.schema.entity.clone(),
            actual: json_type_name(document),
        })?;

        match obj.get("_id") {
            None | Some(Value::Null) => return Err(self.missing("_id")),
            Some(id) => self.validate_id(id)?,
        }

        self.reject_unknown(obj)?;

        for (name, def) in &self.schema.fields {
            match obj.get(name) {
                Some(value) => self.validate_value(name, value, def.field_type)?,
                None if def.required => return Err(self.missing(name)),
                None => {}
            }
        }

        Ok(())
    }

    /// Validates a merge patch: only the present fields are checked.
    ///
    /// # Errors
    ///
    /// Returns `ImmutableId` if the patch carries `_id`.
    pub fn validate_patch(&self, patch: &Map<String, Value>) -> SchemaResult<()> {
        if patch.contains_key("_id") {
            return Err(SchemaError::ImmutableId {
                entity: self.schema.entity.clone(),
            });
        }

        self.reject_unknown(patch)?;

        for (name, value) in patch {
            if let Some(def) = self.schema.fields.get(name) {
                self.validate_value(name, value, def.field_type)?;
            }
        }

        Ok(())
    }

    /// Validates a primary key value against the collection's id kind.
    pub fn validate_id(&self, id: &Value) -> SchemaResult<()> {
        let ok = match self.schema.id_kind {
            IdKind::Text => id.as_str().is_some_and(|s| !s.is_empty()),
            IdKind::Int => id.is_i64(),
        };
        if ok {
            Ok(())
        } else {
            Err(SchemaError::TypeMismatch {
                entity: self.schema.entity.clone(),
                field: "_id".into(),
                expected: self.schema.id_kind.type_name(),
                actual: json_type_name(id),
            })
        }
    }

    fn reject_unknown(&self, obj: &Map<String, Value>) -> SchemaResult<()> {
        match obj
            .keys()
            .find(|key| key.as_str() != "_id" && !self.schema.fields.contains_key(*key))
        {
            Some(key) => Err(SchemaError::UnknownField {
                entity: self.schema.entity.clone(),
                field: key.clone(),
            }),
            None => Ok(()),
        }
    }

    fn validate_value(&self, field: &str, value: &Value, expected: FieldType) -> SchemaResult<()> {
        if value.is_null() {
            return Err(SchemaError::NullValue {
                entity: self.schema.entity.clone(),
                field: field.to_string(),
            });
        }

        let type_ok = match expected {
            FieldType::String | FieldType::Email => value.is_string(),
            FieldType::Int => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_number(),
        };
        if !type_ok {
            return Err(SchemaError::TypeMismatch {
                entity: self.schema.entity.clone(),
                field: field.to_string(),
                expected: expected.type_name(),
                actual: json_type_name(value),
            });
        }

        if expected == FieldType::Email {
            let address = value.as_str().unwrap_or_default();
            if !EMAIL_PATTERN.is_match(address) {
                return Err(SchemaError::InvalidValue {
                    entity: self.schema.entity.clone(),
                    field: field.to_string(),
                    reason: format!("'{}' is not an e-mail address", address),
                });
            }
        }

        Ok(())
    }

    fn missing(&self, field: &str) -> SchemaError {
        SchemaError::MissingField {
            entity: self.schema.entity.clone(),
            field: field.to_string(),
        }
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
