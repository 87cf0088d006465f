//! Schema type definitions
//!
//! Supported field types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point (integers are accepted)
//! - email: string shaped like `local@domain.tld`

use std::collections::BTreeMap;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// String holding an e-mail address
    Email,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Email => "email",
        }
    }
}

/// Type of a collection's primary key (`_id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Free-form string; generated as a simple UUID when omitted
    Text,
    /// Integer; generated as `max + 1` when omitted
    Int,
}

impl IdKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            IdKind::Text => "string",
            IdKind::Int => "int",
        }
    }
}

/// Field definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field data type
    pub field_type: FieldType,
    /// Whether field must be present on insert
    pub required: bool,
}

impl FieldDef {
    /// Create a required string field
    pub fn required_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
        }
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
        }
    }

    /// Create an optional int field
    pub fn optional_int() -> Self {
        Self {
            field_type: FieldType::Int,
            required: false,
        }
    }

    /// Create an optional float field
    pub fn optional_float() -> Self {
        Self {
            field_type: FieldType::Float,
            required: false,
        }
    }

    /// Create an optional e-mail field
    pub fn optional_email() -> Self {
        Self {
            field_type: FieldType::Email,
            required: false,
        }
    }
}

/// Collection schema, enforced by the store at write time.
///
/// `_id` is implicit and typed by `id_kind`; it never appears in `fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Collection name, e.g. `films`
    pub collection: String,
    /// Entity name used in messages, e.g. `Film`
    pub entity: String,
    /// Primary key type
    pub id_kind: IdKind,
    /// Declared fields, ordered by name
    pub fields: BTreeMap<String, FieldDef>,
}

impl Schema {
    /// Create a schema with no declared fields
    pub fn new(collection: impl Into<String>, entity: impl Into<String>, id_kind: IdKind) -> Self {
        Self {
            collection: collection.into(),
            entity: entity.into(),
            id_kind,
            fields: BTreeMap::new(),
        }
    }

    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.fields.insert(name.into(), def);
        self
    }
}
