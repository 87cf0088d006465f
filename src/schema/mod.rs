//! Schema subsystem
//!
//! Collection schemas are enforced by the store at write time: inserts are
//! validated as whole documents, updates as merge patches and then again as
//! the merged document.

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use types::{FieldDef, FieldType, IdKind, Schema};
pub use validator::SchemaValidator;
