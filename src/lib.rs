//! film-catalog - REST backend for a film catalog
//!
//! Two resources, films and distributors, each served as a JSON CRUD
//! collection over HTTP and stored in a schema-enforcing document store.

pub mod cli;
pub mod http_server;
pub mod models;
pub mod observability;
pub mod schema;
pub mod storage;
