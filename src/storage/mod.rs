//! Document storage subsystem
//!
//! The storage engine owns the catalog's persistent state and enforces each
//! collection's schema at write time. HTTP handlers only see the
//! [`DocumentStore`] trait; [`MemoryStore`] is the bundled implementation.
//!
//! # Guarantees
//!
//! - `_id` is unique within a collection
//! - Every stored document satisfies its schema
//! - Each call is atomic; no call observes another's partial effect
//! - With persistence, a failed file write leaves memory unchanged

mod document;
mod errors;
mod memory;
mod persist;

pub use document::{DocId, DocumentStore};
pub use errors::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use persist::Persistence;
