//! Catalog entities
//!
//! Each entity comes with three shapes:
//! - the stored record (`Film`, `Distributor`), returned by every endpoint
//! - a draft for create, where every field is optional and the store's
//!   schema decides what is required
//! - a change set for merge updates, where presence of a field is the
//!   intent to change it; a present `null` is kept so the store rejects it

mod distributor;
mod film;

pub use distributor::{Distributor, DistributorChanges, NewDistributor};
pub use film::{Film, FilmChanges, NewFilm};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::Schema;
use crate::storage::DocId;

/// A collection exposed over the CRUD endpoints.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create-request body
    type Draft: Serialize + DeserializeOwned + Send + 'static;
    /// Update-request body
    type Changes: Serialize + DeserializeOwned + Send + 'static;

    /// Collection name; also the URL path segment
    const COLLECTION: &'static str;
    /// Entity name used in messages
    const ENTITY: &'static str;

    /// Schema the store enforces for this collection
    fn schema() -> Schema;

    /// Parses a path segment into a key, `None` if malformed
    fn parse_id(raw: &str) -> Option<DocId>;
}

/// Schemas for every collection the catalog serves
pub fn catalog_schemas() -> Vec<Schema> {
    vec![Film::schema(), Distributor::schema()]
}

/// Deserializes a present field as `Some`, even when its value is `null`.
///
/// Paired with `#[serde(default)]`, an absent field stays `None` and
/// `{"field": null}` becomes `Some(None)`, which serializes back to `null`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
