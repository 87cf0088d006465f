use serde::{Deserialize, Serialize};

use super::{present, Resource};
use crate::schema::{FieldDef, IdKind, Schema};
use crate::storage::DocId;

/// A movie catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    #[serde(rename = "_id")]
    pub id: String,
    /// Secondary label, not unique
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub film_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Not checked against the distributor collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<i64>,
}

/// Merge-update body; `Some(None)` is a field sent as `null`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmChanges {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub film_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub distributor_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFilm {
    /// Generated by the store when absent
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: FilmChanges,
}

impl Resource for Film {
    type Draft = NewFilm;
    type Changes = FilmChanges;

    const COLLECTION: &'static str = "films";
    const ENTITY: &'static str = "Film";

    fn schema() -> Schema {
        Schema::new(Self::COLLECTION, Self::ENTITY, IdKind::Text)
            .field("film_id", FieldDef::optional_string())
            .field("title", FieldDef::required_string())
            .field("release_year", FieldDef::optional_int())
            .field("genre", FieldDef::optional_string())
            .field("runtime_minutes", FieldDef::optional_int())
            .field("rating", FieldDef::optional_float())
            .field("distributor_id", FieldDef::optional_int())
    }

    /// Taken verbatim: stored ids may carry surrounding whitespace
    fn parse_id(raw: &str) -> Option<DocId> {
        (!raw.is_empty()).then(|| DocId::Text(raw.to_string()))
    }
}
