use serde::{Deserialize, Serialize};

use super::{present, Resource};
use crate::schema::{FieldDef, IdKind, Schema};
use crate::storage::DocId;

/// A film distribution company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributor {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founding_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Merge-update body; `Some(None)` is a field sent as `null`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributorChanges {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub founding_year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDistributor {
    /// Next free integer when absent
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: DistributorChanges,
}

impl Resource for Distributor {
    type Draft = NewDistributor;
    type Changes = DistributorChanges;

    const COLLECTION: &'static str = "distributors";
    const ENTITY: &'static str = "Distributor";

    fn schema() -> Schema {
        Schema::new(Self::COLLECTION, Self::ENTITY, IdKind::Int)
            .field("name", FieldDef::required_string())
            .field("country", FieldDef::optional_string())
            .field("founding_year", FieldDef::optional_int())
            .field("website", FieldDef::optional_string())
            .field("email", FieldDef::optional_email())
    }

    fn parse_id(raw: &str) -> Option<DocId> {
        raw.trim().parse::<i64>().ok().map(DocId::Int)
    }
}
