//! Resource HTTP Routes
//!
//! The five CRUD endpoints, generic over the entity. Each handler makes one
//! store call and maps its outcome:
//!
//! | Operation | Success | Missing | Failure |
//! |---|---|---|---|
//! | `GET /{collection}` | 200 + array | - | 500 |
//! | `GET /{collection}/{id}` | 200 + object | 404 | 400 / 500 |
//! | `POST /{collection}` | 201 + object | - | 400 / 500 |
//! | `PUT /{collection}/{id}` | 200 + object | 404 | 400 / 500 |
//! | `DELETE /{collection}/{id}` | 204 | 404 | 400 / 500 |

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use super::extract::JsonBody;
use crate::models::Resource;
use crate::storage::{DocId, DocumentStore};

/// Create the CRUD routes for one resource
pub fn resource_routes<R, S>(store: Arc<S>) -> Router
where
    R: Resource,
    S: DocumentStore + 'static,
{
    let collection_path = format!("/{}", R::COLLECTION);
    let item_path = format!("/{}/{{id}}", R::COLLECTION);

    Router::new()
        .route(
            &collection_path,
            get(list_handler::<R, S>).post(create_handler::<R, S>),
        )
        .route(
            &item_path,
            get(get_handler::<R, S>)
                .put(update_handler::<R, S>)
                .delete(delete_handler::<R, S>),
        )
        .with_state(store)
}

// ==================
// Helper Functions
// ==================

fn parse_id<R: Resource>(raw: &str) -> ApiResult<DocId> {
    R::parse_id(raw).ok_or_else(|| ApiError::InvalidId {
        entity: R::ENTITY,
        raw: raw.to_string(),
    })
}

fn decode<R: Resource>(document: Value) -> ApiResult<R> {
    serde_json::from_value(document)
        .map_err(|e| ApiError::Internal(format!("stored {} is malformed: {}", R::ENTITY, e)))
}

fn encode<T: Serialize>(body: &T) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

fn encode_patch<T: Serialize>(body: &T) -> ApiResult<Map<String, Value>> {
    match encode(body)? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidBody(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

// ==================
// Handlers
// ==================

async fn list_handler<R: Resource, S: DocumentStore>(
    State(store): State<Arc<S>>,
) -> ApiResult<Json<Vec<R>>> {
    let records = store
        .find_all(R::COLLECTION)?
        .into_iter()
        .map(decode::<R>)
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(records))
}

async fn get_handler<R: Resource, S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<R>> {
    let id = parse_id::<R>(&raw_id)?;

    let document = store
        .find_by_id(R::COLLECTION, &id)?
        .ok_or(ApiError::NotFound(R::ENTITY))?;
    Ok(Json(decode(document)?))
}

async fn create_handler<R: Resource, S: DocumentStore>(
    State(store): State<Arc<S>>,
    JsonBody(draft): JsonBody<R::Draft>,
) -> ApiResult<(StatusCode, Json<R>)> {
    let document = store.insert(R::COLLECTION, encode(&draft)?)?;
    Ok((StatusCode::CREATED, Json(decode(document)?)))
}

async fn update_handler<R: Resource, S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(raw_id): Path<String>,
    JsonBody(changes): JsonBody<R::Changes>,
) -> ApiResult<Json<R>> {
    let id = parse_id::<R>(&raw_id)?;

    let document = store
        .update_by_id(R::COLLECTION, &id, encode_patch(&changes)?)?
        .ok_or(ApiError::NotFound(R::ENTITY))?;
    Ok(Json(decode(document)?))
}

async fn delete_handler<R: Resource, S: DocumentStore>(
    State(store): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id::<R>(&raw_id)?;

    store
        .delete_by_id(R::COLLECTION, &id)?
        .ok_or(ApiError::NotFound(R::ENTITY))?;
    Ok(StatusCode::NO_CONTENT)
}
