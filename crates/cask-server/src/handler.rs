//! Request handlers translating HTTP requests into store calls.
//!
//! Handlers validate that required query parameters are present and
//! non-blank, then call the store. Store outcomes, failures included, are
//! returned as `200 OK` with the [`OperationResult`] body; only malformed
//! requests produce an error status.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::Json;
use cask_types::{CasToken, Collection, OperationResult};
use serde::Deserialize;
use serde_json::Value;

use crate::endpoint::{params, HealthResponse};
use crate::error::{ServerError, ServerResult};
use crate::router::SharedStore;

/// Query parameters accepted by the API. Which ones are required depends on
/// the endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ApiParams {
    pub collection: Option<String>,
    pub key: Option<String>,
    pub cas: Option<String>,
    pub persistence: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> ServerResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing query parameter '{name}'")))
}

/// `persistence=true` (any case) enables persistence; anything else does not.
fn persistence_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn list_collections(State(store): State<SharedStore>) -> Json<Vec<Collection>> {
    Json(store.list_collections())
}

pub async fn create_collection(
    State(store): State<SharedStore>,
    Query(query): Query<ApiParams>,
) -> ServerResult<Json<bool>> {
    let name = required(&query.collection, params::COLLECTION)?;
    let persistence_enabled = persistence_flag(query.persistence.as_deref());
    Ok(Json(store.create_collection(name, persistence_enabled)))
}

pub async fn get_item(
    State(store): State<SharedStore>,
    Query(query): Query<ApiParams>,
) -> ServerResult<Json<OperationResult<Value>>> {
    let collection = required(&query.collection, params::COLLECTION)?;
    let key = required(&query.key, params::KEY)?;
    let result = store.get(collection, key);
    tracing::debug!(collection, key, status = %result.status, "get");
    Ok(Json(result))
}

pub async fn set_item(
    State(store): State<SharedStore>,
    Query(query): Query<ApiParams>,
    body: Bytes,
) -> ServerResult<Json<OperationResult<Value>>> {
    let collection = required(&query.collection, params::COLLECTION)?;
    let key = required(&query.key, params::KEY)?;
    let cas = required(&query.cas, params::CAS)?
        .parse::<CasToken>()
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;
    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("request body is not valid JSON: {e}")))?;

    let result = store.set(collection, key, value, cas);
    tracing::debug!(collection, key, status = %result.status, cas = %result.cas, "set");
    Ok(Json(result))
}

pub async fn not_found(uri: Uri) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("NOT FOUND {}", uri.path()))
}
