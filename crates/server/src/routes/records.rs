//! Generic CRUD dispatcher.
//!
//! Maps one HTTP request onto one [`Store`] call for any record type `T`:
//!
//! | method | `?id=` | store call |
//! |--------|--------|------------|
//! | POST   | -      | `create`   |
//! | GET    | absent | `get_all`  |
//! | GET    | n      | `get`      |
//! | PUT    | n      | `update`   |
//! | DELETE | n      | `delete`   |
//!
//! Anything else on the path, HEAD included, is a 405.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use service::storage::{Record, Store};
use tracing::{debug, info};

use crate::errors::ApiError;

/// A record type that can be served over HTTP as JSON.
pub trait Resource: Record + Serialize + DeserializeOwned {}

impl<T> Resource for T where T: Record + Serialize + DeserializeOwned {}

/// The `id` query parameter. When repeated, the first occurrence wins.
#[derive(Debug, Default)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for IdQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;
        let id = pairs.into_iter().find(|(k, _)| k == "id").map(|(_, v)| v);
        Ok(Self { id })
    }
}

impl IdQuery {
    /// `None` when no id (or an empty one) was given.
    fn raw(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }

    fn parse(&self) -> Result<i64, ApiError> {
        self.raw()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(ApiError::InvalidId)
    }
}

/// Build the router serving `store` at `path`.
pub fn router<T: Resource>(path: &str, store: Arc<Store<T>>) -> Router {
    Router::new()
        .route(
            path,
            get(read::<T>)
                .post(create::<T>)
                .put(update::<T>)
                .delete(remove::<T>)
                .head(unsupported)
                .fallback(unsupported),
        )
        .with_state(store)
}

pub async fn create<T: Resource>(
    State(store): State<Arc<Store<T>>>,
    body: Bytes,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let record: T = serde_json::from_slice(&body)?;
    let created = store.create(record);
    info!(id = created.id(), "record created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET with an id returns one record, without one the whole collection.
pub async fn read<T: Resource>(
    State(store): State<Arc<Store<T>>>,
    query: IdQuery,
) -> Result<Response, ApiError> {
    if query.raw().is_none() {
        return Ok(Json(store.get_all()).into_response());
    }

    let id = query.parse()?;
    match store.get(id) {
        Some(record) => Ok(Json(record).into_response()),
        None => {
            debug!(id, "record not found");
            Err(ApiError::NotFound)
        }
    }
}

/// Replace the record at `?id=` with the body and echo the body back.
pub async fn update<T: Resource>(
    State(store): State<Arc<Store<T>>>,
    query: IdQuery,
    body: Bytes,
) -> Result<Json<T>, ApiError> {
    let id = query.parse()?;
    let record: T = serde_json::from_slice(&body)?;
    if store.update(id, record.clone()) {
        info!(id, "record updated");
        Ok(Json(record))
    } else {
        debug!(id, "record not found");
        Err(ApiError::NotFound)
    }
}

pub async fn remove<T: Resource>(
    State(store): State<Arc<Store<T>>>,
    query: IdQuery,
) -> Result<StatusCode, ApiError> {
    let id = query.parse()?;
    if store.delete(id) {
        info!(id, "record deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        debug!(id, "record not found");
        Err(ApiError::NotFound)
    }
}

async fn unsupported() -> ApiError {
    ApiError::MethodNotAllowed
}
