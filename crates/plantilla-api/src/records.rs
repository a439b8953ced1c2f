//! Generic handlers shared by every table-backed resource.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/{resource}` | Optional `?status=active\|inactive\|all` |
//! | `POST`   | `/{resource}` | Body: the record; 201 |
//! | `GET`    | `/{resource}/{id}` | 404 if not found |
//! | `PUT`    | `/{resource}/{id}` | Body: the fields to change |
//! | `DELETE` | `/{resource}/{id}` | Soft delete; returns the inactive record |

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  routing::{MethodRouter, get},
};
use plantilla_core::{
  Key, Listing, Resource,
  mirror::{Fields, Mirror},
  store::RecordStore,
};
use serde::Deserialize;

use crate::{
  Shared,
  error::ApiError,
  extract::{Json, Query},
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub status: Option<Listing>,
}

/// Parse a path id according to the key kind of `R`.
pub(crate) fn parse_key<R: Resource>(raw: &str) -> Result<Key, ApiError> {
  Ok(Key::parse(&R::TABLE, raw)?)
}

/// `GET` + `POST` on the collection path.
pub fn collection<S, M, R>() -> MethodRouter<Shared<S, M>>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  get(list::<S, M, R>).post(create::<S, M, R>)
}

/// `GET` + `PUT` + `DELETE` on the member path.
pub fn member<S, M, R>() -> MethodRouter<Shared<S, M>>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  get(get_one::<S, M, R>)
    .put(update::<S, M, R>)
    .delete(remove::<S, M, R>)
}

pub async fn list<S, M, R>(
  State(adapters): State<Shared<S, M>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<R>>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  Ok(Json(adapters.list::<R>(params.status).await?))
}

pub async fn create<S, M, R>(
  State(adapters): State<Shared<S, M>>,
  Json(record): Json<R>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  let created = adapters.create(record).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_one<S, M, R>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  Ok(Json(adapters.get(parse_key::<R>(&id)?).await?))
}

pub async fn update<S, M, R>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
  Json(patch): Json<Fields>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  let key = parse_key::<R>(&id)?;
  Ok(Json(adapters.update_fields(key, patch).await?))
}

pub async fn remove<S, M, R>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
) -> Result<Json<R>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  Ok(Json(adapters.remove(parse_key::<R>(&id)?).await?))
}
