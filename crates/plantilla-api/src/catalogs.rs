//! `POST /{catalog}/sync`: pull a mirrored collection into the store.

use axum::extract::State;
use plantilla_adapters::SyncReport;
use plantilla_core::{Resource, mirror::Mirror, store::RecordStore};

use crate::{Shared, error::ApiError, extract::Json};

pub async fn sync<S, M, R>(
  State(adapters): State<Shared<S, M>>,
) -> Result<Json<SyncReport>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
  R: Resource,
{
  Ok(Json(adapters.sync_catalog::<R>().await?))
}
