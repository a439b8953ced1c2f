//! Purchase-request handlers. Every create consumes a folio.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/request-headers` | |
//! | `GET`  | `/request-headers/folio` | Preview; does not consume |
//! | `POST` | `/request-details` | One line, its own folio |
//! | `POST` | `/request-details/batch` | Lines sharing `id_detail`; one folio |
//! | `GET`  | `/request-details/folio` | |
//! | `POST` | `/requests-additional` | |
//! | `GET`  | `/requests-additional/folio` | |

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use plantilla_core::{
  mirror::Mirror,
  purchase::{FolioKind, RequestAdditional, RequestDetail, RequestHeader},
  store::RecordStore,
};
use serde::Serialize;

use crate::{Shared, error::ApiError, extract::Json};

#[derive(Debug, Serialize)]
pub struct FolioPreview {
  pub kind:  FolioKind,
  pub folio: i64,
}

async fn preview<S, M>(
  adapters: &Shared<S, M>,
  kind: FolioKind,
) -> Result<Json<FolioPreview>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let folio = adapters.current_folio(kind).await?;
  Ok(Json(FolioPreview { kind, folio }))
}

pub async fn header_folio<S, M>(
  State(adapters): State<Shared<S, M>>,
) -> Result<Json<FolioPreview>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  preview(&adapters, FolioKind::RequestHeaders).await
}

pub async fn detail_folio<S, M>(
  State(adapters): State<Shared<S, M>>,
) -> Result<Json<FolioPreview>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  preview(&adapters, FolioKind::RequestDetails).await
}

pub async fn additional_folio<S, M>(
  State(adapters): State<Shared<S, M>>,
) -> Result<Json<FolioPreview>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  preview(&adapters, FolioKind::RequestsAdditional).await
}

pub async fn create_header<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(header): Json<RequestHeader>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let created = adapters.create_request_header(header).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_detail<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(detail): Json<RequestDetail>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let created = adapters.create_request_detail(detail).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_detail_batch<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(details): Json<Vec<RequestDetail>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let created = adapters.create_detail_batch(details).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_additional<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(item): Json<RequestAdditional>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let created = adapters.create_request_additional(item).await?;
  Ok((StatusCode::CREATED, Json(created)))
}
