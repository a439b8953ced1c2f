//! Employee handlers that go beyond plain CRUD.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/employees` | Records an "Alta" labor event |
//! | `PUT`  | `/employees/{id}` | Records position and salary changes |
//! | `POST` | `/employees/sync` | Pushes every profile to the mirror |
//! | `GET`  | `/employees/{id}/labor-events` | Optional `?status=` |

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use plantilla_adapters::SyncReport;
use plantilla_core::{
  Key,
  hr::{Employee, LaborEvent},
  mirror::{Fields, Mirror},
  store::RecordStore,
};

use crate::{
  Shared,
  error::ApiError,
  extract::{Json, Query},
  records::ListParams,
};

pub async fn create<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(employee): Json<Employee>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let created = adapters.create_employee(employee).await?;
  Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<S, M>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
  Json(patch): Json<Fields>,
) -> Result<Json<Employee>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  Ok(Json(adapters.update_employee(Key::from(id), patch).await?))
}

pub async fn labor_events<S, M>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<LaborEvent>>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  Ok(Json(adapters.employee_events(&id, params.status).await?))
}

pub async fn sync<S, M>(
  State(adapters): State<Shared<S, M>>,
) -> Result<Json<SyncReport>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  Ok(Json(adapters.push_employees().await?))
}
