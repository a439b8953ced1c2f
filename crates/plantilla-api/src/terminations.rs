//! `POST /terminations`: runs the termination cascade.

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use plantilla_core::{hr::Termination, mirror::Mirror, store::RecordStore};

use crate::{Shared, error::ApiError, extract::Json};

pub async fn create<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(termination): Json<Termination>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let stored = adapters.create_termination(termination).await?;
  Ok((StatusCode::CREATED, Json(stored)))
}
