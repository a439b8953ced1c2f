//! Handlers for `/users`. Password hashes never leave the server.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Optional `?status=` |
//! | `POST`   | `/users` | Body: `{"name", "email", "password", "id_role"}` |
//! | `GET`    | `/users/{id}` | |
//! | `PUT`    | `/users/{id}` | `password` is re-hashed |
//! | `DELETE` | `/users/{id}` | |
//! | `POST`   | `/users/login` | Body: `{"email", "password"}`; 401 on mismatch |

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use plantilla_adapters::{Credentials, NewUser};
use plantilla_core::{
  Status,
  hr::User,
  mirror::{Fields, Mirror},
  store::RecordStore,
};
use serde::Serialize;

use crate::{
  Shared,
  error::ApiError,
  extract::{Json, Query},
  records::{ListParams, parse_key},
};

/// A [`User`] without its password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
  pub id_user: Option<i64>,
  pub name:    String,
  pub email:   String,
  pub id_role: Option<i64>,
  pub status:  Status,
}

impl From<User> for PublicUser {
  fn from(user: User) -> Self {
    Self {
      id_user: user.id_user,
      name:    user.name,
      email:   user.email,
      id_role: user.id_role,
      status:  user.status,
    }
  }
}

pub async fn list<S, M>(
  State(adapters): State<Shared<S, M>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PublicUser>>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let users = adapters.list::<User>(params.status).await?;
  Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

pub async fn create<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let user = adapters.create_user(body).await?;
  Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

pub async fn get_one<S, M>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let user: User = adapters.get(parse_key::<User>(&id)?).await?;
  Ok(Json(user.into()))
}

pub async fn update<S, M>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
  Json(patch): Json<Fields>,
) -> Result<Json<PublicUser>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let user = adapters.update_user(parse_key::<User>(&id)?, patch).await?;
  Ok(Json(user.into()))
}

pub async fn remove<S, M>(
  State(adapters): State<Shared<S, M>>,
  Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let user: User = adapters.remove(parse_key::<User>(&id)?).await?;
  Ok(Json(user.into()))
}

pub async fn login<S, M>(
  State(adapters): State<Shared<S, M>>,
  Json(credentials): Json<Credentials>,
) -> Result<Json<PublicUser>, ApiError>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  let user = adapters.login(credentials).await?;
  Ok(Json(user.into()))
}
