//! Back-office accounts: password hashing and credential checks.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use plantilla_core::{
  Key, Listing,
  hr::User,
  mirror::{Fields, Mirror},
  store::{RecordQuery, RecordStore},
};
use rand_core::OsRng;
use serde::Deserialize;
use serde_json::Value;

use crate::{Adapters, Error, Result};

/// Body of a user create: the plain password replaces `password_hash`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
  pub name:     String,
  pub email:    String,
  pub password: String,
  pub id_role:  Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  pub async fn create_user(&self, input: NewUser) -> Result<User> {
    if input.email.is_empty() || input.password.is_empty() {
      return Err(Error::BadRequest("email and password are required".into()));
    }
    self
      .create(User {
        name: input.name,
        email: input.email,
        password_hash: hash_password(&input.password)?,
        id_role: input.id_role,
        ..Default::default()
      })
      .await
  }

  /// Partial update; a `password` field is hashed into `password_hash`, and
  /// a raw `password_hash` in the patch is ignored.
  pub async fn update_user(&self, key: Key, mut patch: Fields) -> Result<User> {
    patch.remove("password_hash");
    if let Some(password) = patch.remove("password") {
      let Value::String(password) = password else {
        return Err(Error::BadRequest("password must be a string".into()));
      };
      patch.insert(
        "password_hash".into(),
        Value::String(hash_password(&password)?),
      );
    }
    self.update_fields(key, patch).await
  }

  /// Check credentials against active accounts.
  pub async fn login(&self, credentials: Credentials) -> Result<User> {
    let query = RecordQuery::listing(Listing::Active)
      .with_filter("email", credentials.email.as_str());
    let user = self
      .list_where::<User>(query)
      .await?
      .into_iter()
      .next()
      .ok_or(Error::Unauthorized)?;

    let parsed =
      PasswordHash::new(&user.password_hash).map_err(|_| Error::Unauthorized)?;
    Argon2::default()
      .verify_password(credentials.password.as_bytes(), &parsed)
      .map_err(|_| Error::Unauthorized)?;

    tracing::info!(id_user = ?user.id_user, "login");
    Ok(user)
  }
}

fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::Password(e.to_string()))
}
