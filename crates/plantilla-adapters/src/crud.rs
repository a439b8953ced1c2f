//! Generic create / read / update / remove with mirror propagation.
//!
//! A mirror failure after the relational write succeeded is reported to the
//! caller but does not undo the write; the next reconciliation repairs the
//! mirror.

use plantilla_core::{
  Key, Listing, MirrorPolicy, Resource, Status,
  mirror::{FORBIDDEN_KEY_CHARS, Fields, Mirror, is_valid_key},
  store::{RecordQuery, RecordStore},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
  Adapters, Error, Result,
  compare::{fields_of, merge_profile, mirror_fields},
};

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  /// Insert `record` and mirror it.
  ///
  /// Text-keyed records without an id get a fresh one; supplied ids of
  /// mirrored resources must be a single mirror segment.
  pub async fn create<R: Resource>(&self, mut record: R) -> Result<R> {
    match record.key() {
      None if !R::TABLE.auto_key => {
        record.set_key(Key::Text(Uuid::new_v4().simple().to_string()))?;
      }
      Some(key) => check_mirror_key::<R>(&key)?,
      None => {}
    }
    let stored = self.store.insert(record).await.map_err(Error::store)?;
    tracing::info!(table = R::TABLE.name, key = ?stored.key(), "created");
    self.mirror_write(&stored).await?;
    Ok(stored)
  }

  /// List rows; `listing` falls back to the resource's default.
  pub async fn list<R: Resource>(
    &self,
    listing: Option<Listing>,
  ) -> Result<Vec<R>> {
    self
      .list_where(RecordQuery::listing(listing.unwrap_or(R::LISTING)))
      .await
  }

  pub async fn list_where<R: Resource>(
    &self,
    query: RecordQuery,
  ) -> Result<Vec<R>> {
    self.store.list(query).await.map_err(Error::store)
  }

  /// Fetch one row regardless of its status.
  pub async fn get<R: Resource>(&self, key: Key) -> Result<R> {
    self
      .store
      .get(key.clone())
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::not_found::<R>(&key))
  }

  /// Overwrite the row at `key` with `record` and mirror the result.
  pub async fn update<R: Resource>(&self, key: Key, mut record: R) -> Result<R> {
    record.set_key(key.clone())?;
    let updated = self
      .store
      .update(record)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::not_found::<R>(&key))?;
    tracing::info!(table = R::TABLE.name, %key, "updated");
    self.mirror_write(&updated).await?;
    Ok(updated)
  }

  /// Apply a partial update: only declared non-key columns present in
  /// `patch` change, every other column keeps its stored value.
  pub async fn update_fields<R: Resource>(
    &self,
    key: Key,
    patch: Fields,
  ) -> Result<R> {
    let current: R = self.get(key.clone()).await?;
    let merged = merge_patch(&current, patch)?;
    self.update(key, merged).await
  }

  /// Soft-delete: set the row inactive and withdraw it from the mirror.
  pub async fn remove<R: Resource>(&self, key: Key) -> Result<R> {
    let removed: R = self
      .store
      .set_status(key.clone(), Status::Inactive)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::not_found::<R>(&key))?;
    tracing::info!(table = R::TABLE.name, %key, "removed");
    self.mirror_write(&removed).await?;
    Ok(removed)
  }

  // ── Mirror propagation ────────────────────────────────────────────────

  /// Bring the mirror copy of `record` in line with `R::MIRROR`.
  ///
  /// Collections only hold active rows, so an inactive record deletes its
  /// document. Profiles are merged into what the mirror already holds and
  /// keep `status: false` once removed.
  pub(crate) async fn mirror_write<R: Resource>(&self, record: &R) -> Result<()> {
    let Some(key) = record.key() else {
      return Ok(());
    };
    let result = match R::MIRROR {
      MirrorPolicy::None => return Ok(()),
      MirrorPolicy::Collection(collection)
        if record.status() == Status::Inactive =>
      {
        self
          .mirror
          .delete_document(collection, &key.to_string())
          .await
      }
      MirrorPolicy::Collection(collection) => {
        let fields = mirror_fields(record)?;
        self
          .mirror
          .set_document(collection, &key.to_string(), fields)
          .await
      }
      MirrorPolicy::Profile(root) => {
        let fields = mirror_fields(record)?;
        let path = format!("{root}/{key}");
        async {
          let existing = self.mirror.get_path(&path).await?;
          let profile = merge_profile(existing, fields);
          self.mirror.set_path(&path, Value::Object(profile)).await
        }
        .await
      }
    };
    result.map_err(|e| {
      tracing::warn!(table = R::TABLE.name, %key, error = %e, "mirror write failed");
      Error::mirror(e)
    })
  }
}

/// Text keys of mirrored resources become document ids or path segments, so
/// they must be a single valid segment.
fn check_mirror_key<R: Resource>(key: &Key) -> Result<()> {
  match (R::MIRROR, key) {
    (MirrorPolicy::None, _) | (_, Key::Int(_)) => Ok(()),
    (_, Key::Text(id)) if is_valid_key(id) => Ok(()),
    (_, Key::Text(id)) => Err(Error::BadRequest(format!(
      "{} key {id:?} must not contain any of {FORBIDDEN_KEY_CHARS:?}",
      R::TABLE.name
    ))),
  }
}

/// Overlay the declared data columns found in `patch` onto `current`.
/// The key and read-only columns are never taken from the patch.
fn merge_patch<R: Resource>(current: &R, patch: Fields) -> Result<R> {
  let mut fields = fields_of(current)?;
  for (name, value) in patch {
    match R::TABLE.column(&name) {
      Some(column)
        if column.name != R::TABLE.key
          && !R::READ_ONLY.contains(&column.name) =>
      {
        fields.insert(name, value);
      }
      Some(_) => {
        tracing::debug!(table = R::TABLE.name, field = %name, "ignoring read-only field");
      }
      None => {
        tracing::debug!(table = R::TABLE.name, field = %name, "ignoring undeclared field");
      }
    }
  }
  Ok(serde_json::from_value(Value::Object(fields))?)
}
