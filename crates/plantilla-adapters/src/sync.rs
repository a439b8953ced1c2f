//! Reconciliation between the relational store and the mirror.
//!
//! Catalog collections are authored in the mirror and pulled into the store;
//! employee profiles are authored in the store and pushed to the mirror. Both
//! directions only write rows whose fields actually differ, so running a sync
//! twice in a row performs no writes the second time.

use plantilla_core::{
  Listing, MirrorPolicy, Resource,
  hr::Employee,
  mirror::{Document, Mirror},
  store::{RecordQuery, RecordStore},
};
use serde::Serialize;
use serde_json::Value;

use crate::{
  Adapters, Error, Result,
  compare::{
    changed_fields, fields_of, merge_profile, mirror_fields, record_from_fields,
  },
};

/// Per-item outcome counts of one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
  pub inserted:  usize,
  pub updated:   usize,
  pub unchanged: usize,
  pub failed:    usize,
}

impl SyncReport {
  /// Number of writes the run performed.
  pub fn writes(&self) -> usize { self.inserted + self.updated }

  fn record(&mut self, outcome: Outcome) {
    match outcome {
      Outcome::Inserted => self.inserted += 1,
      Outcome::Updated => self.updated += 1,
      Outcome::Unchanged => self.unchanged += 1,
    }
  }
}

enum Outcome {
  Inserted,
  Updated,
  Unchanged,
}

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  /// Pull every document of `R`'s collection into the store.
  ///
  /// A document that fails to convert or write is logged and counted; the
  /// run continues with the next one. Only a failure to read the collection
  /// aborts the run.
  pub async fn sync_catalog<R: Resource>(&self) -> Result<SyncReport> {
    let MirrorPolicy::Collection(collection) = R::MIRROR else {
      return Err(Error::BadRequest(format!(
        "{} is not mirrored as a collection",
        R::TABLE.name
      )));
    };

    let documents = self
      .mirror
      .list_documents(collection)
      .await
      .map_err(Error::mirror)?;

    let mut report = SyncReport::default();
    for document in documents {
      let id = document.id.clone();
      match self.reconcile_document::<R>(document).await {
        Ok(outcome) => report.record(outcome),
        Err(e) => {
          tracing::warn!(collection, id, error = %e, "skipping document");
          report.failed += 1;
        }
      }
    }

    tracing::info!(
      collection,
      inserted = report.inserted,
      updated = report.updated,
      unchanged = report.unchanged,
      failed = report.failed,
      "catalog sync finished"
    );
    Ok(report)
  }

  async fn reconcile_document<R: Resource>(
    &self,
    document: Document,
  ) -> Result<Outcome> {
    let incoming: R = record_from_fields(&document.id, document.fields)?;
    let key = plantilla_core::Key::parse(&R::TABLE, &document.id)?;

    let Some(current) = self.store.get::<R>(key).await.map_err(Error::store)?
    else {
      self.store.insert(incoming).await.map_err(Error::store)?;
      return Ok(Outcome::Inserted);
    };

    let changed =
      changed_fields(&R::TABLE, &fields_of(&current)?, &fields_of(&incoming)?);
    if changed.is_empty() {
      return Ok(Outcome::Unchanged);
    }
    tracing::debug!(table = R::TABLE.name, id = document.id, ?changed, "row differs");
    self.store.update(incoming).await.map_err(Error::store)?;
    Ok(Outcome::Updated)
  }

  /// Push every employee to `employees/{id}`.
  pub async fn push_employees(&self) -> Result<SyncReport> {
    self.push_profiles::<Employee>().await
  }

  /// Push every row of `R` to its profile in the key-path tree.
  ///
  /// Profiles keep any extra fields other writers put there; only the
  /// declared columns are compared and overwritten. The whole root is read
  /// once up front; failing to read it aborts the run.
  pub async fn push_profiles<R: Resource>(&self) -> Result<SyncReport> {
    let MirrorPolicy::Profile(root) = R::MIRROR else {
      return Err(Error::BadRequest(format!(
        "{} is not mirrored as a profile",
        R::TABLE.name
      )));
    };

    let rows: Vec<R> = self
      .store
      .list(RecordQuery::listing(Listing::All))
      .await
      .map_err(Error::store)?;

    let mut profiles = match self.mirror.get_path(root).await {
      Ok(Some(Value::Object(profiles))) => profiles,
      Ok(_) => Default::default(),
      Err(e) => {
        tracing::warn!(root, error = %e, "profile root unreadable");
        return Err(Error::mirror(e));
      }
    };

    let mut report = SyncReport::default();
    for row in rows {
      let Some(key) = row.key() else { continue };
      let path = format!("{root}/{key}");
      let existing = profiles.remove(&key.to_string());
      match self.push_profile(&path, &row, existing).await {
        Ok(outcome) => report.record(outcome),
        Err(e) => {
          tracing::warn!(path, error = %e, "skipping profile");
          report.failed += 1;
        }
      }
    }

    tracing::info!(
      root,
      inserted = report.inserted,
      updated = report.updated,
      unchanged = report.unchanged,
      failed = report.failed,
      "profile push finished"
    );
    Ok(report)
  }

  async fn push_profile<R: Resource>(
    &self,
    path: &str,
    row: &R,
    existing: Option<Value>,
  ) -> Result<Outcome> {
    let fields = mirror_fields(row)?;

    let outcome = match &existing {
      Some(Value::Object(profile)) => {
        if changed_fields(&R::TABLE, profile, &fields).is_empty() {
          return Ok(Outcome::Unchanged);
        }
        Outcome::Updated
      }
      _ => Outcome::Inserted,
    };
    let profile = merge_profile(existing, fields);

    self
      .mirror
      .set_path(path, Value::Object(profile))
      .await
      .map_err(Error::mirror)?;
    Ok(outcome)
  }
}
