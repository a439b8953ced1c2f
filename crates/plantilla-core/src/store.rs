//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by relational backends (e.g.
//! `plantilla-store-sqlite`). The adapter and API layers depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  lifecycle::{Listing, Status},
  schema::{Key, Resource},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::list`].
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
  pub listing: Listing,
  /// Equality filter on one declared column, e.g. `("id_employee", ..)`.
  pub filter:  Option<(&'static str, Key)>,
}

impl RecordQuery {
  pub fn listing(listing: Listing) -> Self {
    Self { listing, filter: None }
  }

  pub fn with_filter(mut self, column: &'static str, value: impl Into<Key>) -> Self {
    self.filter = Some((column, value.into()));
    self
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational store.
///
/// Every method is generic over the record type; the backend derives its SQL
/// from [`Resource::TABLE`]. No method deletes rows: removal is expressed as
/// [`RecordStore::set_status`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new row and return it as stored, key included.
  ///
  /// For auto-key tables any key on `record` is ignored.
  fn insert<R: Resource>(
    &self,
    record: R,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Retrieve a row by key. Returns `None` if not found.
  fn get<R: Resource>(
    &self,
    key: Key,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// List rows matching `query`, ordered by key.
  fn list<R: Resource>(
    &self,
    query: RecordQuery,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Overwrite every non-key column of an existing row, then re-read it.
  /// Returns `None` if no row has the record's key.
  fn update<R: Resource>(
    &self,
    record: R,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Set the status column of a row and return the updated row.
  /// Returns `None` if not found.
  fn set_status<R: Resource>(
    &self,
    key: Key,
    status: Status,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;
}
