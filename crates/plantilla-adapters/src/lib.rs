//! Business operations over a [`RecordStore`] and a [`Mirror`].
//!
//! Each write goes to the relational store first and is then copied into the
//! mirror according to the resource's [`MirrorPolicy`]. The relational store
//! is the source of truth for everything except the folio counters, which
//! live only in the mirror.
//!
//! [`MirrorPolicy`]: plantilla_core::MirrorPolicy

mod compare;
mod crud;
mod employees;
pub mod error;
mod folio;
mod sync;
mod termination;
mod users;

#[cfg(test)]
mod tests;

use plantilla_core::{mirror::Mirror, store::RecordStore};
use tokio::sync::Mutex;

pub use self::{
  compare::{changed_fields, values_match},
  error::{Error, Result},
  sync::SyncReport,
  users::{Credentials, NewUser},
};

/// The operation surface shared by every HTTP handler.
pub struct Adapters<S, M> {
  store:      S,
  mirror:     M,
  /// Serialises read-increment-write cycles on the folio counters.
  folio_lock: Mutex<()>,
}

impl<S, M> Adapters<S, M>
where
  S: RecordStore,
  M: Mirror,
{
  pub fn new(store: S, mirror: M) -> Self {
    Self {
      store,
      mirror,
      folio_lock: Mutex::new(()),
    }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn mirror(&self) -> &M { &self.mirror }
}
