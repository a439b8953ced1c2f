//! [`MemoryMirror`]: an in-process JSON tree implementing [`Mirror`].

use std::sync::{
  Arc,
  atomic::{AtomicBool, AtomicUsize, Ordering},
};

use plantilla_core::mirror::{Document, Fields, Mirror};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{
  Error, Result,
  path::{document_from, document_path, documents_from, segments},
};

#[derive(Default)]
struct Inner {
  tree:    RwLock<Map<String, Value>>,
  writes:  AtomicUsize,
  offline: AtomicBool,
}

/// In-memory mirror.
///
/// Cloning is cheap; clones share one tree.
#[derive(Clone, Default)]
pub struct MemoryMirror {
  inner: Arc<Inner>,
}

impl MemoryMirror {
  pub fn new() -> Self { Self::default() }

  /// Number of successful writes (document sets/deletes and path sets).
  pub fn writes(&self) -> usize { self.inner.writes.load(Ordering::SeqCst) }

  /// Make every subsequent call fail with [`Error::Offline`] until switched
  /// back.
  pub fn set_offline(&self, offline: bool) {
    self.inner.offline.store(offline, Ordering::SeqCst);
  }

  fn check_online(&self) -> Result<()> {
    if self.inner.offline.load(Ordering::SeqCst) {
      Err(Error::Offline)
    } else {
      Ok(())
    }
  }

  async fn read(&self, path: &str) -> Result<Option<Value>> {
    self.check_online()?;
    let segs = segments(path)?;
    let tree = self.inner.tree.read().await;

    let Some((first, rest)) = segs.split_first() else {
      return Ok(None);
    };
    let mut node = match tree.get(*first) {
      Some(v) => v,
      None => return Ok(None),
    };
    for seg in rest {
      node = match node.get(*seg) {
        Some(v) => v,
        None => return Ok(None),
      };
    }
    Ok(Some(node.clone()))
  }

  /// Write `value` at `path`; `None` removes the entry.
  async fn write(&self, path: &str, value: Option<Value>) -> Result<()> {
    self.check_online()?;
    let segs = segments(path)?;
    let mut tree = self.inner.tree.write().await;

    let Some((last, parents)) = segs.split_last() else {
      return Err(Error::InvalidPath(path.to_owned()));
    };

    let mut node = &mut *tree;
    for seg in parents {
      let child = node
        .entry(seg.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
      if !child.is_object() {
        *child = Value::Object(Map::new());
      }
      node = match child {
        Value::Object(map) => map,
        _ => return Err(Error::InvalidPath(path.to_owned())),
      };
    }

    match value {
      Some(v) if !v.is_null() => {
        node.insert(last.to_string(), v);
      }
      _ => {
        node.remove(*last);
      }
    }

    self.inner.writes.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

impl Mirror for MemoryMirror {
  type Error = Error;

  async fn list_documents<'a>(
    &'a self,
    collection: &'a str,
  ) -> Result<Vec<Document>> {
    Ok(
      self
        .read(collection)
        .await?
        .map(documents_from)
        .unwrap_or_default(),
    )
  }

  async fn get_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> Result<Option<Document>> {
    let path = document_path(collection, id)?;
    Ok(document_from(id, self.read(&path).await?))
  }

  async fn set_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
    fields: Fields,
  ) -> Result<()> {
    let path = document_path(collection, id)?;
    self.write(&path, Some(Value::Object(fields))).await
  }

  async fn delete_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> Result<()> {
    let path = document_path(collection, id)?;
    self.write(&path, None).await
  }

  async fn get_path<'a>(&'a self, path: &'a str) -> Result<Option<Value>> {
    self.read(path).await
  }

  async fn set_path<'a>(&'a self, path: &'a str, value: Value) -> Result<()> {
    self.write(path, Some(value)).await
  }
}
