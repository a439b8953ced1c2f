//! The `Mirror` trait: the external store rows are copied into.
//!
//! Two surfaces are exposed. Document collections hold one flat JSON object
//! per catalog row; the key-path tree holds employee profiles and the folio
//! counters.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Characters a document id or key-path segment may not contain.
pub const FORBIDDEN_KEY_CHARS: &[char] = &['/', '.', '#', '$', '[', ']'];

/// Whether `id` can be used as one document id or path segment.
pub fn is_valid_key(id: &str) -> bool {
  !id.is_empty() && !id.contains(FORBIDDEN_KEY_CHARS)
}

/// The fields of a mirrored document.
pub type Fields = Map<String, Value>;

/// A document read from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id:     String,
  pub fields: Fields,
}

/// Abstraction over the external document / key-path store.
///
/// Paths are `/`-separated segments without leading or trailing slashes,
/// e.g. `employees/E1` or `folios/request_headers`.
pub trait Mirror: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Document collections ──────────────────────────────────────────────

  /// Read every document of a collection. An absent collection is empty.
  fn list_documents<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  fn get_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Create or overwrite a document.
  fn set_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
    fields: Fields,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete a document; deleting an absent document is not an error.
  fn delete_document<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Key-path tree ─────────────────────────────────────────────────────

  /// Read the value at `path`; `None` if nothing is stored there.
  fn get_path<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send + 'a;

  /// Overwrite the value at `path`.
  fn set_path<'a>(
    &'a self,
    path: &'a str,
    value: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
