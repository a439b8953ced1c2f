//! Key-path validation and JSON tree helpers shared by both backends.

use plantilla_core::mirror::{Document, is_valid_key};
use serde_json::Value;

use crate::{Error, Result};

/// Split `path` into segments, rejecting empty segments and forbidden
/// characters.
pub fn segments(path: &str) -> Result<Vec<&str>> {
  let parts: Vec<&str> = path.split('/').collect();
  if parts.iter().all(|p| is_valid_key(p)) {
    Ok(parts)
  } else {
    Err(Error::InvalidPath(path.to_owned()))
  }
}

/// Join a collection name and document id into one validated path. The id
/// must be a single segment.
pub fn document_path(collection: &str, id: &str) -> Result<String> {
  if !is_valid_key(id) {
    return Err(Error::InvalidPath(format!("{collection}/{id}")));
  }
  let path = format!("{collection}/{id}");
  segments(&path)?;
  Ok(path)
}

/// Turn the object stored at a collection path into documents. Non-object
/// children are not documents and are skipped.
pub fn documents_from(value: Value) -> Vec<Document> {
  match value {
    Value::Object(children) => children
      .into_iter()
      .filter_map(|(id, child)| match child {
        Value::Object(fields) => Some(Document { id, fields }),
        _ => None,
      })
      .collect(),
    _ => vec![],
  }
}

/// Interpret the value stored at a document path.
pub fn document_from(id: &str, value: Option<Value>) -> Option<Document> {
  match value {
    Some(Value::Object(fields)) => Some(Document {
      id: id.to_owned(),
      fields,
    }),
    _ => None,
  }
}
