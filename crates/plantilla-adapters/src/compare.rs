//! Field comparison used by reconciliation and by the labor-event triggers.

use plantilla_core::{Resource, Table, mirror::Fields};
use serde_json::Value;

use crate::Result;

/// Equality that treats numbers by value, so `12`, `12.0` and `1.2e1` match.
pub fn values_match(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Number(x), Value::Number(y)) => {
      x == y || matches!((x.as_f64(), y.as_f64()), (Some(x), Some(y)) if x == y)
    }
    (Value::Array(xs), Value::Array(ys)) => {
      xs.len() == ys.len()
        && xs.iter().zip(ys).all(|(x, y)| values_match(x, y))
    }
    (Value::Object(xs), Value::Object(ys)) => {
      xs.len() == ys.len()
        && xs
          .iter()
          .all(|(k, x)| ys.get(k).is_some_and(|y| values_match(x, y)))
    }
    _ => a == b,
  }
}

/// Names of the non-key columns of `table` whose values differ between
/// `current` and `incoming`. A missing field counts as `null`.
pub fn changed_fields(
  table: &Table,
  current: &Fields,
  incoming: &Fields,
) -> Vec<&'static str> {
  table
    .data_columns()
    .filter(|column| {
      let a = current.get(column.name).unwrap_or(&Value::Null);
      let b = incoming.get(column.name).unwrap_or(&Value::Null);
      !values_match(a, b)
    })
    .map(|column| column.name)
    .collect()
}

/// The serialised columns of `record`, key column included.
pub(crate) fn fields_of<R: Resource>(record: &R) -> Result<Fields> {
  match serde_json::to_value(record)? {
    Value::Object(fields) => Ok(fields),
    other => Err(crate::Error::Corrupt(format!(
      "{} did not serialise to an object: {other}",
      R::TABLE.name
    ))),
  }
}

/// The fields written to the mirror: every column except the key, which is
/// the document id or path segment instead.
pub(crate) fn mirror_fields<R: Resource>(record: &R) -> Result<Fields> {
  let mut fields = fields_of(record)?;
  fields.remove(R::TABLE.key);
  Ok(fields)
}

/// Overlay `fields` on the profile already stored in the mirror, keeping any
/// extra fields other writers put there.
pub(crate) fn merge_profile(existing: Option<Value>, fields: Fields) -> Fields {
  match existing {
    Some(Value::Object(mut profile)) => {
      profile.extend(fields);
      profile
    }
    _ => fields,
  }
}

/// Build a record from mirrored fields and the id it was stored under.
pub(crate) fn record_from_fields<R: Resource>(
  id: &str,
  mut fields: Fields,
) -> Result<R> {
  fields.remove(R::TABLE.key);
  let mut record: R = serde_json::from_value(Value::Object(fields))?;
  record.set_key(plantilla_core::Key::parse(&R::TABLE, id)?)?;
  Ok(record)
}
