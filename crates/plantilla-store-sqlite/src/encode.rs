//! Encoding and decoding helpers between record types and SQLite rows.
//!
//! Records travel as flat JSON objects keyed by column name. Each column's
//! [`ColumnKind`] decides the SQL storage class: booleans become `0`/`1`,
//! dates and times stay ISO 8601 text, numbers map to INTEGER or REAL.

use plantilla_core::{
  Key, Resource, Status,
  schema::{Column, ColumnKind, Table},
};
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Number, Value};

use crate::{Error, Result};

// ─── Keys and status ─────────────────────────────────────────────────────────

pub fn encode_key(key: &Key) -> SqlValue {
  match key {
    Key::Int(id) => SqlValue::Integer(*id),
    Key::Text(id) => SqlValue::Text(id.clone()),
  }
}

pub fn encode_status(status: Status) -> SqlValue {
  SqlValue::Integer(if status.is_active() { 1 } else { 0 })
}

// ─── Record → row ────────────────────────────────────────────────────────────

/// Serialise `record` into its column map.
pub fn record_fields<R: Resource>(record: &R) -> Result<Map<String, Value>> {
  match serde_json::to_value(record)? {
    Value::Object(map) => Ok(map),
    other => Err(Error::Column {
      table:  R::TABLE.name,
      column: R::TABLE.key,
      reason: format!("record serialised to a non-object: {other}"),
    }),
  }
}

/// Convert one JSON field to the SQL value stored in `column`.
pub fn encode_value(
  table: &Table,
  column: &Column,
  value: Option<&Value>,
) -> Result<SqlValue> {
  let mismatch = |v: &Value| Error::Column {
    table:  table.name,
    column: column.name,
    reason: format!("cannot store {v} as {:?}", column.kind),
  };

  let Some(value) = value else {
    return Ok(SqlValue::Null);
  };

  Ok(match (column.kind, value) {
    (_, Value::Null) => SqlValue::Null,
    (ColumnKind::Text | ColumnKind::Date, Value::String(s)) => {
      SqlValue::Text(s.clone())
    }
    (ColumnKind::Integer, Value::Number(n)) => {
      SqlValue::Integer(n.as_i64().ok_or_else(|| mismatch(value))?)
    }
    (ColumnKind::Real, Value::Number(n)) => {
      SqlValue::Real(n.as_f64().ok_or_else(|| mismatch(value))?)
    }
    (ColumnKind::Bool, Value::Bool(b)) => SqlValue::Integer(i64::from(*b)),
    (_, other) => return Err(mismatch(other)),
  })
}

// ─── Row → record ────────────────────────────────────────────────────────────

/// Raw values read directly from a row, in `Table::columns` order.
pub struct RawRow(pub Vec<SqlValue>);

impl RawRow {
  pub fn read(row: &rusqlite::Row<'_>, width: usize) -> rusqlite::Result<Self> {
    (0..width)
      .map(|i| row.get::<_, SqlValue>(i))
      .collect::<rusqlite::Result<Vec<_>>>()
      .map(Self)
  }

  pub fn into_record<R: Resource>(self) -> Result<R> {
    let table = R::TABLE;
    let mut map = Map::with_capacity(table.columns.len());
    for (column, raw) in table.columns.iter().zip(self.0) {
      map.insert(column.name.to_owned(), decode_value(&table, column, raw)?);
    }
    Ok(serde_json::from_value(Value::Object(map))?)
  }
}

fn decode_value(table: &Table, column: &Column, raw: SqlValue) -> Result<Value> {
  let mismatch = |what: &str| Error::Column {
    table:  table.name,
    column: column.name,
    reason: format!("unexpected {what} for {:?} column", column.kind),
  };

  Ok(match (column.kind, raw) {
    (_, SqlValue::Null) => Value::Null,
    (ColumnKind::Bool, SqlValue::Integer(i)) => Value::Bool(i != 0),
    (ColumnKind::Integer, SqlValue::Integer(i)) => Value::from(i),
    (ColumnKind::Real, SqlValue::Integer(i)) => Value::from(i as f64),
    (ColumnKind::Real, SqlValue::Real(f)) => Number::from_f64(f)
      .map(Value::Number)
      .ok_or_else(|| mismatch("non-finite real"))?,
    (ColumnKind::Text | ColumnKind::Date, SqlValue::Text(s)) => Value::String(s),
    (ColumnKind::Text, SqlValue::Integer(i)) => Value::String(i.to_string()),
    (_, SqlValue::Blob(_)) => return Err(mismatch("blob")),
    (_, SqlValue::Integer(_)) => return Err(mismatch("integer")),
    (_, SqlValue::Real(_)) => return Err(mismatch("real")),
    (_, SqlValue::Text(_)) => return Err(mismatch("text")),
  })
}

// ─── SQL text ────────────────────────────────────────────────────────────────

/// `SELECT <all columns> FROM <table>`
pub fn select_sql(table: &Table) -> String {
  let names: Vec<&str> = table.columns.iter().map(|c| c.name).collect();
  format!("SELECT {} FROM {}", names.join(", "), table.name)
}

#[cfg(test)]
mod tests {
  use plantilla_core::catalog::Material;

  use super::*;

  #[test]
  fn bool_and_real_roundtrip_through_sql_values() {
    let table = Material::TABLE;
    let status = table.column("status").unwrap();
    let price = table.column("price").unwrap();

    assert_eq!(
      encode_value(&table, status, Some(&Value::Bool(false))).unwrap(),
      SqlValue::Integer(0)
    );
    assert_eq!(
      decode_value(&table, status, SqlValue::Integer(1)).unwrap(),
      Value::Bool(true)
    );
    assert_eq!(
      decode_value(&table, price, SqlValue::Integer(12)).unwrap(),
      serde_json::json!(12.0)
    );
  }

  #[test]
  fn type_mismatch_is_rejected() {
    let table = Material::TABLE;
    let price = table.column("price").unwrap();
    let err = encode_value(&table, price, Some(&Value::String("cheap".into())))
      .unwrap_err();
    assert!(matches!(err, Error::Column { column: "price", .. }));
  }

  #[test]
  fn missing_field_encodes_as_null() {
    let table = Material::TABLE;
    let unit = table.column("unit").unwrap();
    assert_eq!(encode_value(&table, unit, None).unwrap(), SqlValue::Null);
  }
}
