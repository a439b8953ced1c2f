//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use plantilla_core::{
  Key, Resource, Status,
  schema::{Column, STATUS_COLUMN, Table},
  store::{RecordQuery, RecordStore},
};
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value as SqlValue};

use crate::{
  Error, Result,
  encode::{
    RawRow, encode_key, encode_status, encode_value, record_fields, select_sql,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The relational store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read one row of `R` by key.
  async fn fetch<R: Resource>(&self, key: &Key) -> Result<Option<R>> {
    let table = R::TABLE;
    let sql = format!("{} WHERE {} = ?1", select_sql(&table), table.key);
    let width = table.columns.len();
    let key_val = encode_key(key);

    let raw: Option<RawRow> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, [key_val], |row| RawRow::read(row, width))
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRow::into_record::<R>).transpose()
  }

  /// Like [`Self::fetch`] for a row that was just written.
  async fn fetch_written<R: Resource>(&self, key: Key) -> Result<R> {
    self.fetch(&key).await?.ok_or_else(|| Error::Vanished {
      table: R::TABLE.name,
      key:   key.to_string(),
    })
  }

  /// Encode `columns` of `record` in order.
  fn encode_columns<R: Resource>(
    record: &R,
    columns: impl Iterator<Item = &'static Column>,
  ) -> Result<(Vec<&'static str>, Vec<SqlValue>)> {
    let table = R::TABLE;
    let fields = record_fields(record)?;
    let mut names = Vec::new();
    let mut values = Vec::new();
    for column in columns {
      values.push(encode_value(&table, column, fields.get(column.name))?);
      names.push(column.name);
    }
    Ok((names, values))
  }
}

fn placeholders(n: usize) -> String {
  (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

fn check_filter(table: &Table, column: &str) -> Result<()> {
  table.require_column(column)?;
  Ok(())
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn insert<R: Resource>(&self, record: R) -> Result<R> {
    let table = R::TABLE;

    let explicit_key = if table.auto_key {
      None
    } else {
      Some(record.key().ok_or(Error::MissingKey(table.name))?)
    };

    let (names, values) = if table.auto_key {
      Self::encode_columns(&record, table.data_columns())?
    } else {
      Self::encode_columns(&record, table.columns.iter())?
    };

    let sql = format!(
      "INSERT INTO {} ({}) VALUES ({})",
      table.name,
      names.join(", "),
      placeholders(values.len()),
    );

    let rowid = self
      .conn
      .call(move |conn| {
        conn.execute(&sql, params_from_iter(values))?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(table = table.name, rowid, "row inserted");
    self
      .fetch_written(explicit_key.unwrap_or(Key::Int(rowid)))
      .await
  }

  async fn get<R: Resource>(&self, key: Key) -> Result<Option<R>> {
    self.fetch(&key).await
  }

  async fn list<R: Resource>(&self, query: RecordQuery) -> Result<Vec<R>> {
    let table = R::TABLE;
    let width = table.columns.len();

    let mut conds: Vec<String> = vec![];
    let mut params: Vec<SqlValue> = vec![];

    if let Some(status) = query.listing.status() {
      params.push(encode_status(status));
      conds.push(format!("{STATUS_COLUMN} = ?{}", params.len()));
    }
    if let Some((column, value)) = &query.filter {
      check_filter(&table, column)?;
      params.push(encode_key(value));
      conds.push(format!("{column} = ?{}", params.len()));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!(" WHERE {}", conds.join(" AND "))
    };
    let sql = format!(
      "{}{where_clause} ORDER BY {}",
      select_sql(&table),
      table.key
    );

    let raws: Vec<RawRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| RawRow::read(row, width))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRow::into_record::<R>).collect()
  }

  async fn update<R: Resource>(&self, record: R) -> Result<Option<R>> {
    let table = R::TABLE;
    let key = record.key().ok_or(Error::MissingKey(table.name))?;

    let (names, mut values) =
      Self::encode_columns(&record, table.data_columns())?;
    let assignments: Vec<String> = names
      .iter()
      .enumerate()
      .map(|(i, name)| format!("{name} = ?{}", i + 1))
      .collect();
    values.push(encode_key(&key));

    let sql = format!(
      "UPDATE {} SET {} WHERE {} = ?{}",
      table.name,
      assignments.join(", "),
      table.key,
      values.len(),
    );

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, params_from_iter(values))?))
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.fetch_written(key).await.map(Some)
  }

  async fn set_status<R: Resource>(
    &self,
    key: Key,
    status: Status,
  ) -> Result<Option<R>> {
    let table = R::TABLE;
    let sql = format!(
      "UPDATE {} SET {STATUS_COLUMN} = ?1 WHERE {} = ?2",
      table.name, table.key
    );
    let status_val = encode_status(status);
    let key_val = encode_key(&key);

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, [status_val, key_val])?))
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.fetch_written(key).await.map(Some)
  }
}
