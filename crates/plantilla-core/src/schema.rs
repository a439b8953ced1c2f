//! Declarative table descriptors and the [`Resource`] trait.
//!
//! Every record type describes the table that backs it: table name, key
//! column, and the typed list of columns. Storage backends build their SQL and
//! row conversion from these descriptors, so the column names here must match
//! the relational schema literally (`employees.id_employee`,
//! `materials_catalog.id_material`, ...).

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Result, lifecycle::{Listing, Status}};

/// Name of the soft-delete column carried by every table.
pub const STATUS_COLUMN: &str = "status";

// ─── Keys ────────────────────────────────────────────────────────────────────

/// A primary-key value.
///
/// Text keys mirror document-store ids; integer keys are auto-incremented by
/// the relational store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
  Int(i64),
  Text(String),
}

impl Key {
  /// Parse a raw path segment according to the key kind of `table`.
  pub fn parse(table: &Table, raw: &str) -> Result<Self> {
    if table.auto_key {
      raw.parse().map(Self::Int).map_err(|_| Error::KeyKind {
        table: table.name,
        key:   raw.to_owned(),
      })
    } else {
      Ok(Self::Text(raw.to_owned()))
    }
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int(id) => write!(f, "{id}"),
      Self::Text(id) => f.write_str(id),
    }
  }
}

impl From<i64> for Key {
  fn from(id: i64) -> Self { Self::Int(id) }
}

impl From<&str> for Key {
  fn from(id: &str) -> Self { Self::Text(id.to_owned()) }
}

impl From<String> for Key {
  fn from(id: String) -> Self { Self::Text(id) }
}

// ─── Columns and tables ──────────────────────────────────────────────────────

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Text,
  Integer,
  Real,
  /// Stored as `0`/`1`, surfaced as a JSON boolean.
  Bool,
  /// ISO 8601 calendar date (`YYYY-MM-DD`) stored as text.
  Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
  pub name: &'static str,
  pub kind: ColumnKind,
}

/// Static description of a relational table.
#[derive(Debug, Clone, Copy)]
pub struct Table {
  pub name:     &'static str,
  /// Primary-key column; always also present in `columns`.
  pub key:      &'static str,
  /// `true` when the store assigns the key (`AUTO_INCREMENT`).
  pub auto_key: bool,
  pub columns:  &'static [Column],
}

impl Table {
  pub fn column(&self, name: &str) -> Option<&'static Column> {
    self.columns.iter().find(|c| c.name == name)
  }

  /// Look up a column, failing if the table does not declare it.
  pub fn require_column(&self, name: &str) -> Result<&'static Column> {
    self.column(name).ok_or_else(|| Error::UnknownColumn {
      table:  self.name,
      column: name.to_owned(),
    })
  }

  /// All columns except the primary key.
  pub fn data_columns(&self) -> impl Iterator<Item = &'static Column> + '_ {
    let key = self.key;
    self.columns.iter().filter(move |c| c.name != key)
  }
}

// ─── Mirroring ───────────────────────────────────────────────────────────────

/// How a resource is mirrored into the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPolicy {
  /// Relational only.
  None,
  /// One document per row in the named document collection.
  Collection(&'static str),
  /// One object per row under the named root of the key-path tree.
  Profile(&'static str),
}

// ─── Resource ────────────────────────────────────────────────────────────────

/// A table-backed record type.
///
/// The serialised form of a resource is a flat JSON object whose keys are
/// exactly the column names of [`Resource::TABLE`].
pub trait Resource:
  Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
  const TABLE: Table;
  const MIRROR: MirrorPolicy = MirrorPolicy::None;
  /// Filter applied by `list` when the caller does not ask for one.
  const LISTING: Listing = Listing::All;
  /// Columns only the server assigns; partial updates leave them untouched.
  const READ_ONLY: &'static [&'static str] = &[];

  /// The primary key, or `None` when it has not been assigned yet.
  fn key(&self) -> Option<Key>;
  fn set_key(&mut self, key: Key) -> Result<()>;
  fn status(&self) -> Status;
  fn set_status(&mut self, status: Status);
}

/// Implement [`Resource`] for a record struct.
///
/// `key: <field> as text` declares a caller- or document-supplied string key;
/// `key: <field> as auto` declares an auto-incremented `Option<i64>` key.
/// The optional `read_only: [..]` list fills [`Resource::READ_ONLY`].
macro_rules! resource {
  (@table $table:literal, $key:ident, $auto:literal, [$($col:ident: $kind:ident),+ $(,)?]) => {
    $crate::schema::Table {
      name:     $table,
      key:      stringify!($key),
      auto_key: $auto,
      columns:  &[$(
        $crate::schema::Column {
          name: stringify!($col),
          kind: $crate::schema::ColumnKind::$kind,
        }
      ),+],
    }
  };

  (@common $mirror:expr, $listing:expr, [$($ro:ident),*]) => {
    const MIRROR: $crate::schema::MirrorPolicy = $mirror;
    const LISTING: $crate::lifecycle::Listing = $listing;
    const READ_ONLY: &'static [&'static str] = &[$(stringify!($ro)),*];

    fn status(&self) -> $crate::lifecycle::Status { self.status }

    fn set_status(&mut self, status: $crate::lifecycle::Status) {
      self.status = status;
    }
  };

  (
    $ty:ty {
      table:   $table:literal,
      key:     $key:ident as text,
      mirror:  $mirror:expr,
      listing: $listing:expr,
      $(read_only: [$($ro:ident),* $(,)?],)?
      columns: [$($cols:tt)+] $(,)?
    }
  ) => {
    impl $crate::schema::Resource for $ty {
      const TABLE: $crate::schema::Table =
        resource!(@table $table, $key, false, [$($cols)+]);

      resource!(@common $mirror, $listing, [$($($ro),*)?]);

      fn key(&self) -> Option<$crate::schema::Key> {
        if self.$key.is_empty() {
          None
        } else {
          Some($crate::schema::Key::Text(self.$key.clone()))
        }
      }

      fn set_key(&mut self, key: $crate::schema::Key) -> $crate::Result<()> {
        self.$key = key.to_string();
        Ok(())
      }
    }
  };

  (
    $ty:ty {
      table:   $table:literal,
      key:     $key:ident as auto,
      mirror:  $mirror:expr,
      listing: $listing:expr,
      $(read_only: [$($ro:ident),* $(,)?],)?
      columns: [$($cols:tt)+] $(,)?
    }
  ) => {
    impl $crate::schema::Resource for $ty {
      const TABLE: $crate::schema::Table =
        resource!(@table $table, $key, true, [$($cols)+]);

      resource!(@common $mirror, $listing, [$($($ro),*)?]);

      fn key(&self) -> Option<$crate::schema::Key> {
        self.$key.map($crate::schema::Key::Int)
      }

      fn set_key(&mut self, key: $crate::schema::Key) -> $crate::Result<()> {
        match key {
          $crate::schema::Key::Int(id) => {
            self.$key = Some(id);
            Ok(())
          }
          $crate::schema::Key::Text(raw) => Err($crate::Error::KeyKind {
            table: $table,
            key:   raw,
          }),
        }
      }
    }
  };
}

pub(crate) use resource;
