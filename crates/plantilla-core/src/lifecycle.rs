//! Record lifecycle.
//!
//! Records are never physically deleted. Removal flips the `status` column to
//! [`Status::Inactive`]; the row stays in place for history and for foreign
//! keys pointing at it.

use serde::{Deserialize, Serialize};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether a record is live or soft-deleted.
///
/// Serialised as a JSON boolean and stored as `1`/`0`, so the wire format and
/// the `status` column keep the shape existing clients expect.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(from = "bool", into = "bool")]
pub enum Status {
  #[default]
  Active,
  Inactive,
}

impl Status {
  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

impl From<bool> for Status {
  fn from(active: bool) -> Self {
    if active { Self::Active } else { Self::Inactive }
  }
}

impl From<Status> for bool {
  fn from(status: Status) -> Self { status.is_active() }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// Which rows a list operation returns.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
  Active,
  Inactive,
  #[default]
  All,
}

impl Listing {
  /// The status rows must carry to be listed; `None` means no filter.
  pub fn status(&self) -> Option<Status> {
    match self {
      Self::Active => Some(Status::Active),
      Self::Inactive => Some(Status::Inactive),
      Self::All => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_serialises_as_bool() {
    assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "true");
    assert_eq!(serde_json::to_string(&Status::Inactive).unwrap(), "false");
    let parsed: Status = serde_json::from_str("false").unwrap();
    assert_eq!(parsed, Status::Inactive);
  }

  #[test]
  fn listing_all_has_no_filter() {
    assert_eq!(Listing::All.status(), None);
    assert_eq!(Listing::Active.status(), Some(Status::Active));
    let parsed: Listing = serde_json::from_str("\"inactive\"").unwrap();
    assert_eq!(parsed, Listing::Inactive);
  }
}
