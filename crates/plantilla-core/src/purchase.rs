//! Purchase requests.
//!
//! A request is a header plus detail lines; items that are not in the
//! material catalog go into `requests_additional`. Each kind carries a folio,
//! the human-facing sequence number kept as a counter in the key-path mirror.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  lifecycle::{Listing, Status},
  schema::{MirrorPolicy, resource},
};

/// The independent folio sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolioKind {
  RequestHeaders,
  RequestDetails,
  RequestsAdditional,
}

impl FolioKind {
  /// Key-path of the counter in the mirror.
  pub fn path(&self) -> &'static str {
    match self {
      Self::RequestHeaders => "folios/request_headers",
      Self::RequestDetails => "folios/request_details",
      Self::RequestsAdditional => "folios/requests_additional",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestHeader {
  pub id_request_header: Option<i64>,
  /// Assigned on create; any value sent by the caller is overwritten, and
  /// partial updates never change it.
  pub folio:             Option<i64>,
  pub id_project:        Option<String>,
  /// The requesting employee.
  pub id_employee:       Option<String>,
  pub request_date:      Option<NaiveDate>,
  pub comments:          Option<String>,
  pub status:            Status,
}

resource!(RequestHeader {
  table:   "request_headers",
  key:     id_request_header as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  read_only: [folio],
  columns: [
    id_request_header: Integer,
    folio: Integer,
    id_project: Text,
    id_employee: Text,
    request_date: Date,
    comments: Text,
    status: Bool,
  ],
});

/// One line of a purchase request. Lines created together share `id_detail`
/// and a single folio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDetail {
  pub id_request_detail: Option<i64>,
  pub id_detail:         String,
  pub folio:             Option<i64>,
  pub id_material:       Option<String>,
  pub quantity:          f64,
  pub unit:              Option<String>,
  pub comments:          Option<String>,
  pub status:            Status,
}

resource!(RequestDetail {
  table:   "request_details",
  key:     id_request_detail as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  read_only: [folio],
  columns: [
    id_request_detail: Integer,
    id_detail: Text,
    folio: Integer,
    id_material: Text,
    quantity: Real,
    unit: Text,
    comments: Text,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestAdditional {
  pub id_request_additional: Option<i64>,
  pub folio:                 Option<i64>,
  pub id_project:            Option<String>,
  pub description:           String,
  pub quantity:              f64,
  pub unit:                  Option<String>,
  pub status:                Status,
}

resource!(RequestAdditional {
  table:   "requests_additional",
  key:     id_request_additional as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  read_only: [folio],
  columns: [
    id_request_additional: Integer,
    folio: Integer,
    id_project: Text,
    description: Text,
    quantity: Real,
    unit: Text,
    status: Bool,
  ],
});
