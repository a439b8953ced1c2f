//! Catalog resources: reference tables mirrored into document collections for
//! the mobile app. Their ids are the document ids in the mirror.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  lifecycle::{Listing, Status},
  schema::{MirrorPolicy, resource},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
  pub id_category: String,
  pub name:        String,
  pub status:      Status,
}

resource!(Category {
  table:   "categories",
  key:     id_category as text,
  mirror:  MirrorPolicy::Collection("categories"),
  listing: Listing::Active,
  columns: [id_category: Text, name: Text, status: Bool],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subcategory {
  pub id_subcategory: String,
  pub id_category:    String,
  pub name:           String,
  pub status:         Status,
}

resource!(Subcategory {
  table:   "subcategories",
  key:     id_subcategory as text,
  mirror:  MirrorPolicy::Collection("subcategories"),
  listing: Listing::Active,
  columns: [
    id_subcategory: Text,
    id_category: Text,
    name: Text,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
  pub id_material:    String,
  pub name:           String,
  pub description:    Option<String>,
  /// Unit of measure, e.g. "m3" or "pza".
  pub unit:           Option<String>,
  pub id_category:    Option<String>,
  pub id_subcategory: Option<String>,
  pub price:          Option<f64>,
  pub status:         Status,
}

resource!(Material {
  table:   "materials_catalog",
  key:     id_material as text,
  mirror:  MirrorPolicy::Collection("materials"),
  listing: Listing::Active,
  columns: [
    id_material: Text,
    name: Text,
    description: Text,
    unit: Text,
    id_category: Text,
    id_subcategory: Text,
    price: Real,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
  pub id_tool:     String,
  pub name:        String,
  pub description: Option<String>,
  pub brand:       Option<String>,
  pub id_category: Option<String>,
  pub status:      Status,
}

resource!(Tool {
  table:   "tools_catalog",
  key:     id_tool as text,
  mirror:  MirrorPolicy::Collection("tools"),
  listing: Listing::Active,
  columns: [
    id_tool: Text,
    name: Text,
    description: Text,
    brand: Text,
    id_category: Text,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
  pub id_project:  String,
  pub name:        String,
  pub description: Option<String>,
  pub location:    Option<String>,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  pub status:      Status,
}

resource!(Project {
  table:   "projects",
  key:     id_project as text,
  mirror:  MirrorPolicy::Collection("projects"),
  listing: Listing::Active,
  columns: [
    id_project: Text,
    name: Text,
    description: Text,
    location: Text,
    start_date: Date,
    end_date: Date,
    status: Bool,
  ],
});
