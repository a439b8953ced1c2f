//! Human-resources records: people, their accounts, and their employment
//! history.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  lifecycle::{Listing, Status},
  schema::{MirrorPolicy, resource},
};

// ─── Accounts ────────────────────────────────────────────────────────────────

/// A back-office account.
///
/// `password_hash` holds an argon2 PHC string; API layers must never echo it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
  pub id_user:       Option<i64>,
  pub name:          String,
  pub email:         String,
  pub password_hash: String,
  pub id_role:       Option<i64>,
  pub status:        Status,
}

resource!(User {
  table:   "users",
  key:     id_user as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  columns: [
    id_user: Integer,
    name: Text,
    email: Text,
    password_hash: Text,
    id_role: Integer,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
  pub id_role:     Option<i64>,
  pub name:        String,
  pub description: Option<String>,
  pub status:      Status,
}

resource!(Role {
  table:   "roles",
  key:     id_role as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  columns: [id_role: Integer, name: Text, description: Text, status: Bool],
});

// ─── Employees ───────────────────────────────────────────────────────────────

/// An employee. The id is the document id of the employee's profile in the
/// key-path mirror.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
  pub id_employee:  String,
  pub name:         String,
  pub last_name:    String,
  /// Job title, e.g. "Oficial" or "Ayudante".
  pub position:     String,
  pub department:   Option<String>,
  pub phone:        Option<String>,
  pub email:        Option<String>,
  pub hire_date:    Option<NaiveDate>,
  pub daily_salary: Option<f64>,
  pub status:       Status,
}

resource!(Employee {
  table:   "employees",
  key:     id_employee as text,
  mirror:  MirrorPolicy::Profile("employees"),
  listing: Listing::All,
  columns: [
    id_employee: Text,
    name: Text,
    last_name: Text,
    position: Text,
    department: Text,
    phone: Text,
    email: Text,
    hire_date: Date,
    daily_salary: Real,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attendance {
  pub id_attendance: Option<i64>,
  pub id_employee:   String,
  pub date:          Option<NaiveDate>,
  pub check_in:      Option<NaiveTime>,
  pub check_out:     Option<NaiveTime>,
  pub status:        Status,
}

resource!(Attendance {
  table:   "attendances",
  key:     id_attendance as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::All,
  columns: [
    id_attendance: Integer,
    id_employee: Text,
    date: Date,
    check_in: Text,
    check_out: Text,
    status: Bool,
  ],
});

// ─── Employment history ──────────────────────────────────────────────────────

/// Event names written by the adapters themselves.
pub mod events {
  pub const HIRE: &str = "Alta";
  pub const POSITION_CHANGE: &str = "Cambio de Puesto";
  pub const SALARY_CHANGE: &str = "Cambio de Salario";
  pub const TERMINATION: &str = "Baja";
}

/// A dated entry in an employee's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborEvent {
  pub id_labor_event: Option<i64>,
  pub id_employee:    String,
  pub event_name:     String,
  pub description:    Option<String>,
  pub event_date:     Option<NaiveDate>,
  pub status:         Status,
}

resource!(LaborEvent {
  table:   "labor_events",
  key:     id_labor_event as auto,
  mirror:  MirrorPolicy::Collection("labor_events"),
  listing: Listing::All,
  columns: [
    id_labor_event: Integer,
    id_employee: Text,
    event_name: Text,
    description: Text,
    event_date: Date,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Termination {
  pub id_termination:   Option<i64>,
  pub id_employee:      String,
  pub reason:           String,
  pub termination_date: Option<NaiveDate>,
  pub comments:         Option<String>,
  /// Public URL of the signed termination document, if one was uploaded.
  pub document_url:     Option<String>,
  pub status:           Status,
}

resource!(Termination {
  table:   "terminations",
  key:     id_termination as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::All,
  columns: [
    id_termination: Integer,
    id_employee: Text,
    reason: Text,
    termination_date: Date,
    comments: Text,
    document_url: Text,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeDocument {
  pub id_document: Option<i64>,
  pub id_employee: String,
  pub name:        String,
  pub url:         Option<String>,
  pub uploaded_at: Option<DateTime<Utc>>,
  pub status:      Status,
}

resource!(EmployeeDocument {
  table:   "employee_documents",
  key:     id_document as auto,
  mirror:  MirrorPolicy::Collection("employee_documents"),
  listing: Listing::Active,
  columns: [
    id_document: Integer,
    id_employee: Text,
    name: Text,
    url: Text,
    uploaded_at: Text,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disability {
  pub id_disability: Option<i64>,
  pub id_employee:   String,
  /// Free-text classification, e.g. "Enfermedad general".
  pub kind:          String,
  pub start_date:    Option<NaiveDate>,
  pub end_date:      Option<NaiveDate>,
  pub description:   Option<String>,
  pub status:        Status,
}

resource!(Disability {
  table:   "disabilities",
  key:     id_disability as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::All,
  columns: [
    id_disability: Integer,
    id_employee: Text,
    kind: Text,
    start_date: Date,
    end_date: Date,
    description: Text,
    status: Bool,
  ],
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsenceRequest {
  pub id_absence_request: Option<i64>,
  pub id_employee:        String,
  pub start_date:         Option<NaiveDate>,
  pub end_date:           Option<NaiveDate>,
  pub reason:             Option<String>,
  pub approved:           bool,
  pub status:             Status,
}

resource!(AbsenceRequest {
  table:   "absence_requests",
  key:     id_absence_request as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::All,
  columns: [
    id_absence_request: Integer,
    id_employee: Text,
    start_date: Date,
    end_date: Date,
    reason: Text,
    approved: Bool,
    status: Bool,
  ],
});

// ─── Positions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
  pub id_job_description: Option<i64>,
  pub position:           String,
  pub description:        Option<String>,
  pub requirements:       Option<String>,
  pub status:             Status,
}

resource!(JobDescription {
  table:   "job_descriptions",
  key:     id_job_description as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  columns: [
    id_job_description: Integer,
    position: Text,
    description: Text,
    requirements: Text,
    status: Bool,
  ],
});

/// Salary bands per position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryTabulator {
  pub id_salary_tabulator: Option<i64>,
  pub position:            String,
  pub daily_salary:        f64,
  pub weekly_salary:       f64,
  pub status:              Status,
}

resource!(SalaryTabulator {
  table:   "salary_tabulators",
  key:     id_salary_tabulator as auto,
  mirror:  MirrorPolicy::None,
  listing: Listing::Active,
  columns: [
    id_salary_tabulator: Integer,
    position: Text,
    daily_salary: Real,
    weekly_salary: Real,
    status: Bool,
  ],
});
