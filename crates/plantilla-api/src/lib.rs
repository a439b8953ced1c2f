//! JSON REST API for Plantilla.
//!
//! Exposes an axum [`Router`] backed by [`Adapters`] over any
//! [`RecordStore`] and [`Mirror`]. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", plantilla_api::api_router(adapters.clone()))
//! ```

pub mod catalogs;
pub mod employees;
pub mod error;
pub mod extract;
pub mod records;
pub mod requests;
pub mod terminations;
pub mod users;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use plantilla_adapters::Adapters;
use plantilla_core::{
  catalog::{Category, Material, Project, Subcategory, Tool},
  hr::{
    AbsenceRequest, Attendance, Disability, Employee, EmployeeDocument,
    JobDescription, LaborEvent, Role, SalaryTabulator, Termination,
  },
  mirror::Mirror,
  purchase::{RequestAdditional, RequestDetail, RequestHeader},
  store::RecordStore,
};

pub use error::ApiError;

/// Handler state: the adapters shared by every request.
pub type Shared<S, M> = Arc<Adapters<S, M>>;

/// Build a fully-materialised API router over `adapters`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, M>(adapters: Shared<S, M>) -> Router<()>
where
  S: RecordStore + 'static,
  M: Mirror + 'static,
{
  use records::{collection, member};

  Router::new()
    // Accounts
    .route("/users", get(users::list::<S, M>).post(users::create::<S, M>))
    .route("/users/login", post(users::login::<S, M>))
    .route(
      "/users/{id}",
      get(users::get_one::<S, M>)
        .put(users::update::<S, M>)
        .delete(users::remove::<S, M>),
    )
    .route("/roles", collection::<S, M, Role>())
    .route("/roles/{id}", member::<S, M, Role>())
    // Employees
    .route(
      "/employees",
      get(records::list::<S, M, Employee>).post(employees::create::<S, M>),
    )
    .route("/employees/sync", post(employees::sync::<S, M>))
    .route(
      "/employees/{id}",
      get(records::get_one::<S, M, Employee>)
        .put(employees::update::<S, M>)
        .delete(records::remove::<S, M, Employee>),
    )
    .route(
      "/employees/{id}/labor-events",
      get(employees::labor_events::<S, M>),
    )
    .route("/attendances", collection::<S, M, Attendance>())
    .route("/attendances/{id}", member::<S, M, Attendance>())
    .route("/labor-events", collection::<S, M, LaborEvent>())
    .route("/labor-events/{id}", member::<S, M, LaborEvent>())
    .route(
      "/terminations",
      get(records::list::<S, M, Termination>)
        .post(terminations::create::<S, M>),
    )
    .route("/terminations/{id}", member::<S, M, Termination>())
    .route("/employee-documents", collection::<S, M, EmployeeDocument>())
    .route("/employee-documents/{id}", member::<S, M, EmployeeDocument>())
    .route("/disabilities", collection::<S, M, Disability>())
    .route("/disabilities/{id}", member::<S, M, Disability>())
    .route("/absence-requests", collection::<S, M, AbsenceRequest>())
    .route("/absence-requests/{id}", member::<S, M, AbsenceRequest>())
    .route("/job-descriptions", collection::<S, M, JobDescription>())
    .route("/job-descriptions/{id}", member::<S, M, JobDescription>())
    .route("/salary-tabulators", collection::<S, M, SalaryTabulator>())
    .route("/salary-tabulators/{id}", member::<S, M, SalaryTabulator>())
    // Catalogs
    .route("/categories", collection::<S, M, Category>())
    .route("/categories/sync", post(catalogs::sync::<S, M, Category>))
    .route("/categories/{id}", member::<S, M, Category>())
    .route("/subcategories", collection::<S, M, Subcategory>())
    .route("/subcategories/sync", post(catalogs::sync::<S, M, Subcategory>))
    .route("/subcategories/{id}", member::<S, M, Subcategory>())
    .route("/materials", collection::<S, M, Material>())
    .route("/materials/sync", post(catalogs::sync::<S, M, Material>))
    .route("/materials/{id}", member::<S, M, Material>())
    .route("/tools", collection::<S, M, Tool>())
    .route("/tools/sync", post(catalogs::sync::<S, M, Tool>))
    .route("/tools/{id}", member::<S, M, Tool>())
    .route("/projects", collection::<S, M, Project>())
    .route("/projects/sync", post(catalogs::sync::<S, M, Project>))
    .route("/projects/{id}", member::<S, M, Project>())
    // Purchase requests
    .route(
      "/request-headers",
      get(records::list::<S, M, RequestHeader>)
        .post(requests::create_header::<S, M>),
    )
    .route("/request-headers/folio", get(requests::header_folio::<S, M>))
    .route("/request-headers/{id}", member::<S, M, RequestHeader>())
    .route(
      "/request-details",
      get(records::list::<S, M, RequestDetail>)
        .post(requests::create_detail::<S, M>),
    )
    .route(
      "/request-details/batch",
      post(requests::create_detail_batch::<S, M>),
    )
    .route("/request-details/folio", get(requests::detail_folio::<S, M>))
    .route("/request-details/{id}", member::<S, M, RequestDetail>())
    .route(
      "/requests-additional",
      get(records::list::<S, M, RequestAdditional>)
        .post(requests::create_additional::<S, M>),
    )
    .route(
      "/requests-additional/folio",
      get(requests::additional_folio::<S, M>),
    )
    .route(
      "/requests-additional/{id}",
      member::<S, M, RequestAdditional>(),
    )
    .with_state(adapters)
}
