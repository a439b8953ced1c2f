//! Adapter tests against an in-memory store and an in-memory mirror.

use std::{collections::BTreeSet, sync::Arc};

use chrono::NaiveDate;
use plantilla_core::{
  Key, Listing, Status,
  catalog::Material,
  hr::{Employee, EmployeeDocument, LaborEvent, Termination, events},
  mirror::{Fields, Mirror},
  purchase::{FolioKind, RequestDetail, RequestHeader},
  store::{RecordQuery, RecordStore},
};
use plantilla_mirror::MemoryMirror;
use plantilla_store_sqlite::SqliteStore;
use serde_json::{Value, json};

use crate::{Adapters, Credentials, Error, NewUser, SyncReport};

type TestAdapters = Adapters<SqliteStore, MemoryMirror>;

async fn adapters() -> (TestAdapters, MemoryMirror) {
  let store = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  let mirror = MemoryMirror::new();
  (Adapters::new(store, mirror.clone()), mirror)
}

fn fields(v: Value) -> Fields {
  match v {
    Value::Object(map) => map,
    _ => panic!("not an object"),
  }
}

fn employee(id: &str, position: &str) -> Employee {
  Employee {
    id_employee: id.into(),
    name: "Juan".into(),
    last_name: "Pérez".into(),
    position: position.into(),
    hire_date: NaiveDate::from_ymd_opt(2023, 3, 1),
    daily_salary: Some(450.0),
    ..Default::default()
  }
}

async fn events_of(a: &TestAdapters, id: &str) -> Vec<LaborEvent> {
  a.employee_events(id, None).await.unwrap()
}

// ─── CRUD and mirroring ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_catalog_assigns_id_and_mirrors() {
  let (a, mirror) = adapters().await;
  let created = a
    .create(Material {
      name: "Cemento".into(),
      price: Some(210.0),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(created.id_material.len(), 32);
  let doc = mirror
    .get_document("materials", &created.id_material)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(doc.fields["name"], "Cemento");
  assert_eq!(doc.fields["status"], true);
  assert!(!doc.fields.contains_key("id_material"));
}

#[tokio::test]
async fn remove_is_soft_and_withdraws_document() {
  let (a, mirror) = adapters().await;
  a.create(Material {
    id_material: "M1".into(),
    name: "Arena".into(),
    ..Default::default()
  })
  .await
  .unwrap();

  let removed: Material = a.remove(Key::from("M1")).await.unwrap();
  assert_eq!(removed.status, Status::Inactive);
  assert!(mirror.get_document("materials", "M1").await.unwrap().is_none());

  let active: Vec<Material> = a.list(None).await.unwrap();
  assert!(active.is_empty());
  let all: Vec<Material> = a.list(Some(Listing::All)).await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn remove_missing_is_not_found() {
  let (a, _) = adapters().await;
  let result = a.remove::<Material>(Key::from("nope")).await;
  assert!(matches!(result, Err(Error::NotFound { table: "materials_catalog", .. })));
}

#[tokio::test]
async fn update_fields_keeps_unpatched_columns() {
  let (a, _) = adapters().await;
  a.create(Material {
    id_material: "M1".into(),
    name: "Arena".into(),
    unit: Some("m3".into()),
    ..Default::default()
  })
  .await
  .unwrap();
  a.remove::<Material>(Key::from("M1")).await.unwrap();

  let updated: Material = a
    .update_fields(
      Key::from("M1"),
      fields(json!({ "price": 350, "id_material": "M9", "bogus": 1 })),
    )
    .await
    .unwrap();

  assert_eq!(updated.id_material, "M1");
  assert_eq!(updated.price, Some(350.0));
  assert_eq!(updated.unit.as_deref(), Some("m3"));
  // A patch without `status` does not revive a removed row.
  assert_eq!(updated.status, Status::Inactive);
}

#[tokio::test]
async fn mirror_failure_keeps_relational_write() {
  let (a, mirror) = adapters().await;
  mirror.set_offline(true);

  let result = a
    .create(Material {
      id_material: "M1".into(),
      name: "Grava".into(),
      ..Default::default()
    })
    .await;
  assert!(matches!(result, Err(Error::Mirror(_))));

  let stored: Material = a.get(Key::from("M1")).await.unwrap();
  assert_eq!(stored.name, "Grava");
}

#[tokio::test]
async fn create_rejects_keys_that_split_mirror_paths() {
  let (a, mirror) = adapters().await;
  let result = a
    .create(Material {
      id_material: "M/1".into(),
      name: "Cemento".into(),
      ..Default::default()
    })
    .await;
  assert!(matches!(result, Err(Error::BadRequest(_))));

  let result = a.create_employee(employee("E.1", "Oficial")).await;
  assert!(matches!(result, Err(Error::BadRequest(_))));

  let all: Vec<Material> = a.list(Some(Listing::All)).await.unwrap();
  assert!(all.is_empty());
  assert_eq!(mirror.writes(), 0);

  let report = a.sync_catalog::<Material>().await.unwrap();
  assert_eq!(report, SyncReport::default());
}

#[tokio::test]
async fn updating_removed_catalog_row_keeps_it_withdrawn() {
  let (a, mirror) = adapters().await;
  a.create(Material {
    id_material: "M1".into(),
    name: "Arena".into(),
    ..Default::default()
  })
  .await
  .unwrap();
  a.remove::<Material>(Key::from("M1")).await.unwrap();

  let updated: Material = a
    .update_fields(Key::from("M1"), fields(json!({ "name": "Arena fina" })))
    .await
    .unwrap();
  assert_eq!(updated.name, "Arena fina");
  assert!(mirror.get_document("materials", "M1").await.unwrap().is_none());

  // Reactivating publishes it again.
  a.update_fields::<Material>(Key::from("M1"), fields(json!({ "status": true })))
    .await
    .unwrap();
  let doc = mirror.get_document("materials", "M1").await.unwrap().unwrap();
  assert_eq!(doc.fields["name"], "Arena fina");
}

#[tokio::test]
async fn inactive_catalog_row_is_not_published() {
  let (a, mirror) = adapters().await;
  a.create(Material {
    id_material: "M1".into(),
    name: "Grava".into(),
    status: Status::Inactive,
    ..Default::default()
  })
  .await
  .unwrap();
  assert!(mirror.list_documents("materials").await.unwrap().is_empty());
}

// ─── Employees and labor events ──────────────────────────────────────────────

#[tokio::test]
async fn create_employee_records_hire_and_profile() {
  let (a, mirror) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();

  let events = events_of(&a, "E1").await;
  assert_eq!(events.len(), 1);
  assert_eq!(events[0].event_name, events::HIRE);
  assert_eq!(events[0].event_date, NaiveDate::from_ymd_opt(2023, 3, 1));

  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["position"], "Oficial");
  assert_eq!(profile["status"], true);
}

#[tokio::test]
async fn position_change_records_event() {
  let (a, mirror) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();

  let updated = a
    .update_employee(Key::from("E1"), fields(json!({ "position": "Ayudante" })))
    .await
    .unwrap();
  assert_eq!(updated.position, "Ayudante");

  let events = events_of(&a, "E1").await;
  let change: Vec<_> = events
    .iter()
    .filter(|e| e.event_name == events::POSITION_CHANGE)
    .collect();
  assert_eq!(change.len(), 1);
  assert_eq!(change[0].description.as_deref(), Some("Oficial -> Ayudante"));
  assert!(events.iter().all(|e| e.event_name != events::SALARY_CHANGE));

  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["position"], "Ayudante");
}

#[tokio::test]
async fn unchanged_position_records_nothing() {
  let (a, _) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();

  a.update_employee(
    Key::from("E1"),
    fields(json!({ "position": "Oficial", "daily_salary": 450, "phone": "555" })),
  )
  .await
  .unwrap();

  assert_eq!(events_of(&a, "E1").await.len(), 1);
}

#[tokio::test]
async fn salary_change_records_event() {
  let (a, _) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();

  a.update_employee(Key::from("E1"), fields(json!({ "daily_salary": 500.5 })))
    .await
    .unwrap();

  let events = events_of(&a, "E1").await;
  let salary = events
    .iter()
    .find(|e| e.event_name == events::SALARY_CHANGE)
    .unwrap();
  assert_eq!(salary.description.as_deref(), Some("450.00 -> 500.50"));
}

#[tokio::test]
async fn removing_employee_keeps_inactive_profile() {
  let (a, mirror) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();

  a.remove::<Employee>(Key::from("E1")).await.unwrap();

  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["status"], false);
  let all: Vec<Employee> = a.list(None).await.unwrap();
  assert_eq!(all.len(), 1, "employees list every status by default");
}

#[tokio::test]
async fn employee_writes_keep_foreign_profile_fields() {
  let (a, mirror) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();
  mirror
    .set_path("employees/E1/photo_url", json!("https://img/e1.png"))
    .await
    .unwrap();

  a.update_employee(Key::from("E1"), fields(json!({ "position": "Ayudante" })))
    .await
    .unwrap();
  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["position"], "Ayudante");
  assert_eq!(profile["photo_url"], "https://img/e1.png");

  a.remove::<Employee>(Key::from("E1")).await.unwrap();
  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["status"], false);
  assert_eq!(profile["photo_url"], "https://img/e1.png");
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

async fn seed_materials(mirror: &MemoryMirror) {
  mirror
    .set_document(
      "materials",
      "M1",
      fields(json!({ "name": "Cemento", "unit": "bulto", "price": 210, "status": true })),
    )
    .await
    .unwrap();
  mirror
    .set_document("materials", "M2", fields(json!({ "name": "Arena" })))
    .await
    .unwrap();
}

#[tokio::test]
async fn sync_inserts_then_is_idempotent() {
  let (a, mirror) = adapters().await;
  seed_materials(&mirror).await;

  let first = a.sync_catalog::<Material>().await.unwrap();
  assert_eq!(first.inserted, 2);
  assert_eq!(first.failed, 0);

  let stored: Material = a.get(Key::from("M1")).await.unwrap();
  assert_eq!(stored.price, Some(210.0));

  let second = a.sync_catalog::<Material>().await.unwrap();
  assert_eq!(second.writes(), 0);
  assert_eq!(second.unchanged, 2);
}

#[tokio::test]
async fn sync_updates_changed_documents() {
  let (a, mirror) = adapters().await;
  seed_materials(&mirror).await;
  a.sync_catalog::<Material>().await.unwrap();

  mirror
    .set_document(
      "materials",
      "M1",
      fields(json!({ "name": "Cemento", "unit": "bulto", "price": 215.5 })),
    )
    .await
    .unwrap();

  let report = a.sync_catalog::<Material>().await.unwrap();
  assert_eq!(report.updated, 1);
  assert_eq!(report.unchanged, 1);

  let stored: Material = a.get(Key::from("M1")).await.unwrap();
  assert_eq!(stored.price, Some(215.5));
}

#[tokio::test]
async fn sync_skips_bad_documents() {
  let (a, mirror) = adapters().await;
  seed_materials(&mirror).await;
  mirror
    .set_document("materials", "M3", fields(json!({ "name": "Varilla", "price": "caro" })))
    .await
    .unwrap();

  let report = a.sync_catalog::<Material>().await.unwrap();
  assert_eq!(report.inserted, 2);
  assert_eq!(report.failed, 1);
  assert!(a.get::<Material>(Key::from("M3")).await.is_err());
}

#[tokio::test]
async fn sync_aborts_when_mirror_is_unreachable() {
  let (a, mirror) = adapters().await;
  mirror.set_offline(true);
  let result = a.sync_catalog::<Material>().await;
  assert!(matches!(result, Err(Error::Mirror(_))));
}

#[tokio::test]
async fn sync_rejects_unmirrored_resource() {
  let (a, _) = adapters().await;
  let result = a.sync_catalog::<Employee>().await;
  assert!(matches!(result, Err(Error::BadRequest(_))));
}

#[tokio::test]
async fn push_profiles_writes_only_differences() {
  let (a, mirror) = adapters().await;
  a.store().insert(employee("E1", "Oficial")).await.unwrap();
  a.store().insert(employee("E2", "Ayudante")).await.unwrap();

  let first = a.push_employees().await.unwrap();
  assert_eq!(first.inserted, 2);
  let writes = mirror.writes();

  let second = a.push_employees().await.unwrap();
  assert_eq!(second.unchanged, 2);
  assert_eq!(mirror.writes(), writes);
}

#[tokio::test]
async fn push_profiles_keeps_foreign_fields() {
  let (a, mirror) = adapters().await;
  a.store().insert(employee("E1", "Oficial")).await.unwrap();
  a.push_employees().await.unwrap();

  let mut profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  profile["device_token"] = json!("abc");
  mirror.set_path("employees/E1", profile).await.unwrap();
  a.store().update(employee("E1", "Cabo")).await.unwrap();

  let report = a.push_employees().await.unwrap();
  assert_eq!(report.updated, 1);

  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["position"], "Cabo");
  assert_eq!(profile["device_token"], "abc");
}

#[tokio::test]
async fn push_profiles_aborts_when_mirror_is_unreachable() {
  let (a, mirror) = adapters().await;
  a.store().insert(employee("E1", "Oficial")).await.unwrap();
  a.store().insert(employee("E2", "Ayudante")).await.unwrap();
  mirror.set_offline(true);

  let result = a.push_employees().await;
  assert!(matches!(result, Err(Error::Mirror(_))));
}

// ─── Folios ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reading_folio_does_not_consume_it() {
  let (a, _) = adapters().await;
  assert_eq!(a.current_folio(FolioKind::RequestHeaders).await.unwrap(), 1);
  assert_eq!(a.current_folio(FolioKind::RequestHeaders).await.unwrap(), 1);

  let header = a
    .create_request_header(RequestHeader {
      folio: Some(99),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(header.folio, Some(1));
  assert_eq!(a.current_folio(FolioKind::RequestHeaders).await.unwrap(), 2);
  // Counters are independent.
  assert_eq!(a.current_folio(FolioKind::RequestDetails).await.unwrap(), 1);
}

#[tokio::test]
async fn partial_update_keeps_assigned_folio() {
  let (a, _) = adapters().await;
  let header = a
    .create_request_header(RequestHeader::default())
    .await
    .unwrap();
  let key = header.id_request_header.map(Key::from).unwrap();

  let updated: RequestHeader = a
    .update_fields(key, fields(json!({ "folio": 99, "comments": "urgente" })))
    .await
    .unwrap();
  assert_eq!(updated.folio, Some(1));
  assert_eq!(updated.comments.as_deref(), Some("urgente"));
}

#[tokio::test]
async fn folio_accepts_whole_float_counter() {
  let (a, mirror) = adapters().await;
  mirror.set_path("folios/requests_additional", json!(5.0)).await.unwrap();
  assert_eq!(
    a.current_folio(FolioKind::RequestsAdditional).await.unwrap(),
    6
  );

  mirror.set_path("folios/requests_additional", json!("x")).await.unwrap();
  assert!(matches!(
    a.current_folio(FolioKind::RequestsAdditional).await,
    Err(Error::Corrupt(_))
  ));
}

fn detail(id_detail: &str, material: &str) -> RequestDetail {
  RequestDetail {
    id_detail: id_detail.into(),
    id_material: Some(material.into()),
    quantity: 2.0,
    ..Default::default()
  }
}

#[tokio::test]
async fn detail_batch_consumes_one_folio() {
  let (a, mirror) = adapters().await;
  let created = a
    .create_detail_batch(vec![
      detail("D100", "M1"),
      detail("D100", "M2"),
      detail("D100", "M3"),
    ])
    .await
    .unwrap();

  assert_eq!(created.len(), 3);
  assert!(created.iter().all(|d| d.folio == Some(1)));
  assert_eq!(
    mirror.get_path("folios/request_details").await.unwrap(),
    Some(json!(1))
  );
}

#[tokio::test]
async fn detail_batch_rejects_mixed_or_empty() {
  let (a, mirror) = adapters().await;
  let mixed = a
    .create_detail_batch(vec![detail("D100", "M1"), detail("D200", "M2")])
    .await;
  assert!(matches!(mixed, Err(Error::BadRequest(_))));

  let empty = a.create_detail_batch(vec![]).await;
  assert!(matches!(empty, Err(Error::BadRequest(_))));

  assert_eq!(mirror.get_path("folios/request_details").await.unwrap(), None);
  let rows: Vec<RequestDetail> = a.list(None).await.unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn concurrent_increments_hand_out_distinct_folios() {
  let (a, _) = adapters().await;
  let a = Arc::new(a);

  let handles: Vec<_> = (0..10)
    .map(|_| {
      let a = Arc::clone(&a);
      tokio::spawn(async move {
        a.increment_folio(FolioKind::RequestHeaders).await.unwrap()
      })
    })
    .collect();

  let mut folios = BTreeSet::new();
  for handle in handles {
    folios.insert(handle.await.unwrap());
  }
  assert_eq!(folios, (1..=10).collect());
}

// ─── Termination ─────────────────────────────────────────────────────────────

fn termination(id: &str) -> Termination {
  Termination {
    id_employee: id.into(),
    reason: "Renuncia voluntaria".into(),
    termination_date: NaiveDate::from_ymd_opt(2024, 6, 30),
    document_url: Some("https://files.example.com/baja-e1.pdf".into()),
    ..Default::default()
  }
}

#[tokio::test]
async fn termination_cascade_runs_every_step() {
  let (a, mirror) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();

  let stored = a.create_termination(termination("E1")).await.unwrap();
  assert!(stored.id_termination.is_some());

  let events = events_of(&a, "E1").await;
  let baja = events
    .iter()
    .find(|e| e.event_name == events::TERMINATION)
    .unwrap();
  assert_eq!(baja.event_date, NaiveDate::from_ymd_opt(2024, 6, 30));
  assert_eq!(baja.description.as_deref(), Some("Renuncia voluntaria"));

  let emp: Employee = a.get(Key::from("E1")).await.unwrap();
  assert_eq!(emp.status, Status::Inactive);
  let profile = mirror.get_path("employees/E1").await.unwrap().unwrap();
  assert_eq!(profile["status"], false);

  let docs: Vec<EmployeeDocument> = a
    .list_where(RecordQuery::default().with_filter("id_employee", "E1"))
    .await
    .unwrap();
  assert_eq!(docs.len(), 1);
  assert_eq!(docs[0].name, "Baja");
  assert_eq!(
    docs[0].url.as_deref(),
    Some("https://files.example.com/baja-e1.pdf")
  );

  let mirrored = mirror.list_documents("employee_documents").await.unwrap();
  assert_eq!(mirrored.len(), 1);
  assert_eq!(mirrored[0].fields["name"], "Baja");
  let mirrored_events = mirror.list_documents("labor_events").await.unwrap();
  assert!(
    mirrored_events
      .iter()
      .any(|d| d.fields["event_name"] == events::TERMINATION)
  );
}

#[tokio::test]
async fn termination_of_unknown_employee_writes_nothing() {
  let (a, _) = adapters().await;
  let result = a.create_termination(termination("E404")).await;
  assert!(matches!(result, Err(Error::NotFound { table: "employees", .. })));

  let rows: Vec<Termination> = a.list(None).await.unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn termination_failure_keeps_earlier_steps() {
  let (a, mirror) = adapters().await;
  a.create_employee(employee("E1", "Oficial")).await.unwrap();
  mirror.set_offline(true);

  let result = a.create_termination(termination("E1")).await;
  assert!(matches!(
    result,
    Err(Error::Cascade { step: "labor event", .. })
  ));

  // The termination row and the event row stay; later steps never ran.
  let rows: Vec<Termination> = a.list(None).await.unwrap();
  assert_eq!(rows.len(), 1);
  let events = events_of(&a, "E1").await;
  assert!(events.iter().any(|e| e.event_name == events::TERMINATION));
  let emp: Employee = a.get(Key::from("E1")).await.unwrap();
  assert_eq!(emp.status, Status::Active);
  let docs: Vec<EmployeeDocument> = a.list(Some(Listing::All)).await.unwrap();
  assert!(docs.is_empty());
}

// ─── Users ───────────────────────────────────────────────────────────────────

fn new_user() -> NewUser {
  NewUser {
    name: "Ana".into(),
    email: "ana@example.com".into(),
    password: "s3cret".into(),
    id_role: None,
  }
}

fn credentials(password: &str) -> Credentials {
  Credentials {
    email:    "ana@example.com".into(),
    password: password.into(),
  }
}

#[tokio::test]
async fn user_password_is_hashed_and_checked() {
  let (a, _) = adapters().await;
  let user = a.create_user(new_user()).await.unwrap();
  assert!(user.password_hash.starts_with("$argon2"));

  let logged_in = a.login(credentials("s3cret")).await.unwrap();
  assert_eq!(logged_in.id_user, user.id_user);
  assert!(matches!(
    a.login(credentials("wrong")).await,
    Err(Error::Unauthorized)
  ));
}

#[tokio::test]
async fn user_password_change_and_removal() {
  let (a, _) = adapters().await;
  let user = a.create_user(new_user()).await.unwrap();
  let key = Key::Int(user.id_user.unwrap());

  let updated = a
    .update_user(
      key.clone(),
      fields(json!({ "password": "n3w", "password_hash": "forged" })),
    )
    .await
    .unwrap();
  assert_ne!(updated.password_hash, "forged");
  assert!(a.login(credentials("s3cret")).await.is_err());
  a.login(credentials("n3w")).await.unwrap();

  a.remove::<plantilla_core::hr::User>(key).await.unwrap();
  assert!(matches!(
    a.login(credentials("n3w")).await,
    Err(Error::Unauthorized)
  ));
}
