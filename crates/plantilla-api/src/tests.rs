//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use plantilla_adapters::Adapters;
use plantilla_core::mirror::{Fields, Mirror};
use plantilla_mirror::MemoryMirror;
use plantilla_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> (Router, MemoryMirror) {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let mirror = MemoryMirror::new();
  let adapters = Arc::new(Adapters::new(store, mirror.clone()));
  (api_router(adapters), mirror)
}

async fn call(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn fields(v: Value) -> Fields {
  match v {
    Value::Object(map) => map,
    _ => panic!("not an object"),
  }
}

// ── Generic CRUD ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn material_lifecycle() {
  let (app, mirror) = app().await;

  let (status, created) = call(
    &app,
    "POST",
    "/materials",
    Some(json!({ "id_material": "M1", "name": "Cemento", "price": 210 })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["status"], true);
  assert!(mirror.get_document("materials", "M1").await.unwrap().is_some());

  let (status, fetched) = call(&app, "GET", "/materials/M1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["name"], "Cemento");

  let (status, updated) = call(
    &app,
    "PUT",
    "/materials/M1",
    Some(json!({ "price": 215.5 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["price"], 215.5);
  assert_eq!(updated["name"], "Cemento");

  let (status, removed) = call(&app, "DELETE", "/materials/M1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(removed["status"], false);

  let (_, active) = call(&app, "GET", "/materials", None).await;
  assert_eq!(active, json!([]));
  let (_, all) = call(&app, "GET", "/materials?status=all", None).await;
  assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_record_is_404_with_message() {
  let (app, _) = app().await;
  let (status, body) = call(&app, "GET", "/tools/T404", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("T404"));
}

#[tokio::test]
async fn non_numeric_id_on_auto_key_is_400() {
  let (app, _) = app().await;
  let (status, _) = call(&app, "GET", "/labor-events/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_input_is_400_with_json_error() {
  let (app, _) = app().await;

  let resp = app
    .clone()
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/materials")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].is_string());

  let (status, body) = call(&app, "GET", "/materials?status=bogus", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn key_with_path_separator_is_400() {
  let (app, mirror) = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/materials",
    Some(json!({ "id_material": "M/1", "name": "Cemento" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("M/1"));
  assert!(mirror.list_documents("materials").await.unwrap().is_empty());
}

#[tokio::test]
async fn mirror_outage_is_500_with_message() {
  let (app, mirror) = app().await;
  mirror.set_offline(true);
  let (status, body) = call(
    &app,
    "POST",
    "/categories",
    Some(json!({ "id_category": "C1", "name": "Obra negra" })),
  )
  .await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(body["error"].is_string());
}

// ── Employees ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn position_change_shows_in_labor_events() {
  let (app, _) = app().await;
  let (status, _) = call(
    &app,
    "POST",
    "/employees",
    Some(json!({
      "id_employee": "E1",
      "name": "Juan",
      "last_name": "Pérez",
      "position": "Oficial",
      "hire_date": "2023-03-01",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, _) = call(
    &app,
    "PUT",
    "/employees/E1",
    Some(json!({ "position": "Ayudante" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, events) =
    call(&app, "GET", "/employees/E1/labor-events", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<&str> = events
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["event_name"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["Alta", "Cambio de Puesto"]);
  assert_eq!(events[1]["description"], "Oficial -> Ayudante");
}

#[tokio::test]
async fn employee_sync_is_idempotent() {
  let (app, mirror) = app().await;
  call(
    &app,
    "POST",
    "/employees",
    Some(json!({ "id_employee": "E1", "name": "Ana", "position": "Cabo" })),
  )
  .await;
  let writes = mirror.writes();

  let (status, report) = call(&app, "POST", "/employees/sync", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(report["unchanged"], 1);
  assert_eq!(mirror.writes(), writes);
}

#[tokio::test]
async fn terminating_unknown_employee_is_404() {
  let (app, _) = app().await;
  let (status, _) = call(
    &app,
    "POST",
    "/terminations",
    Some(json!({ "id_employee": "E404", "reason": "Renuncia" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Catalog sync ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_sync_pulls_documents() {
  let (app, mirror) = app().await;
  mirror
    .set_document("tools", "T1", fields(json!({ "name": "Revolvedora" })))
    .await
    .unwrap();

  let (status, report) = call(&app, "POST", "/tools/sync", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(report["inserted"], 1);

  let (_, again) = call(&app, "POST", "/tools/sync", None).await;
  assert_eq!(again["inserted"], 0);
  assert_eq!(again["updated"], 0);

  let (status, tool) = call(&app, "GET", "/tools/T1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(tool["name"], "Revolvedora");
}

// ── Folios ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn detail_batch_uses_one_folio() {
  let (app, _) = app().await;

  let (_, preview) = call(&app, "GET", "/request-details/folio", None).await;
  assert_eq!(preview, json!({ "kind": "request_details", "folio": 1 }));
  let (_, preview) = call(&app, "GET", "/request-details/folio", None).await;
  assert_eq!(preview["folio"], 1);

  let line = json!({ "id_detail": "D100", "id_material": "M1", "quantity": 3 });
  let (status, created) = call(
    &app,
    "POST",
    "/request-details/batch",
    Some(json!([line, line, line])),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert!(created.as_array().unwrap().iter().all(|d| d["folio"] == 1));

  let (_, preview) = call(&app, "GET", "/request-details/folio", None).await;
  assert_eq!(preview["folio"], 2);
}

#[tokio::test]
async fn mixed_detail_batch_is_400() {
  let (app, _) = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/request-details/batch",
    Some(json!([
      { "id_detail": "D100", "quantity": 1 },
      { "id_detail": "D200", "quantity": 1 },
    ])),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("id_detail"));
}

#[tokio::test]
async fn request_header_gets_next_folio() {
  let (app, _) = app().await;
  let (_, first) = call(&app, "POST", "/request-headers", Some(json!({}))).await;
  let (_, second) =
    call(&app, "POST", "/request-headers", Some(json!({ "folio": 1 }))).await;
  assert_eq!(first["folio"], 1);
  assert_eq!(second["folio"], 2);
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn users_never_expose_hash() {
  let (app, _) = app().await;
  let (status, user) = call(
    &app,
    "POST",
    "/users",
    Some(json!({ "name": "Ana", "email": "ana@example.com", "password": "s3cret" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert!(user.get("password_hash").is_none());

  let (_, listed) = call(&app, "GET", "/users", None).await;
  assert!(listed[0].get("password_hash").is_none());

  let (status, _) = call(
    &app,
    "POST",
    "/users/login",
    Some(json!({ "email": "ana@example.com", "password": "s3cret" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = call(
    &app,
    "POST",
    "/users/login",
    Some(json!({ "email": "ana@example.com", "password": "nope" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "invalid credentials");
}
