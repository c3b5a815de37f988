//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use readeo_core::catalogue;
use readeo_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{CONTENT_TYPE_JSON, api_router, response::ROWS_AFFECTED};

async fn app() -> axum::Router {
  let store = SqliteStore::open_in_memory(catalogue::ALL).await.unwrap();
  api_router(Arc::new(store), catalogue::ALL)
}

async fn post(app: &axum::Router, uri: &str, form: &str) -> Response {
  let req = Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    .body(Body::from(form.to_string()))
    .unwrap();
  app.clone().oneshot(req).await.unwrap()
}

async fn get(app: &axum::Router, uri: &str) -> Response {
  let req = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
  app.clone().oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn rows_affected(resp: &Response) -> &str {
  resp.headers().get(ROWS_AFFECTED).unwrap().to_str().unwrap()
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_review_with_all_fields_returns_201() {
  let app = app().await;
  let resp = post(&app, "/reviews/create", "idUser=5&idBook=7&review=great&shared=true").await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(rows_affected(&resp), "1");
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert!(bytes.is_empty());

  let resp = get(&app, "/reviews/get?id=1").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    json_body(resp).await,
    json!([{ "id_review": 1, "id_user": 5, "id_book": 7, "review": "great", "shared": true }])
  );
}

#[tokio::test]
async fn create_review_without_optional_field_returns_201() {
  let app = app().await;
  let resp = post(&app, "/reviews/create", "idUser=5&idBook=7&review=great").await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = json_body(get(&app, "/reviews/get?id=1").await).await;
  assert_eq!(body[0]["shared"], json!(false));
}

#[tokio::test]
async fn create_review_missing_required_field_returns_400() {
  let app = app().await;
  let resp = post(&app, "/reviews/create", "idUser=5&idBook=7").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json_body(resp).await["error"].is_string());

  // Nothing was written.
  assert_eq!(get(&app, "/reviews/listAll").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_non_integer_id_field_returns_400() {
  let app = app().await;
  let resp = post(&app, "/reviews/create", "idUser=five&idBook=7&review=great").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_violating_a_constraint_returns_404() {
  let app = app().await;
  let first = post(&app, "/reviews/create", "idUser=5&idBook=7&review=great").await;
  assert_eq!(first.status(), StatusCode::CREATED);

  let dup = post(&app, "/reviews/create", "idUser=5&idBook=7&review=again").await;
  assert_eq!(dup.status(), StatusCode::NOT_FOUND);
}

// ─── Reads ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_404_with_null_body() {
  let app = app().await;
  let resp = get(&app, "/countries/get?id=1").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json_body(resp).await, Value::Null);
}

#[tokio::test]
async fn get_without_id_returns_400() {
  let app = app().await;
  assert_eq!(get(&app, "/countries/get").await.status(), StatusCode::BAD_REQUEST);
  assert_eq!(get(&app, "/countries/get?id=abc").await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reads_accept_post_bodies() {
  let app = app().await;
  post(&app, "/countries/create", "name=France").await;

  let resp = post(&app, "/countries/get", "id=1").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!([{ "id_country": 1, "name_country": "France" }]));
}

#[tokio::test]
async fn get_by_field_returns_ids() {
  let app = app().await;
  post(&app, "/countries/create", "name=France").await;
  post(&app, "/countries/create", "name=Spain").await;

  let resp = get(&app, "/countries/getByField?name=Spain").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!([{ "id_country": 2 }]));

  let resp = get(&app, "/countries/getByField?name=Atlantis").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json_body(resp).await, Value::Null);
}

#[tokio::test]
async fn list_and_paginate() {
  let app = app().await;
  for name in ["France", "Spain", "Italy"] {
    post(&app, "/countries/create", &format!("name={name}")).await;
  }

  let all = json_body(get(&app, "/countries/listAll").await).await;
  assert_eq!(all.as_array().unwrap().len(), 3);

  let page = json_body(get(&app, "/countries/listPaginated?start=1&end=2").await).await;
  assert_eq!(page, json!([all[0], all[1]]));

  let legacy = json_body(get(&app, "/countries/queryAllPaginated?start=2&end=3").await).await;
  assert_eq!(legacy, json!([all[1], all[2]]));

  let inverted = get(&app, "/countries/listPaginated?start=3&end=1").await;
  assert_eq!(inverted.status(), StatusCode::NOT_FOUND);

  let missing = get(&app, "/countries/listPaginated?start=1").await;
  assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

// ─── Update / soft delete / restore / delete ─────────────────────────────────

#[tokio::test]
async fn partial_update_changes_one_field() {
  let app = app().await;
  post(&app, "/profiles/create", "avatar=cat.png&description=reader").await;

  let resp = post(&app, "/profiles/update", "id=1&description=avid%20reader").await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = json_body(get(&app, "/profiles/get?id=1").await).await;
  assert_eq!(
    body,
    json!([{ "id_profile": 1, "avatar": "cat.png", "description": "avid reader" }])
  );
}

#[tokio::test]
async fn update_writes_every_present_field() {
  let app = app().await;
  post(&app, "/reviews/create", "idUser=5&idBook=7&review=great").await;

  let resp = post(&app, "/reviews/update", "id=1&review=meh&shared=1").await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = json_body(get(&app, "/reviews/get?id=1").await).await;
  assert_eq!(
    body,
    json!([{ "id_review": 1, "id_user": 5, "id_book": 7, "review": "meh", "shared": true }])
  );
}

#[tokio::test]
async fn update_with_unparsable_field_returns_400() {
  let app = app().await;
  post(&app, "/reviews/create", "idUser=5&idBook=7&review=great").await;

  let resp = post(&app, "/reviews/update", "id=1&review=meh&idBook=seven").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body = json_body(get(&app, "/reviews/get?id=1").await).await;
  assert_eq!(body[0]["review"], json!("great"));
}

#[tokio::test]
async fn update_without_fields_returns_400() {
  let app = app().await;
  assert_eq!(post(&app, "/profiles/update", "id=1").await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn soft_delete_restore_and_delete_lifecycle() {
  let app = app().await;
  post(&app, "/countries/create", "name=France").await;

  let resp = post(&app, "/countries/softDelete", "id=1").await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(get(&app, "/countries/get?id=1").await.status(), StatusCode::NOT_FOUND);

  let resp = post(&app, "/countries/restoreSoftDeleted", "id=1").await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(get(&app, "/countries/get?id=1").await.status(), StatusCode::OK);

  let resp = post(&app, "/countries/delete", "id=1").await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(rows_affected(&resp), "1");

  // Deleting again keeps the success contract; the header shows the no-op.
  let resp = post(&app, "/countries/delete", "id=1").await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(rows_affected(&resp), "0");

  let resp = post(&app, "/countries/restore", "id=1").await;
  assert_eq!(rows_affected(&resp), "0");
  assert_eq!(get(&app, "/countries/get?id=1").await.status(), StatusCode::NOT_FOUND);
}

// ─── Malformed requests ───────────────────────────────────────────────────────

#[tokio::test]
async fn body_without_form_content_type_returns_400_json() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/countries/delete")
    .body(Body::empty())
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
  assert_eq!(ct, CONTENT_TYPE_JSON);
  assert!(json_body(resp).await["error"].is_string());
}

// ─── Per-entity read names ────────────────────────────────────────────────────

#[tokio::test]
async fn entity_named_read_routes() {
  let app = app().await;
  post(&app, "/countries/create", "name=France").await;

  let resp = get(&app, "/countries/getCountry?id=1").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, json!([{ "id_country": 1, "name_country": "France" }]));

  let resp = post(&app, "/countries/getCountryId", "name=France").await;
  assert_eq!(json_body(resp).await, json!([{ "id_country": 1 }]));

  let resp = post(&app, "/reviews/getReview", "id=1").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ─── Content type ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_response_is_declared_json() {
  let app = app().await;
  let responses = [
    post(&app, "/countries/create", "name=France").await,
    post(&app, "/countries/create", "").await,
    get(&app, "/countries/get?id=1").await,
    get(&app, "/countries/get?id=9").await,
  ];
  for resp in responses {
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert_eq!(ct, CONTENT_TYPE_JSON);
  }
}
