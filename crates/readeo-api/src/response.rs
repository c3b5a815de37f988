//! Mapping of data-access results onto HTTP responses.

use axum::{
  Json,
  http::{HeaderName, StatusCode},
  response::{IntoResponse, Response},
};
use readeo_core::{Row, WriteOutcome};
use serde_json::Value;

/// Carries [`WriteOutcome::rows_affected`] on successful writes.
pub const ROWS_AFFECTED: HeaderName = HeaderName::from_static("x-rows-affected");

/// A write result: `201` with an empty body on success, `404` otherwise.
#[derive(Debug)]
pub struct Written(pub WriteOutcome);

impl IntoResponse for Written {
  fn into_response(self) -> Response {
    let Written(outcome) = self;
    if outcome.success {
      (StatusCode::CREATED, [(ROWS_AFFECTED, outcome.rows_affected.to_string())]).into_response()
    } else {
      StatusCode::NOT_FOUND.into_response()
    }
  }
}

/// A read result: `200` with a JSON array, or `404` with a JSON `null` when
/// nothing matched.
#[derive(Debug)]
pub struct Found(pub Option<Vec<Row>>);

impl IntoResponse for Found {
  fn into_response(self) -> Response {
    match self.0 {
      Some(rows) => (StatusCode::OK, Json(rows)).into_response(),
      None => (StatusCode::NOT_FOUND, Json(Value::Null)).into_response(),
    }
  }
}
