//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::FormRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// A request the handler refused before touching the store.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No accepted parameter combination was present.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The request could not be read as a form (wrong content type, bad
  /// encoding).
  #[error("malformed form: {0}")]
  Form(#[from] FormRejection),

  /// A parameter was present but did not parse as its declared kind.
  #[error("invalid parameter: {0}")]
  InvalidParam(#[from] readeo_core::Error),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    tracing::debug!(error = %self, "rejected request");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
