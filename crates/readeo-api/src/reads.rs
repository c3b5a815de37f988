//! Handlers for the read endpoints of one entity.
//!
//! | Method | Path | Parameters |
//! |--------|------|------------|
//! | `GET`/`POST` | `/get` | `id` |
//! | `GET`/`POST` | `/getByField` | the entity's lookup field |
//! | `GET`/`POST` | `/listAll` | none |
//! | `GET`/`POST` | `/listPaginated` | `start`, `end` (1-indexed, inclusive) |
//!
//! Parameters come from the query string on `GET` and the form body on
//! `POST`. Rows are returned as a JSON array with `200`; when nothing matches
//! the body is JSON `null` with `404`.

use axum::extract::State;
use readeo_core::EntityStore;

use crate::{
  EntityState,
  error::ApiError,
  params::{END, Params, START},
  response::Found,
  writes::id_param,
};

/// `/get?id=<id>`
pub async fn get_one<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Found, ApiError> {
  let id = id_param(&state, &params)?;
  Ok(Found(state.dao.get_by_id(id).await))
}

/// `/getByField?<lookup>=<value>` — ids of rows whose lookup field matches.
pub async fn get_by_field<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Found, ApiError> {
  let rule = state.rules.lookup.resolve(&params)?;
  let mut values = params.assignments(&rule.fields)?;
  let value = match values.pop() {
    Some((_, value)) => value,
    None => return Err(ApiError::BadRequest("missing lookup value".to_owned())),
  };
  Ok(Found(state.dao.get_id_by_field(value).await))
}

/// `/listAll`
pub async fn list_all<S: EntityStore>(State(state): State<EntityState<S>>) -> Found {
  Found(state.dao.list_all().await)
}

/// `/listPaginated?start=<n>&end=<m>`
pub async fn list_paginated<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Found, ApiError> {
  state.rules.range.resolve(&params)?;
  let start = params.integer(START)?;
  let end = params.integer(END)?;
  Ok(Found(state.dao.list_paginated(start, end).await))
}
