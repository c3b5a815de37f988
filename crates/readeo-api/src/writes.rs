//! Handlers for the write endpoints of one entity.
//!
//! | Method | Path | Parameters |
//! |--------|------|------------|
//! | `POST` | `/create` | every field; trailing optional fields may be omitted |
//! | `POST` | `/update` | `id` + any non-empty set of fields |
//! | `POST` | `/softDelete` | `id` |
//! | `POST` | `/restore` | `id` |
//! | `POST` | `/delete` | `id` |
//!
//! Success is `201` with an empty body, failure `404`, a malformed request
//! `400`.

use axum::extract::State;
use readeo_core::EntityStore;

use crate::{
  EntityState,
  error::ApiError,
  params::{ID, Params},
  response::Written,
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /create`
pub async fn create<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Written, ApiError> {
  let rule = state.rules.create.resolve(&params)?;
  let values = params.assignments(&rule.fields)?;
  tracing::debug!(entity = state.dao.spec().name, fields = rule.fields.len(), "create");
  Ok(Written(state.dao.create(values).await))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `POST /update` — writes every attribute field present in the request.
pub async fn update<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Written, ApiError> {
  let id = id_param(&state, &params)?;
  let spec = state.dao.spec();
  let fields = params.present(spec);
  if fields.is_empty() {
    let expected = spec.fields.iter().map(|f| f.param).collect::<Vec<_>>().join(", ");
    return Err(ApiError::BadRequest(format!("expected {ID} plus any of: {expected}")));
  }
  let values = params.assignments(&fields)?;
  tracing::debug!(entity = spec.name, id, fields = fields.len(), "update");
  Ok(Written(state.dao.update(id, values).await))
}

// ─── Soft delete / restore / delete ───────────────────────────────────────────

/// `POST /softDelete`
pub async fn soft_delete<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Written, ApiError> {
  let id = id_param(&state, &params)?;
  Ok(Written(state.dao.soft_delete(id).await))
}

/// `POST /restore` (also `/restoreSoftDeleted`)
pub async fn restore<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Written, ApiError> {
  let id = id_param(&state, &params)?;
  Ok(Written(state.dao.restore(id).await))
}

/// `POST /delete` — permanent, whatever the soft-delete flag.
pub async fn delete<S: EntityStore>(
  State(state): State<EntityState<S>>,
  params: Params,
) -> Result<Written, ApiError> {
  let id = id_param(&state, &params)?;
  Ok(Written(state.dao.delete(id).await))
}

pub(crate) fn id_param<S: EntityStore>(
  state: &EntityState<S>,
  params: &Params,
) -> Result<i64, ApiError> {
  state.rules.by_id.resolve(params)?;
  params.integer(ID)
}
