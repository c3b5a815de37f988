//! HTTP endpoints for the Readeo data-access layer.
//!
//! Exposes an axum [`Router`] backed by any [`readeo_core::EntityStore`].
//! Each entity gets its own nested router; every endpoint reads form-encoded
//! parameters, picks an operation through its ordered [`params::Rules`], and
//! calls the entity's [`Dao`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(readeo_api::api_router(store.clone(), catalogue::ALL))
//! ```

pub mod error;
pub mod params;
pub mod reads;
pub mod response;
pub mod writes;

use std::sync::Arc;

use axum::{
  Router,
  http::{HeaderValue, header},
  routing::{get, post},
};
use readeo_core::{Dao, EntitySpec, EntityStore};
use tower_http::set_header::SetResponseHeaderLayer;

pub use error::ApiError;

use params::EntityRules;

/// Content type declared on every response.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

// ─── State ────────────────────────────────────────────────────────────────────

/// Per-entity state shared by that entity's handlers.
pub struct EntityState<S> {
  pub dao:   Dao<S>,
  pub rules: Arc<EntityRules>,
}

impl<S> Clone for EntityState<S> {
  fn clone(&self) -> Self { Self { dao: self.dao.clone(), rules: Arc::clone(&self.rules) } }
}

impl<S: EntityStore> EntityState<S> {
  pub fn new(dao: Dao<S>) -> Self {
    let rules = Arc::new(EntityRules::compile(dao.spec()));
    Self { dao, rules }
  }
}

// ─── Routers ──────────────────────────────────────────────────────────────────

/// Build the API router for `entities`, each nested under `/{route}`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, entities: &[&'static EntitySpec]) -> Router<()>
where
  S: EntityStore + 'static,
{
  let router = entities.iter().fold(Router::new(), |router, &spec| {
    let dao = Dao::new(Arc::clone(&store), spec);
    router.nest(&format!("/{}", spec.route), entity_router(dao))
  });

  router.layer(SetResponseHeaderLayer::overriding(
    header::CONTENT_TYPE,
    HeaderValue::from_static(CONTENT_TYPE_JSON),
  ))
}

/// The endpoints of a single entity.
///
/// Besides the generic paths, `/get` and `/getByField` are also mounted under
/// their per-entity names, e.g. `/getCountry` and `/getCountryId`.
pub fn entity_router<S>(dao: Dao<S>) -> Router<()>
where
  S: EntityStore + 'static,
{
  let title = title_case(dao.spec().name);
  Router::new()
    // Writes
    .route("/create", post(writes::create::<S>))
    .route("/update", post(writes::update::<S>))
    .route("/softDelete", post(writes::soft_delete::<S>))
    .route("/restore", post(writes::restore::<S>))
    .route("/restoreSoftDeleted", post(writes::restore::<S>))
    .route("/delete", post(writes::delete::<S>))
    // Reads
    .route("/get", get(reads::get_one::<S>).post(reads::get_one::<S>))
    .route("/getByField", get(reads::get_by_field::<S>).post(reads::get_by_field::<S>))
    .route(&format!("/get{title}"), get(reads::get_one::<S>).post(reads::get_one::<S>))
    .route(
      &format!("/get{title}Id"),
      get(reads::get_by_field::<S>).post(reads::get_by_field::<S>),
    )
    .route("/listAll", get(reads::list_all::<S>).post(reads::list_all::<S>))
    .route("/queryAll", get(reads::list_all::<S>).post(reads::list_all::<S>))
    .route("/listPaginated", get(reads::list_paginated::<S>).post(reads::list_paginated::<S>))
    .route(
      "/queryAllPaginated",
      get(reads::list_paginated::<S>).post(reads::list_paginated::<S>),
    )
    .with_state(EntityState::new(dao))
}

/// `"country"` → `"Country"`.
fn title_case(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests;
