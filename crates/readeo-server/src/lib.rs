//! Readeo HTTP server: configuration, store lifecycle and the top-level
//! router.
//!
//! The binary in `main.rs` is a thin shell over this crate so the whole
//! application can be exercised in-process.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use config::{
  Config, ConfigError, Environment, File,
  builder::{ConfigBuilder, DefaultState},
};
use readeo_core::{EntitySpec, EntityStore};
use readeo_store_sqlite::SqliteStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Environment variables with this prefix override the config file.
pub const ENV_PREFIX: &str = "READEO";

/// Database path that opens a transient in-memory store.
pub const IN_MEMORY: &str = ":memory:";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// `READEO_*` environment.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8080,
      database_path: PathBuf::from("readeo.db"),
    }
  }
}

impl ServerConfig {
  /// Load from an optional TOML file at `path`, then the environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_builder(Config::builder().add_source(File::from(path).required(false)))
  }

  /// Finish `builder` with the environment layer and deserialise.
  pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder
      .add_source(Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Open the store named by `path`, creating tables for `entities`.
pub async fn open_store(
  path:     &Path,
  entities: &[&'static EntitySpec],
) -> readeo_store_sqlite::Result<SqliteStore> {
  if path == Path::new(IN_MEMORY) {
    return SqliteStore::open_in_memory(entities).await;
  }
  SqliteStore::open(expand_tilde(path), entities).await
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: entity endpoints, `/health`, and request tracing.
pub fn app<S>(store: Arc<S>, entities: &[&'static EntitySpec]) -> Router
where
  S: EntityStore + 'static,
{
  Router::new()
    .route("/health", get(health::<S>))
    .with_state(Arc::clone(&store))
    .merge(readeo_api::api_router(store, entities))
    .layer(TraceLayer::new_for_http())
}

async fn health<S: EntityStore>(State(store): State<Arc<S>>) -> (StatusCode, Json<Value>) {
  match store.ping().await {
    Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
    Err(e) => {
      tracing::warn!(error = %e, "health check failed");
      (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "degraded" })))
    }
  }
}
