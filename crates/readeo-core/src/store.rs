//! The `EntityStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `readeo-store-sqlite`).
//! It is fallible; [`Dao`](crate::dao::Dao) sits on top of it and is the
//! boundary where failures collapse into plain outcomes.

use std::future::Future;

use crate::entity::{EntitySpec, Field, FieldValue};

/// One result row: column name → JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Field/value pairs to write, in the order they are bound.
pub type Assignments = Vec<(&'static Field, FieldValue)>;

// ─── Window ──────────────────────────────────────────────────────────────────

/// An offset/limit pair for paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
  pub offset: i64,
  pub limit:  i64,
}

impl Window {
  /// Translate a 1-indexed inclusive range `[start, end]`.
  ///
  /// Returns `None` when `start < 1` or `end < start`; such a range selects
  /// no rows.
  pub fn from_inclusive(start: i64, end: i64) -> Option<Self> {
    if start < 1 || end < start {
      return None;
    }
    Some(Self { offset: start - 1, limit: end - start + 1 })
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a relational backend holding one table per entity.
///
/// Every read filters out soft-deleted rows and orders by the id column.
/// Writes return the number of rows the statement affected.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EntityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert one row. Fields absent from `values` take their column default.
  fn insert(
    &self,
    spec: &'static EntitySpec,
    values: Assignments,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// The id and every attribute field of the non-deleted row with `id`.
  fn find_by_id(
    &self,
    spec: &'static EntitySpec,
    id: i64,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// The ids of non-deleted rows whose lookup field equals `value`.
  fn find_ids_by_lookup(
    &self,
    spec: &'static EntitySpec,
    value: FieldValue,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// Overwrite the given attribute fields of the row with `id`.
  fn update(
    &self,
    spec: &'static EntitySpec,
    id: i64,
    values: Assignments,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Set the soft-delete flag of the row with `id`.
  fn set_deleted(
    &self,
    spec: &'static EntitySpec,
    id: i64,
    deleted: bool,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Remove the row with `id`, whatever its soft-delete flag.
  fn delete(
    &self,
    spec: &'static EntitySpec,
    id: i64,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// The id and listing field of non-deleted rows, optionally windowed.
  fn list(
    &self,
    spec: &'static EntitySpec,
    window: Option<Window>,
  ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send + '_;

  /// Round-trip a trivial statement to check the backend is reachable.
  fn ping(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
