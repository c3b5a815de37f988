//! [`Dao`] — the typed data-access object for one entity.
//!
//! A `Dao` pairs a shared store handle with one [`EntitySpec`]. It never
//! returns an error: writes yield a [`WriteOutcome`] and reads yield
//! `Option<Vec<Row>>`, where `None` stands for "no matching non-deleted row"
//! (serialised as JSON `null`) as well as for a failed read. Failures are
//! logged here before they are collapsed.

use std::sync::Arc;

use crate::{
  entity::{EntitySpec, FieldValue},
  error::Error,
  store::{Assignments, EntityStore, Row, Window},
};

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Result of a write: whether it counts as a success, and how many rows the
/// statement touched.
///
/// `rows_affected` lets callers tell a real change from a zero-row no-op
/// (e.g. deleting an id that is already gone), which `success` alone does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOutcome {
  pub success:       bool,
  pub rows_affected: usize,
}

impl WriteOutcome {
  pub const FAILED: Self = Self { success: false, rows_affected: 0 };

  /// The statement executed without error.
  pub fn executed(rows_affected: usize) -> Self { Self { success: true, rows_affected } }

  pub fn matched_any(&self) -> bool { self.rows_affected > 0 }
}

// ─── Dao ─────────────────────────────────────────────────────────────────────

pub struct Dao<S> {
  store: Arc<S>,
  spec:  &'static EntitySpec,
}

impl<S> Clone for Dao<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store), spec: self.spec } }
}

impl<S: EntityStore> Dao<S> {
  pub fn new(store: Arc<S>, spec: &'static EntitySpec) -> Self { Self { store, spec } }

  pub fn spec(&self) -> &'static EntitySpec { self.spec }

  /// Insert a row. Succeeds iff exactly one row was inserted.
  pub async fn create(&self, values: Assignments) -> WriteOutcome {
    if let Err(e) = self.check_values(&values) {
      return self.rejected("create", e);
    }
    match self.store.insert(self.spec, values).await {
      Ok(1) => WriteOutcome::executed(1),
      Ok(rows) => {
        tracing::warn!(entity = self.spec.name, rows, "create inserted an unexpected row count");
        WriteOutcome { success: false, rows_affected: rows }
      }
      Err(e) => self.failed("create", &e),
    }
  }

  pub async fn get_by_id(&self, id: i64) -> Option<Vec<Row>> {
    let result = self.store.find_by_id(self.spec, id).await;
    self.rows("get_by_id", result)
  }

  /// Reverse lookup through the entity's lookup field.
  pub async fn get_id_by_field(&self, value: FieldValue) -> Option<Vec<Row>> {
    let result = self.store.find_ids_by_lookup(self.spec, value).await;
    self.rows("get_id_by_field", result)
  }

  /// Overwrite attribute fields. Succeeds whenever the statement executes,
  /// including when no row matched `id`.
  pub async fn update(&self, id: i64, values: Assignments) -> WriteOutcome {
    if let Err(e) = self.check_values(&values) {
      return self.rejected("update", e);
    }
    let result = self.store.update(self.spec, id, values).await;
    self.outcome("update", result)
  }

  pub async fn soft_delete(&self, id: i64) -> WriteOutcome {
    let result = self.store.set_deleted(self.spec, id, true).await;
    self.outcome("soft_delete", result)
  }

  pub async fn restore(&self, id: i64) -> WriteOutcome {
    let result = self.store.set_deleted(self.spec, id, false).await;
    self.outcome("restore", result)
  }

  /// Remove the row permanently, soft-deleted or not.
  pub async fn delete(&self, id: i64) -> WriteOutcome {
    let result = self.store.delete(self.spec, id).await;
    self.outcome("delete", result)
  }

  pub async fn list_all(&self) -> Option<Vec<Row>> {
    let result = self.store.list(self.spec, None).await;
    self.rows("list_all", result)
  }

  /// List the 1-indexed inclusive range `[start, end]`.
  pub async fn list_paginated(&self, start: i64, end: i64) -> Option<Vec<Row>> {
    let Some(window) = Window::from_inclusive(start, end) else {
      tracing::debug!(entity = self.spec.name, start, end, "empty pagination range");
      return None;
    };
    let result = self.store.list(self.spec, Some(window)).await;
    self.rows("list_paginated", result)
  }

  // ── Collapsing ──────────────────────────────────────────────────────────

  fn check_values(&self, values: &Assignments) -> Result<(), Error> {
    if values.is_empty() {
      return Err(Error::NoFields);
    }
    self.spec.check_owned(values.iter().map(|(field, _)| *field))
  }

  fn outcome(&self, op: &'static str, result: Result<usize, S::Error>) -> WriteOutcome {
    match result {
      Ok(rows) => WriteOutcome::executed(rows),
      Err(e) => self.failed(op, &e),
    }
  }

  fn rows(&self, op: &'static str, result: Result<Vec<Row>, S::Error>) -> Option<Vec<Row>> {
    match result {
      Ok(rows) if rows.is_empty() => None,
      Ok(rows) => Some(rows),
      Err(e) => {
        tracing::warn!(entity = self.spec.name, op, error = %e, "read failed");
        None
      }
    }
  }

  fn failed(&self, op: &'static str, e: &S::Error) -> WriteOutcome {
    tracing::warn!(entity = self.spec.name, op, error = %e, "write failed");
    WriteOutcome::FAILED
  }

  fn rejected(&self, op: &'static str, e: Error) -> WriteOutcome {
    tracing::warn!(entity = self.spec.name, op, error = %e, "write rejected");
    WriteOutcome::FAILED
  }
}
