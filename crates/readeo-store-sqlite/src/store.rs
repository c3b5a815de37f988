//! [`SqliteStore`] — the SQLite implementation of [`EntityStore`].

use std::{collections::HashMap, path::Path, sync::Arc};

use readeo_core::{
  Assignments, EntitySpec, EntityStore, Field, FieldValue, Row, Window,
};
use rusqlite::types::Value as SqlValue;

use crate::{
  Error, Result,
  encode::{decode_row, encode_value, result_columns},
  schema::schema,
  sql::Statements,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Readeo entity store backed by a single SQLite file.
///
/// Statements for every registered entity are compiled when the store is
/// opened. Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  statements: Arc<HashMap<&'static str, Statements>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` serving `entities`, and create any
  /// missing tables.
  pub async fn open(path: impl AsRef<Path>, entities: &[&'static EntitySpec]) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, entities).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(entities: &[&'static EntitySpec]) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, entities).await
  }

  async fn init(conn: tokio_rusqlite::Connection, entities: &[&'static EntitySpec]) -> Result<Self> {
    let ddl = schema(entities);
    conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;

    let statements = entities
      .iter()
      .map(|spec| (spec.table, Statements::compile(spec)))
      .collect();
    tracing::debug!(entities = entities.len(), "sqlite store ready");

    Ok(Self { conn, statements: Arc::new(statements) })
  }

  /// Close the underlying connection, flushing any pending work.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  fn statements(&self, spec: &'static EntitySpec) -> Result<&Statements> {
    self.statements.get(spec.table).ok_or(Error::UnknownEntity(spec.name))
  }

  /// Run a write statement and return the number of affected rows.
  async fn execute(&self, sql: String, params: Vec<SqlValue>) -> Result<usize> {
    tracing::debug!(sql = %sql, "execute");
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.execute(rusqlite::params_from_iter(params))?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run a query and decode every row with the column kinds of `spec`.
  async fn query(
    &self,
    spec:   &'static EntitySpec,
    sql:    String,
    params: Vec<SqlValue>,
  ) -> Result<Vec<Row>> {
    tracing::debug!(sql = %sql, "query");
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(&sql)?;
        let columns = result_columns(&stmt, spec);
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| decode_row(row, &columns))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

/// Split assignments into the fields to name and the values to bind.
fn split(values: &Assignments) -> (Vec<&'static Field>, Vec<SqlValue>) {
  values.iter().map(|(field, value)| (*field, encode_value(value))).unzip()
}

// ─── EntityStore impl ────────────────────────────────────────────────────────

impl EntityStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, spec: &'static EntitySpec, values: Assignments) -> Result<usize> {
    spec.check_owned(values.iter().map(|(field, _)| *field))?;
    let (fields, params) = split(&values);
    let sql = self.statements(spec)?.insert(&fields);
    self.execute(sql, params).await
  }

  async fn find_by_id(&self, spec: &'static EntitySpec, id: i64) -> Result<Vec<Row>> {
    let sql = self.statements(spec)?.select_by_id.clone();
    self.query(spec, sql, vec![SqlValue::Integer(id)]).await
  }

  async fn find_ids_by_lookup(
    &self,
    spec:  &'static EntitySpec,
    value: FieldValue,
  ) -> Result<Vec<Row>> {
    let sql = self.statements(spec)?.select_ids_by_lookup.clone();
    self.query(spec, sql, vec![encode_value(&value)]).await
  }

  async fn update(
    &self,
    spec:   &'static EntitySpec,
    id:     i64,
    values: Assignments,
  ) -> Result<usize> {
    spec.check_owned(values.iter().map(|(field, _)| *field))?;
    if values.is_empty() {
      return Err(readeo_core::Error::NoFields.into());
    }
    let (fields, mut params) = split(&values);
    params.push(SqlValue::Integer(id));
    let sql = self.statements(spec)?.update(&fields);
    self.execute(sql, params).await
  }

  async fn set_deleted(&self, spec: &'static EntitySpec, id: i64, deleted: bool) -> Result<usize> {
    let sql = self.statements(spec)?.set_deleted.clone();
    let params = vec![encode_value(&FieldValue::Boolean(deleted)), SqlValue::Integer(id)];
    self.execute(sql, params).await
  }

  async fn delete(&self, spec: &'static EntitySpec, id: i64) -> Result<usize> {
    let sql = self.statements(spec)?.delete.clone();
    self.execute(sql, vec![SqlValue::Integer(id)]).await
  }

  async fn list(&self, spec: &'static EntitySpec, window: Option<Window>) -> Result<Vec<Row>> {
    let statements = self.statements(spec)?;
    match window {
      None => self.query(spec, statements.list_all.clone(), Vec::new()).await,
      Some(w) => {
        let params = vec![SqlValue::Integer(w.limit), SqlValue::Integer(w.offset)];
        self.query(spec, statements.list_window.clone(), params).await
      }
    }
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
