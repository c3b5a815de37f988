//! Encoding and decoding between typed field values and SQLite cells.
//!
//! Booleans are stored as `0`/`1` integers and decoded back to JSON
//! booleans. Every cell is decoded with the declared kind of its column.

use readeo_core::{EntitySpec, FieldKind, FieldValue, Row};
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

pub fn encode_value(value: &FieldValue) -> SqlValue {
  match value {
    FieldValue::Null => SqlValue::Null,
    FieldValue::Integer(n) => SqlValue::Integer(*n),
    FieldValue::Text(s) => SqlValue::Text(s.clone()),
    FieldValue::Boolean(b) => SqlValue::Integer(i64::from(*b)),
  }
}

/// Column names of a prepared statement paired with their declared kinds.
///
/// Columns unknown to `spec` decode as text.
pub fn result_columns(stmt: &rusqlite::Statement<'_>, spec: &EntitySpec) -> Vec<(String, FieldKind)> {
  stmt
    .column_names()
    .into_iter()
    .map(|name| (name.to_owned(), spec.kind_of(name).unwrap_or(FieldKind::Text)))
    .collect()
}

pub fn decode_row(row: &rusqlite::Row<'_>, columns: &[(String, FieldKind)]) -> rusqlite::Result<Row> {
  let mut out = Row::new();
  for (idx, (name, kind)) in columns.iter().enumerate() {
    out.insert(name.clone(), decode_cell(row, idx, *kind)?);
  }
  Ok(out)
}

fn decode_cell(row: &rusqlite::Row<'_>, idx: usize, kind: FieldKind) -> rusqlite::Result<Value> {
  Ok(match kind {
    FieldKind::Integer => row.get::<_, Option<i64>>(idx)?.map_or(Value::Null, Value::from),
    FieldKind::Text => row.get::<_, Option<String>>(idx)?.map_or(Value::Null, Value::from),
    FieldKind::Boolean => row.get::<_, Option<bool>>(idx)?.map_or(Value::Null, Value::from),
  })
}
