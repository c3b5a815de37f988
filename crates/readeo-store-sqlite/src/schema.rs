//! SQL schema for the Readeo SQLite store.
//!
//! Generated from the registered entity specs and executed once at
//! connection startup. Idempotent thanks to `CREATE TABLE IF NOT EXISTS`.

use readeo_core::{EntitySpec, FieldKind, Presence, entity::DELETED_COLUMN};

use crate::sql::quoted;

/// Full schema DDL for `entities`.
pub fn schema(entities: &[&EntitySpec]) -> String {
  let mut ddl = String::from("PRAGMA journal_mode = WAL;\n\n");
  for spec in entities {
    ddl.push_str(&table(spec));
    ddl.push('\n');
  }
  ddl.push_str("PRAGMA user_version = 1;\n");
  ddl
}

fn table(spec: &EntitySpec) -> String {
  let mut lines = vec![format!("    {} INTEGER PRIMARY KEY", quoted(spec.id_column))];

  for field in spec.fields {
    let mut line = format!("    {} {}", quoted(field.column), field.kind.sql_type());
    match (field.presence, field.kind) {
      (Presence::Required, _) => line.push_str(" NOT NULL"),
      // An omitted flag reads back as false, never NULL.
      (Presence::Optional, FieldKind::Boolean) => line.push_str(" NOT NULL DEFAULT 0"),
      (Presence::Optional, _) => {}
    }
    if field.unique {
      line.push_str(" UNIQUE");
    }
    lines.push(line);
  }

  lines.push(format!("    {} INTEGER NOT NULL DEFAULT 0", quoted(DELETED_COLUMN)));
  lines.extend(spec.constraints.iter().map(|c| format!("    {c}")));

  format!(
    "CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n",
    quoted(spec.table),
    lines.join(",\n")
  )
}
