//! Statement text compiled from an [`EntitySpec`].
//!
//! Identifiers come from the `EntitySpec` only and are quoted; values are always
//! positional `?N` placeholders.

use readeo_core::{
  EntitySpec, Field,
  entity::DELETED_COLUMN,
};

/// Quote an identifier for SQLite.
pub fn quoted(ident: &str) -> String { format!("\"{}\"", ident.replace('"', "\"\"")) }

/// Every statement used against one entity's table.
#[derive(Debug)]
pub struct Statements {
  table:                    String,
  id:                       String,
  pub select_by_id:         String,
  pub select_ids_by_lookup: String,
  pub set_deleted:          String,
  pub delete:               String,
  pub list_all:             String,
  pub list_window:          String,
}

impl Statements {
  pub fn compile(spec: &EntitySpec) -> Self {
    let table = quoted(spec.table);
    let id = quoted(spec.id_column);
    let deleted = quoted(DELETED_COLUMN);

    let detail_columns = std::iter::once(id.clone())
      .chain(spec.fields.iter().map(|f| quoted(f.column)))
      .collect::<Vec<_>>()
      .join(", ");
    let listing_columns = format!("{id}, {}", quoted(spec.listing.column));

    Self {
      select_by_id:         format!(
        "SELECT {detail_columns} FROM {table} WHERE {id} = ?1 AND {deleted} = 0 ORDER BY {id}"
      ),
      select_ids_by_lookup: format!(
        "SELECT {id} FROM {table} WHERE {} = ?1 AND {deleted} = 0 ORDER BY {id}",
        quoted(spec.lookup.column)
      ),
      set_deleted:          format!("UPDATE {table} SET {deleted} = ?1 WHERE {id} = ?2"),
      delete:               format!("DELETE FROM {table} WHERE {id} = ?1"),
      list_all:             format!(
        "SELECT {listing_columns} FROM {table} WHERE {deleted} = 0 ORDER BY {id}"
      ),
      list_window:          format!(
        "SELECT {listing_columns} FROM {table} WHERE {deleted} = 0 ORDER BY {id} LIMIT ?1 OFFSET ?2"
      ),
      table,
      id,
    }
  }

  /// `INSERT` naming exactly `fields`, bound as `?1..?n` in order.
  pub fn insert(&self, fields: &[&Field]) -> String {
    let columns = fields.iter().map(|f| quoted(f.column)).collect::<Vec<_>>().join(", ");
    let placeholders = (1..=fields.len()).map(|n| format!("?{n}")).collect::<Vec<_>>().join(", ");
    format!("INSERT INTO {} ({columns}) VALUES ({placeholders})", self.table)
  }

  /// `UPDATE` setting exactly `fields` as `?1..?n`; the id is `?{n+1}`.
  pub fn update(&self, fields: &[&Field]) -> String {
    let sets = fields
      .iter()
      .enumerate()
      .map(|(i, f)| format!("{} = ?{}", quoted(f.column), i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    format!("UPDATE {} SET {sets} WHERE {} = ?{}", self.table, self.id, fields.len() + 1)
  }
}
