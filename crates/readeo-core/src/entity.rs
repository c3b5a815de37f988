//! Entity configuration: the fixed description of one table.
//!
//! An [`EntitySpec`] names the table, its id column and its ordered attribute
//! fields. Storage backends compile their SQL from it and request handlers
//! read parameter names from it. Identifiers never come from a caller.
//!
//! Every table also carries a `deleted` flag which is not an attribute field:
//! it can only be toggled through soft delete and restore.

use std::fmt;

use crate::{Error, Result};

/// Name of the soft-delete flag column present on every entity table.
pub const DELETED_COLUMN: &str = "deleted";

// ─── Field kinds ─────────────────────────────────────────────────────────────

/// The declared semantic type of a column.
///
/// Used for parsing request parameters, binding statement values and decoding
/// result cells, so a column is always bound as the type it is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Integer,
  Text,
  Boolean,
}

impl FieldKind {
  /// Column type used in generated DDL.
  pub fn sql_type(self) -> &'static str {
    match self {
      FieldKind::Integer | FieldKind::Boolean => "INTEGER",
      FieldKind::Text => "TEXT",
    }
  }
}

impl fmt::Display for FieldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      FieldKind::Integer => "integer",
      FieldKind::Text => "text",
      FieldKind::Boolean => "boolean",
    })
  }
}

/// Whether a field must be supplied on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
  Required,
  /// May be omitted; the column default (or NULL) applies.
  Optional,
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// A typed scalar bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Null,
  Integer(i64),
  Text(String),
  Boolean(bool),
}

impl From<i64> for FieldValue {
  fn from(v: i64) -> Self { FieldValue::Integer(v) }
}

impl From<bool> for FieldValue {
  fn from(v: bool) -> Self { FieldValue::Boolean(v) }
}

impl From<String> for FieldValue {
  fn from(v: String) -> Self { FieldValue::Text(v) }
}

impl From<&str> for FieldValue {
  fn from(v: &str) -> Self { FieldValue::Text(v.to_owned()) }
}

/// Interpret a raw form value as a boolean.
///
/// Any value is accepted. `0`, `false`, `off`, `no` and the empty string are
/// false; everything else is true.
pub fn parse_flag(raw: &str) -> bool {
  let raw = raw.trim();
  !(raw.is_empty()
    || raw == "0"
    || raw.eq_ignore_ascii_case("false")
    || raw.eq_ignore_ascii_case("off")
    || raw.eq_ignore_ascii_case("no"))
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// One mutable scalar column of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
  /// Request parameter name (camelCase).
  pub param:    &'static str,
  /// Column name; also the JSON key in read results.
  pub column:   &'static str,
  pub kind:     FieldKind,
  pub presence: Presence,
  /// Emit a `UNIQUE` column constraint in the generated DDL.
  pub unique:   bool,
}

impl Field {
  pub const fn required(param: &'static str, column: &'static str, kind: FieldKind) -> Self {
    Self { param, column, kind, presence: Presence::Required, unique: false }
  }

  pub const fn optional(param: &'static str, column: &'static str, kind: FieldKind) -> Self {
    Self { param, column, kind, presence: Presence::Optional, unique: false }
  }

  pub const fn unique(self) -> Self { Self { unique: true, ..self } }

  pub fn is_required(&self) -> bool { self.presence == Presence::Required }

  /// Parse a raw request value as this field's declared kind.
  pub fn parse(&self, raw: &str) -> Result<FieldValue> {
    match self.kind {
      FieldKind::Text => Ok(FieldValue::Text(raw.to_owned())),
      FieldKind::Boolean => Ok(FieldValue::Boolean(parse_flag(raw))),
      FieldKind::Integer => raw
        .trim()
        .parse::<i64>()
        .map(FieldValue::Integer)
        .map_err(|_| Error::InvalidValue {
          param: self.param,
          kind:  self.kind,
          raw:   raw.to_owned(),
        }),
    }
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// Immutable per-table configuration.
#[derive(Debug)]
pub struct EntitySpec {
  /// Singular, lowercase name used in logs (e.g. `"country"`).
  pub name:        &'static str,
  /// Path segment the entity's endpoints are mounted under.
  pub route:       &'static str,
  pub table:       &'static str,
  /// Integer primary key, assigned by the store.
  pub id_column:   &'static str,
  /// Ordered attribute fields. Never contains the id or `deleted`.
  pub fields:      &'static [Field],
  /// Field used for reverse lookups (`getIdByField`).
  pub lookup:      &'static Field,
  /// Field projected next to the id by the list operations.
  pub listing:     &'static Field,
  /// Extra table-level constraints appended verbatim to the DDL.
  pub constraints: &'static [&'static str],
}

impl EntitySpec {
  /// Find an attribute field by request parameter name.
  pub fn field(&self, param: &str) -> Option<&'static Field> {
    self.fields.iter().find(|f| f.param == param)
  }

  /// Find an attribute field by column name.
  pub fn field_by_column(&self, column: &str) -> Option<&'static Field> {
    self.fields.iter().find(|f| f.column == column)
  }

  pub fn owns(&self, field: &Field) -> bool { self.fields.contains(field) }

  /// Declared kind of any column of this table, including the id and the
  /// soft-delete flag.
  pub fn kind_of(&self, column: &str) -> Option<FieldKind> {
    if column == self.id_column {
      return Some(FieldKind::Integer);
    }
    if column == DELETED_COLUMN {
      return Some(FieldKind::Boolean);
    }
    self.field_by_column(column).map(|f| f.kind)
  }

  /// Check that every field in `fields` belongs to this entity.
  pub fn check_owned<'a>(&self, fields: impl IntoIterator<Item = &'a Field>) -> Result<()> {
    for field in fields {
      if !self.owns(field) {
        return Err(Error::ForeignField { entity: self.name, field: field.column });
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalogue::{COUNTRY, REVIEW};

  #[test]
  fn integer_fields_reject_garbage() {
    let id_user = REVIEW.field("idUser").unwrap();
    assert_eq!(id_user.parse(" 5 ").unwrap(), FieldValue::Integer(5));
    assert!(matches!(
      id_user.parse("five"),
      Err(Error::InvalidValue { param: "idUser", .. })
    ));
  }

  #[test]
  fn boolean_fields_accept_any_value() {
    let shared = REVIEW.field("shared").unwrap();
    assert_eq!(shared.parse("true").unwrap(), FieldValue::Boolean(true));
    assert_eq!(shared.parse("yes please").unwrap(), FieldValue::Boolean(true));
    assert_eq!(shared.parse("0").unwrap(), FieldValue::Boolean(false));
    assert_eq!(shared.parse("OFF").unwrap(), FieldValue::Boolean(false));
    assert_eq!(shared.parse("").unwrap(), FieldValue::Boolean(false));
  }

  #[test]
  fn kind_of_covers_id_and_deleted() {
    assert_eq!(COUNTRY.kind_of("id_country"), Some(FieldKind::Integer));
    assert_eq!(COUNTRY.kind_of("deleted"), Some(FieldKind::Boolean));
    assert_eq!(COUNTRY.kind_of("name_country"), Some(FieldKind::Text));
    assert_eq!(COUNTRY.kind_of("nope"), None);
  }

  #[test]
  fn foreign_fields_are_rejected() {
    let review = REVIEW.field("review").unwrap();
    assert!(COUNTRY.check_owned([review]).is_err());
    assert!(REVIEW.check_owned(REVIEW.fields).is_ok());
  }
}
